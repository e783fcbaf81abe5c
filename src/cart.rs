//! Cart
//!
//! The session cart: an ordered collection of line items keyed by product,
//! with merge-on-add, clamped quantity updates, and idempotent removal. All
//! surfaces read the same snapshot; totals always come from
//! [`crate::pricing::compute_breakdown`].

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::products::ProductKey;

/// Errors related to cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency.
    #[error("Item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Externally meaningful cart states, used by presentation surfaces to pick
/// between browse prompts and line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No lines in the cart.
    Empty,

    /// At least one line in the cart.
    NonEmpty,
}

/// One purchasable configuration in the cart.
///
/// A line is identified by its product alone; the variant label is a
/// display-only snapshot of whatever combination was chosen at add time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: ProductKey,
    name: String,
    unit_price: Money<'a, Currency>,
    image: Option<String>,
    variant_label: String,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Line identity: the product this line was added for.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Display name snapshot taken at add time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price snapshot taken at add time.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Representative image snapshot taken at add time.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Display-only colour/size label.
    #[must_use]
    pub fn variant_label(&self) -> &str {
        &self.variant_label
    }

    /// Current quantity, always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A request to add one purchasable configuration to the cart.
///
/// Carries the denormalized product fields so later catalog changes never
/// alter items already in the cart.
#[derive(Debug, Clone)]
pub struct AddItemRequest<'a> {
    /// Product the line is added for.
    pub product: ProductKey,

    /// Display name at add time.
    pub name: String,

    /// Unit price at add time.
    pub unit_price: Money<'a, Currency>,

    /// Representative image at add time.
    pub image: Option<String>,

    /// Chosen colour/size combination, display-only.
    pub variant_label: String,

    /// Requested quantity; values below 1 are treated as 1.
    pub quantity: u32,
}

impl<'a> AddItemRequest<'a> {
    /// Create a request for a single unit.
    pub fn new(
        product: ProductKey,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        variant_label: impl Into<String>,
    ) -> Self {
        Self {
            product,
            name: name.into(),
            unit_price,
            image: None,
            variant_label: variant_label.into(),
            quantity: 1,
        }
    }

    /// Set the representative image snapshot.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the requested quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Cart
///
/// Owned by the session scope and mutated only through the operations below;
/// presentation surfaces receive read-only snapshots.
#[derive(Debug)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// If a line for the same product already exists its quantity is
    /// increased by the requested amount; otherwise a new line is appended.
    /// Requested quantities below 1 count as 1.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::CurrencyMismatch` if the item's currency
    /// disagrees with the cart currency.
    pub fn add_item(&mut self, request: AddItemRequest<'a>) -> Result<(), CartError> {
        let item_currency = request.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let quantity = request.quantity.max(1);

        if let Some(line) = self.line_mut(request.product) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(());
        }

        self.lines.push(CartLine {
            product: request.product,
            name: request.name,
            unit_price: request.unit_price,
            image: request.image,
            variant_label: request.variant_label,
            quantity,
        });

        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// Quantities below 1 clamp to 1; removing a line is an explicit separate
    /// operation. Unknown products are a no-op, which tolerates a UI racing a
    /// removal against a pending quantity edit.
    pub fn update_quantity(&mut self, product: ProductKey, quantity: u32) {
        if let Some(line) = self.line_mut(product) {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove a line from the cart. No-op if absent.
    pub fn remove_item(&mut self, product: ProductKey) {
        if let Some(position) = self.position_of(product) {
            self.lines.remove(position);
        }
    }

    /// Empty the cart entirely.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Read-only snapshot of the lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Look up a line by product.
    #[must_use]
    pub fn line(&self, product: ProductKey) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product == product)
    }

    /// Total number of units across all lines, as shown on the cart badge.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart's externally meaningful state.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position_of(&self, product: ProductKey) -> Option<usize> {
        self.lines.iter().position(|line| line.product == product)
    }

    fn line_mut(&mut self, product: ProductKey) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| line.product == product)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use slotmap::KeyData;

    use super::*;

    fn key(n: u64) -> ProductKey {
        KeyData::from_ffi(n).into()
    }

    fn request<'a>(product: ProductKey, minor: i64) -> AddItemRequest<'a> {
        AddItemRequest::new(
            product,
            "Test Product",
            Money::from_minor(minor, USD),
            "Black / M",
        )
    }

    #[test]
    fn add_item_appends_new_line() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 29_999))
            .expect("add should succeed");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.state(), CartState::NonEmpty);
    }

    #[test]
    fn add_item_merges_by_product_id() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 29_999))
            .expect("add should succeed");
        cart.add_item(request(key(1), 29_999).with_quantity(2))
            .expect("add should succeed");

        assert_eq!(cart.len(), 1);

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 3);
    }

    #[test]
    fn add_item_merges_even_across_variants() {
        // Line identity is the product alone; the variant label is a
        // display-only snapshot of the first add.
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 29_999))
            .expect("add should succeed");

        let other_variant = AddItemRequest::new(
            key(1),
            "Test Product",
            Money::from_minor(29_999, USD),
            "White / L",
        );

        cart.add_item(other_variant).expect("add should succeed");

        assert_eq!(cart.len(), 1);

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 2);
        assert_eq!(line.variant_label(), "Black / M");
    }

    #[test]
    fn add_item_clamps_zero_quantity_to_one() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100).with_quantity(0))
            .expect("add should succeed");

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn add_item_rejects_currency_mismatch() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_item(request(key(1), 100));

        match result {
            Err(CartError::CurrencyMismatch(item_currency, cart_currency)) => {
                assert_eq!(item_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_new_value() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.update_quantity(key(1), 5);

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 5);
    }

    #[test]
    fn update_quantity_clamps_to_one() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100).with_quantity(4))
            .expect("add should succeed");
        cart.update_quantity(key(1), 0);

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn update_quantity_on_unknown_product_is_noop() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.update_quantity(key(2), 7);

        assert_eq!(cart.len(), 1);

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn remove_item_deletes_line() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.remove_item(key(1));

        assert!(cart.is_empty());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.remove_item(key(1));
        cart.remove_item(key(1));

        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.add_item(request(key(2), 200))
            .expect("add should succeed");

        cart.clear();

        assert!(cart.lines().is_empty());
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn lines_preserve_insertion_order() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(3), 300))
            .expect("add should succeed");
        cart.add_item(request(key(1), 100))
            .expect("add should succeed");
        cart.add_item(request(key(2), 200))
            .expect("add should succeed");

        let minor: Vec<i64> = cart
            .lines()
            .iter()
            .map(|line| line.unit_price().to_minor_units())
            .collect();

        assert_eq!(minor, vec![300, 100, 200]);
    }

    #[test]
    fn total_quantity_sums_all_lines() {
        let mut cart = Cart::new(USD);

        cart.add_item(request(key(1), 100).with_quantity(2))
            .expect("add should succeed");
        cart.add_item(request(key(2), 200).with_quantity(3))
            .expect("add should succeed");

        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn snapshot_carries_denormalized_fields() {
        let mut cart = Cart::new(USD);

        let request = AddItemRequest::new(
            key(1),
            "Quantum Neural Headset",
            Money::from_minor(29_999, USD),
            "Obsidian / One Size",
        )
        .with_image("/products/quantum-headphones.png");

        cart.add_item(request).expect("add should succeed");

        let line = cart.line(key(1)).expect("line should exist");

        assert_eq!(line.name(), "Quantum Neural Headset");
        assert_eq!(line.variant_label(), "Obsidian / One Size");
        assert_eq!(line.image(), Some("/products/quantum-headphones.png"));
        assert_eq!(line.unit_price(), &Money::from_minor(29_999, USD));
        assert_eq!(line.product(), key(1));
    }
}
