//! Session
//!
//! The single owned store object for one browsing session. Surfaces receive
//! a reference to the session instead of reaching into ambient state; it is
//! created at session start and torn down (dropping the cart) at session
//! end.

use std::time::Duration;

use thiserror::Error;

use crate::{
    cart::{AddItemRequest, Cart, CartError},
    catalog::{Catalog, CatalogError},
    checkout::{Checkout, CheckoutError, CheckoutForm, OrderConfirmation, ProcessingDelay},
    pricing::{PriceBreakdown, PricingError, compute_breakdown},
    products::ProductKey,
};

/// First order number handed out by a fresh session.
const FIRST_ORDER_NUMBER: u32 = 1_001;

/// Errors surfaced by session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Error looking up the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Error mutating the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Error computing totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error submitting the checkout.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// One browsing session: the catalog it reads and the cart it owns.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog<'static>,
    cart: Cart<'static>,
    next_order_number: u32,
}

impl Session {
    /// Start a session over a loaded catalog with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the catalog is empty (its currency is
    /// unknown, so a cart cannot be opened).
    pub fn new(catalog: Catalog<'static>) -> Result<Self, SessionError> {
        let currency = catalog.currency()?;

        Ok(Session {
            catalog,
            cart: Cart::new(currency),
            next_order_number: FIRST_ORDER_NUMBER,
        })
    }

    /// The catalog this session browses.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// The session cart, read-only.
    #[must_use]
    pub fn cart(&self) -> &Cart<'static> {
        &self.cart
    }

    /// The session cart, for direct mutation through its operations.
    pub fn cart_mut(&mut self) -> &mut Cart<'static> {
        &mut self.cart
    }

    /// Add a catalog product to the cart, snapshotting its display fields at
    /// add time.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the product id is unknown.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        variant_label: impl Into<String>,
        quantity: u32,
    ) -> Result<ProductKey, SessionError> {
        let key = self.catalog.key_of(product_id)?;
        let product = self.catalog.by_id(product_id)?;

        let mut request = AddItemRequest::new(
            key,
            product.name.clone(),
            product.price,
            variant_label,
        )
        .with_quantity(quantity);

        if let Some(image) = product.primary_image() {
            request = request.with_image(image);
        }

        self.cart.add_item(request)?;

        Ok(key)
    }

    /// Price the cart's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the totals cannot be computed.
    pub fn breakdown(&self) -> Result<PriceBreakdown<'static>, SessionError> {
        Ok(compute_breakdown(self.cart.lines(), self.cart.currency())?)
    }

    /// Submit the checkout for the current cart, clearing it on success.
    ///
    /// Order references are sequential within the session.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the submission fails; the cart and the
    /// order sequence are left untouched.
    pub fn checkout<D: ProcessingDelay>(
        &mut self,
        checkout: &Checkout<D>,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation<'static>, SessionError> {
        let reference = format!("VTR-{}", self.next_order_number);

        let confirmation = checkout.submit(&mut self.cart, form, reference)?;

        self.next_order_number += 1;

        Ok(confirmation)
    }

    /// Convenience constructor for a checkout coordinator matching the
    /// storefront's simulated processing window.
    #[must_use]
    pub fn default_checkout<D: ProcessingDelay>(delay: D) -> Checkout<D> {
        Checkout::new(delay, Duration::from_secs(2))
    }
}
