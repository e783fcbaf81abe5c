//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to catalog construction or lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product's currency differs from the catalog currency.
    #[error("Product '{0}' has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Two products were registered under the same string id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// A product was not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No products loaded yet; currency unknown.
    #[error("Catalog is empty; currency unknown")]
    NoCurrency,
}

/// The read-only product catalog for a storefront session.
///
/// Products are stored behind [`ProductKey`]s with a string-id index for the
/// boundary where external catalog data enters the system. All products share
/// one currency, validated at insert time. Iteration preserves insertion
/// order, which doubles as the "featured" ordering.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    ids: FxHashMap<String, ProductKey>,
    order: Vec<ProductKey>,
    currency: Option<&'static Currency>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product under a stable string id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the id is already taken or the product's
    /// currency disagrees with the catalog currency.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        product: Product<'a>,
    ) -> Result<ProductKey, CatalogError>
    where
        'a: 'static,
    {
        let id = id.into();

        if self.ids.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }

        let product_currency = product.price.currency();

        if let Some(currency) = self.currency {
            if currency != product_currency {
                return Err(CatalogError::CurrencyMismatch(
                    id,
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        } else {
            self.currency = Some(product_currency);
        }

        let key = self.products.insert(product);

        self.ids.insert(id, key);
        self.order.push(key);

        Ok(key)
    }

    /// Look up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Look up a product key by its string id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if the id is unknown.
    pub fn key_of(&self, id: &str) -> Result<ProductKey, CatalogError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Look up a product by its string id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if the id is unknown.
    pub fn by_id(&self, id: &str) -> Result<&Product<'a>, CatalogError> {
        let key = self.key_of(id)?;

        self.products
            .get(key)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Reverse lookup of the string id a key was registered under.
    #[must_use]
    pub fn id_of(&self, key: ProductKey) -> Option<&str> {
        self.ids
            .iter()
            .find_map(|(id, &candidate)| (candidate == key).then_some(id.as_str()))
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.order
            .iter()
            .filter_map(|&key| self.products.get(key).map(|product| (key, product)))
    }

    /// Distinct category labels, sorted alphabetically.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .iter()
            .map(|(_, product)| product.category.clone())
            .collect();

        categories.sort();
        categories.dedup();

        categories
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::NoCurrency` before any product is loaded.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }
}
