//! Filters
//!
//! Typed filter and sort records for the product listing, replacing the
//! untyped filter objects that arrive from the browsing surface.

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    products::{Product, ProductKey},
};

/// An inclusive price window in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound in minor units.
    pub min_minor: i64,

    /// Upper bound in minor units.
    pub max_minor: i64,
}

impl PriceRange {
    /// Whether a price falls inside the window.
    #[must_use]
    pub fn contains(&self, price: &Money<'_, Currency>) -> bool {
        let minor = price.to_minor_units();

        minor >= self.min_minor && minor <= self.max_minor
    }
}

/// Listing sort orders, mirroring the storefront's sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,

    /// New arrivals first, catalog order within each group.
    Newest,

    /// Cheapest first.
    PriceAscending,

    /// Most expensive first.
    PriceDescending,
}

/// A closed set of listing filters. An empty selection matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    categories: FxHashSet<String>,
    colors: FxHashSet<String>,
    sizes: FxHashSet<String>,
    price_range: Option<PriceRange>,
}

impl ProductFilter {
    /// A filter that matches every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category label. Multiple calls widen the selection.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Restrict to a colour variant id. Multiple calls widen the selection.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    /// Restrict to a size label. Multiple calls widen the selection.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    /// Restrict to a price window.
    #[must_use]
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Whether a product passes every active restriction.
    #[must_use]
    pub fn matches(&self, product: &Product<'_>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if !self.colors.is_empty()
            && !product
                .colors
                .iter()
                .any(|color| self.colors.contains(&color.id))
        {
            return false;
        }

        if !self.sizes.is_empty() && !product.sizes.iter().any(|size| self.sizes.contains(size)) {
            return false;
        }

        if let Some(range) = self.price_range
            && !range.contains(&product.price)
        {
            return false;
        }

        true
    }
}

/// Apply a filter and sort order against the catalog, returning matching
/// product keys.
#[must_use]
pub fn apply<'a>(
    catalog: &'a Catalog<'a>,
    filter: &ProductFilter,
    sort: SortOrder,
) -> Vec<ProductKey> {
    let mut matches: Vec<(ProductKey, &Product<'a>)> = catalog
        .iter()
        .filter(|(_, product)| filter.matches(product))
        .collect();

    match sort {
        SortOrder::Featured => {}
        SortOrder::Newest => {
            matches.sort_by_key(|(_, product)| !product.is_new);
        }
        SortOrder::PriceAscending => {
            matches.sort_by_key(|(_, product)| product.price.to_minor_units());
        }
        SortOrder::PriceDescending => {
            matches.sort_by_key(|(_, product)| std::cmp::Reverse(product.price.to_minor_units()));
        }
    }

    matches.into_iter().map(|(key, _)| key).collect()
}
