//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::FixtureError,
    products::{ColorVariant, Product},
};

/// Wrapper for catalog entries in YAML. Entries are a sequence so the file
/// order survives parsing.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Catalog entries in featured order.
    pub catalog: Vec<ProductFixture>,
}

/// Colour variant fixture
#[derive(Debug, Deserialize)]
pub struct ColorFixture {
    /// Stable variant id
    pub id: String,

    /// Display name
    pub name: String,

    /// CSS swatch value
    pub swatch: String,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Stable string id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "299.99 USD")
    pub price: String,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Category label
    pub category: String,

    /// Colour variants
    #[serde(default)]
    pub colors: Vec<ColorFixture>,

    /// Size labels
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Average review rating
    pub rating: f32,

    /// Number of reviews
    pub review_count: u32,

    /// New-arrival flag
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let colors: SmallVec<[ColorVariant; 4]> = fixture
            .colors
            .into_iter()
            .map(|color| ColorVariant {
                id: color.id,
                name: color.name,
                swatch: color.swatch,
            })
            .collect();

        Ok(Product {
            name: fixture.name,
            price,
            images: fixture.images.into_iter().collect(),
            category: fixture.category,
            colors,
            sizes: fixture.sizes.into_iter().collect(),
            rating: fixture.rating,
            review_count: fixture.review_count,
            is_new: fixture.is_new,
        })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
