//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A selectable colour variant of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVariant {
    /// Stable variant id (e.g. "black").
    pub id: String,

    /// Display name (e.g. "Obsidian").
    pub name: String,

    /// CSS swatch value shown for the variant.
    pub swatch: String,
}

/// Product
///
/// Catalog records are immutable for the lifetime of the process; the cart
/// snapshots the fields it needs at add time rather than holding a live
/// reference.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Image references, first entry is the representative image
    pub images: SmallVec<[String; 4]>,

    /// Category label
    pub category: String,

    /// Available colour variants
    pub colors: SmallVec<[ColorVariant; 4]>,

    /// Available size labels
    pub sizes: SmallVec<[String; 6]>,

    /// Average review rating
    pub rating: f32,

    /// Number of reviews behind the rating
    pub review_count: u32,

    /// Whether the product is flagged as a new arrival
    pub is_new: bool,
}

impl Product<'_> {
    /// The representative image, if any images are present.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Label for a chosen colour/size combination, display-only.
    pub fn variant_label(&self, color: &ColorVariant, size: &str) -> String {
        format!("{} / {size}", color.name)
    }
}
