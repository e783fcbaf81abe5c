//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddItemRequest, Cart, CartError, CartLine, CartState},
    catalog::{Catalog, CatalogError},
    checkout::{
        Checkout, CheckoutError, CheckoutForm, NoDelay, OrderConfirmation, ProcessingDelay,
        ShippingMethod, SleepDelay,
    },
    filters::{PriceRange, ProductFilter, SortOrder},
    fixtures::{Fixture, FixtureError},
    format::{format_amount, format_minor},
    pricing::{PriceBreakdown, PricingError, compute_breakdown, line_total},
    products::{ColorVariant, Product, ProductKey},
    session::{Session, SessionError},
    summary::{OrderSummary, SummaryError},
};
