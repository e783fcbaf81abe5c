//! Checkout
//!
//! The checkout boundary: form validation, the simulated processing delay
//! behind an injectable seam, and the clear-cart-on-success obligation.
//! Payment capture belongs to whatever gateway sits outside this crate.

use std::{
    fmt,
    thread,
    time::{Duration, Instant},
};

use humanize_duration::{Truncate, prelude::DurationExt};
use thiserror::Error;

use crate::{
    cart::Cart,
    format::format_amount,
    pricing::{PriceBreakdown, PricingError, compute_breakdown},
};

/// Errors that can occur while submitting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines to order.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A required form field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The email address is not plausibly deliverable.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Error computing the order totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Shipping options offered at checkout. Both ship on the same flat
/// surcharge; the choice is recorded for the confirmation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShippingMethod {
    /// 3-5 business days.
    #[default]
    Standard,

    /// 1-2 business days.
    Express,
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingMethod::Standard => write!(f, "Standard"),
            ShippingMethod::Express => write!(f, "Express"),
        }
    }
}

/// The shipping/contact step of the checkout form, validated as a closed
/// record at the boundary.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or province.
    pub state: String,

    /// Postal code.
    pub postal_code: String,

    /// Country.
    pub country: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,
}

impl CheckoutForm {
    /// Validate that every required field is filled and the email is
    /// plausible.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` naming the first failing field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required: [(&'static str, &str); 9] = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("postal code", &self.postal_code),
            ("country", &self.country),
            ("email", &self.email),
            ("phone", &self.phone),
        ];

        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(label));
            }
        }

        let Some((local, domain)) = self.email.split_once('@') else {
            return Err(CheckoutError::InvalidEmail(self.email.clone()));
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(CheckoutError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Seam for the simulated order-processing wait, so tests run with zero
/// latency while interactive surfaces keep their feedback pause.
pub trait ProcessingDelay {
    /// Block until the simulated processing window has elapsed.
    fn wait(&self, duration: Duration);
}

/// Sleeps for the full processing window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDelay;

impl ProcessingDelay for SleepDelay {
    fn wait(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately; the test and benchmark delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl ProcessingDelay for NoDelay {
    fn wait(&self, _duration: Duration) {}
}

/// Confirmation returned once an order has been accepted.
#[derive(Debug, Clone)]
pub struct OrderConfirmation<'a> {
    /// Human-facing order reference.
    pub reference: String,

    /// Number of units in the order.
    pub unit_count: u32,

    /// The priced totals the order was accepted at.
    pub breakdown: PriceBreakdown<'a>,

    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,

    /// How long the simulated processing took.
    pub processed_in: Duration,
}

impl fmt::Display for OrderConfirmation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {} confirmed: {} units, {} ({} shipping), processed in {}",
            self.reference,
            self.unit_count,
            format_amount(&self.breakdown.total),
            self.shipping_method,
            self.processed_in.human(Truncate::Nano),
        )
    }
}

/// Checkout coordinator: validates the form, prices the cart snapshot, runs
/// the simulated processing window, and clears the cart on success.
#[derive(Debug)]
pub struct Checkout<D: ProcessingDelay> {
    delay: D,
    processing_time: Duration,
}

impl<D: ProcessingDelay> Checkout<D> {
    /// Create a checkout coordinator with the given delay seam and
    /// processing window.
    pub fn new(delay: D, processing_time: Duration) -> Self {
        Checkout {
            delay,
            processing_time,
        }
    }

    /// Submit an order for the current cart contents.
    ///
    /// On success the cart is cleared; the confirmation carries the totals
    /// snapshot taken before clearing.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the cart is empty, the form fails
    /// validation, or the totals cannot be computed. The cart is left
    /// untouched on any error.
    pub fn submit<'a>(
        &self,
        cart: &mut Cart<'a>,
        form: &CheckoutForm,
        reference: impl Into<String>,
    ) -> Result<OrderConfirmation<'a>, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        form.validate()?;

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;
        let unit_count = cart.total_quantity();

        let start = Instant::now();

        self.delay.wait(self.processing_time);

        let processed_in = start.elapsed();

        cart.clear();

        Ok(OrderConfirmation {
            reference: reference.into(),
            unit_count,
            breakdown,
            shipping_method: form.shipping_method,
            processed_in,
        })
    }
}
