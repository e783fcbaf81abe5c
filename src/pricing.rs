//! Pricing
//!
//! The single breakdown implementation behind every surface that displays
//! totals. All arithmetic stays in decimal space; rounding happens only at
//! display time (see [`crate::format`]).

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Flat shipping surcharge in minor units, charged only on non-empty carts.
pub const SHIPPING_FLAT_MINOR: i64 = 1_000;

/// Flat tax rate applied to the subtotal.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.10)
}

/// Errors that can occur while computing a price breakdown.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line total could not be represented in decimal space.
    #[error("line total overflowed for quantity {0}")]
    LineTotalOverflow(u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The computed totals for a cart snapshot. Never stored; recomputed from
/// the lines on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown<'a> {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money<'a, Currency>,

    /// Flat shipping surcharge; zero for an empty cart.
    pub shipping: Money<'a, Currency>,

    /// Tax on the subtotal.
    pub tax: Money<'a, Currency>,

    /// Subtotal plus shipping plus tax.
    pub total: Money<'a, Currency>,
}

impl<'a> PriceBreakdown<'a> {
    /// An all-zero breakdown in the given currency.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        PriceBreakdown {
            subtotal: zero,
            shipping: zero,
            tax: zero,
            total: zero,
        }
    }
}

/// The total for a single line: unit price times quantity, in decimal space.
///
/// # Errors
///
/// Returns a `PricingError::LineTotalOverflow` if the multiplication cannot
/// be represented.
pub fn line_total<'a>(line: &CartLine<'a>) -> Result<Money<'a, Currency>, PricingError> {
    let amount = line
        .unit_price()
        .amount()
        .checked_mul(Decimal::from(line.quantity()))
        .ok_or(PricingError::LineTotalOverflow(line.quantity()))?;

    Ok(Money::from_decimal(amount, line.unit_price().currency()))
}

/// Compute the breakdown for a cart snapshot.
///
/// Pure over its inputs: the same lines in the same order always produce the
/// same breakdown, regardless of call site. An empty snapshot yields an
/// all-zero breakdown with no shipping charge.
///
/// # Errors
///
/// Returns a `PricingError` if a line total overflows or money arithmetic
/// fails (for example, due to currency mismatch between lines).
pub fn compute_breakdown<'a>(
    lines: &[CartLine<'a>],
    currency: &'static Currency,
) -> Result<PriceBreakdown<'a>, PricingError> {
    let subtotal = lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            line_total(line).and_then(|total| acc.add(total).map_err(PricingError::Money))
        })?;

    let shipping = if subtotal.amount().is_zero() {
        Money::from_minor(0, currency)
    } else {
        Money::from_minor(SHIPPING_FLAT_MINOR, currency)
    };

    let tax = Money::from_decimal(tax_rate() * *subtotal.amount(), currency);
    let total = subtotal.add(shipping)?.add(tax)?;

    Ok(PriceBreakdown {
        subtotal,
        shipping,
        tax,
        total,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use slotmap::KeyData;
    use testresult::TestResult;

    use crate::{
        cart::{AddItemRequest, Cart},
        products::ProductKey,
    };

    use super::*;

    fn key(n: u64) -> ProductKey {
        KeyData::from_ffi(n).into()
    }

    fn cart_with(entries: &[(u64, i64, u32)]) -> Cart<'static> {
        let mut cart = Cart::new(USD);

        for &(id, minor, quantity) in entries {
            let request = AddItemRequest::new(
                key(id),
                format!("Product {id}"),
                Money::from_minor(minor, USD),
                "Default",
            )
            .with_quantity(quantity);

            cart.add_item(request).expect("add should succeed");
        }

        cart
    }

    #[test]
    fn empty_snapshot_yields_all_zero_breakdown() -> TestResult {
        let breakdown = compute_breakdown(&[], USD)?;

        assert_eq!(breakdown, PriceBreakdown::zero(USD));

        Ok(())
    }

    #[test]
    fn single_line_breakdown_matches_cart_page_rules() -> TestResult {
        // 100.00 + 50.00, each qty 1: subtotal 150, shipping 10, tax 15,
        // total 175.
        let cart = cart_with(&[(1, 10_000, 1), (2, 5_000, 1)]);

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        assert_eq!(breakdown.subtotal, Money::from_minor(15_000, USD));
        assert_eq!(breakdown.shipping, Money::from_minor(1_000, USD));
        assert_eq!(breakdown.tax, Money::from_minor(1_500, USD));
        assert_eq!(breakdown.total, Money::from_minor(17_500, USD));

        Ok(())
    }

    #[test]
    fn merged_line_keeps_sub_cent_tax_precision() -> TestResult {
        // 299.99 twice merges into one line of qty 2. Tax is 59.998 exactly;
        // nothing rounds before display.
        let mut cart = cart_with(&[(1, 29_999, 1)]);

        cart.add_item(
            AddItemRequest::new(key(1), "Product 1", Money::from_minor(29_999, USD), "Default")
                .with_quantity(1),
        )?;

        assert_eq!(cart.len(), 1);

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        assert_eq!(breakdown.subtotal, Money::from_minor(59_998, USD));
        assert_eq!(breakdown.shipping, Money::from_minor(1_000, USD));
        assert_eq!(*breakdown.tax.amount(), Decimal::new(59_998, 3));
        assert_eq!(*breakdown.total.amount(), Decimal::new(669_978, 3));

        Ok(())
    }

    #[test]
    fn breakdown_is_pure_over_an_unchanged_snapshot() -> TestResult {
        let cart = cart_with(&[(1, 29_999, 2), (2, 8_999, 1)]);

        let first = compute_breakdown(cart.lines(), cart.currency())?;
        let second = compute_breakdown(cart.lines(), cart.currency())?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn shipping_is_waived_only_for_empty_carts() -> TestResult {
        let cart = cart_with(&[(1, 1, 1)]);

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        assert_eq!(breakdown.shipping, Money::from_minor(1_000, USD));

        let cleared = compute_breakdown(&[], USD)?;

        assert_eq!(cleared.shipping, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn cleared_cart_prices_to_zero() -> TestResult {
        let mut cart = cart_with(&[(1, 29_999, 2), (2, 8_999, 1)]);

        cart.clear();

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        assert_eq!(breakdown, PriceBreakdown::zero(USD));

        Ok(())
    }

    #[test]
    fn line_total_multiplies_unit_price_by_quantity() -> TestResult {
        let cart = cart_with(&[(1, 12_550, 3)]);
        let line = cart.line(key(1)).ok_or("line should exist")?;

        assert_eq!(line_total(line)?, Money::from_minor(37_650, USD));

        Ok(())
    }

    #[test]
    fn total_is_subtotal_plus_shipping_plus_tax() -> TestResult {
        let cart = cart_with(&[(1, 19_999, 2), (2, 45_999, 1), (3, 8_999, 4)]);

        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        let reconstructed = breakdown
            .subtotal
            .add(breakdown.shipping)?
            .add(breakdown.tax)?;

        assert_eq!(breakdown.total, reconstructed);

        Ok(())
    }
}
