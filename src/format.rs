//! Formatting
//!
//! Display-time money formatting. This is the only place amounts are
//! rounded; everything upstream stays in full decimal precision.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

/// Format a money amount for display, rounded to two decimal places with
/// midpoints away from zero.
#[must_use]
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    let rounded = money
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let minor_units = rounded
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.to_i64())
        .unwrap_or(0);

    format_minor(minor_units, money.currency().iso_alpha_code)
}

/// Format a minor-unit amount into a currency string.
#[must_use]
pub fn format_minor(minor_units: i64, currency_code: &str) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };
    let symbol = match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}.{fractional:02} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}
