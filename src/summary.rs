//! Order Summary
//!
//! Terminal rendering for the cart and checkout summary surfaces. All
//! totals come from [`crate::pricing::compute_breakdown`], so every surface
//! that prints a summary shows identical numbers.

use std::{fmt::Write as _, io};

use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    format::format_amount,
    pricing::{PriceBreakdown, PricingError, compute_breakdown, line_total},
};

/// Errors that can occur when rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error computing totals for the summary.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A priced snapshot of the cart, ready to render.
#[derive(Debug)]
pub struct OrderSummary<'a> {
    lines: &'a [CartLine<'a>],
    breakdown: PriceBreakdown<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Price the cart's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if the totals cannot be computed.
    pub fn from_cart(cart: &'a Cart<'a>) -> Result<Self, SummaryError> {
        let breakdown = compute_breakdown(cart.lines(), cart.currency())?;

        Ok(OrderSummary {
            lines: cart.lines(),
            breakdown,
        })
    }

    /// The totals this summary was priced at.
    #[must_use]
    pub fn breakdown(&self) -> &PriceBreakdown<'a> {
        &self.breakdown
    }

    /// Render the summary table and totals.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if a line total cannot be computed or the
    /// writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Variant", "Qty", "Unit Price", "Line Total"]);

        let mut row_boundaries: SmallVec<[usize; 16]> = smallvec![];

        for (idx, line) in self.lines.iter().enumerate() {
            let total = line_total(line)?;

            row_boundaries.push(idx + 1);

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name().to_string(),
                line.variant_label().to_string(),
                line.quantity().to_string(),
                format_amount(line.unit_price()),
                format_amount(&total),
            ]);
        }

        write_summary_table(&mut out, builder, &row_boundaries)?;
        write_totals(&mut out, &self.breakdown)?;

        Ok(())
    }
}

fn write_summary_table(
    out: &mut impl io::Write,
    builder: Builder,
    row_boundaries: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in row_boundaries {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| SummaryError::IO)
}

fn write_totals(
    out: &mut impl io::Write,
    breakdown: &PriceBreakdown<'_>,
) -> Result<(), SummaryError> {
    let subtotal_label = " Subtotal:";
    let shipping_label = " Shipping:";
    let tax_label = " Tax:";
    let total_label = " \x1b[1mTotal:\x1b[0m";

    let subtotal_val = format!("{}  ", format_amount(&breakdown.subtotal));
    let shipping_val = format!("{}  ", format_amount(&breakdown.shipping));
    let tax_val = format!("{}  ", format_amount(&breakdown.tax));
    let total_val = format!("{}  ", format_amount(&breakdown.total));

    let label_width = visible_width(subtotal_label)
        .max(visible_width(shipping_label))
        .max(visible_width(tax_label))
        .max(visible_width(total_label));

    let value_width = subtotal_val
        .len()
        .max(shipping_val.len())
        .max(tax_val.len())
        .max(total_val.len());

    write_summary_line(out, subtotal_label, &subtotal_val, label_width, value_width)?;
    write_summary_line(out, shipping_label, &shipping_val, label_width, value_width)?;
    write_summary_line(out, tax_label, &tax_val, label_width, value_width)?;

    write_summary_line(
        out,
        total_label,
        &format!("\x1b[1m{total_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    writeln!(out).map_err(|_err| SummaryError::IO)
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F. This
/// function scans each character, grouping consecutive border characters and
/// emitting a single grey escape sequence around each run, leaving cell
/// content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), SummaryError> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    // 2 chars of spacing between label and value column.
    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| SummaryError::IO)
}
