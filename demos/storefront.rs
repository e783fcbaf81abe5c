//! Storefront Demo
//!
//! Walks one session end to end: load the catalog fixture, browse a
//! filtered listing, fill a cart, print the order summary, and submit the
//! simulated checkout.
//!
//! Use `-f` to load a catalog fixture set by name
//! Use `-c` to restrict the listing to one category
//! Use `--instant` to skip the simulated processing delay

use std::{io, time::Duration};

use anyhow::Result;
use clap::Parser;

use vitrine::{
    checkout::{Checkout, CheckoutForm, NoDelay, ShippingMethod, SleepDelay},
    filters::{ProductFilter, SortOrder, apply},
    fixtures::Fixture,
    format::format_amount,
    session::Session,
    summary::OrderSummary,
    utils::DemoArgs,
};

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Demo program output to user")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let catalog = Fixture::new().load_catalog(&args.fixture)?;
    let mut session = Session::new(catalog)?;

    let mut filter = ProductFilter::new();

    if let Some(category) = args.category.as_deref() {
        filter = filter.with_category(category);
    }

    let listing = apply(session.catalog(), &filter, SortOrder::PriceAscending);

    println!("\nListing ({} products):", listing.len());

    for &key in &listing {
        if let Some(product) = session.catalog().get(key) {
            println!(
                "  {:<28} {:>10}  [{}]",
                product.name,
                format_amount(&product.price),
                product.category
            );
        }
    }

    // Put the two cheapest listed products in the cart, one of them twice.
    for (pick, &key) in listing.iter().take(2).enumerate() {
        let Some(product) = session.catalog().get(key) else {
            continue;
        };

        let variant = match (product.colors.first(), product.sizes.first()) {
            (Some(color), Some(size)) => product.variant_label(color, size),
            _ => "Default".to_string(),
        };

        let name = product.name.clone();
        let quantity = if pick == 0 { 2 } else { 1 };

        if let Some(id) = session.catalog().id_of(key).map(str::to_string) {
            session.add_to_cart(&id, variant, quantity)?;
            println!("Added {quantity} x {name} to cart.");
        }
    }

    let summary = OrderSummary::from_cart(session.cart())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle)?;

    drop(handle);

    let form = demo_form();

    let confirmation = if args.instant {
        let checkout = Session::default_checkout(NoDelay);
        session.checkout(&checkout, &form)?
    } else {
        let checkout = Checkout::new(SleepDelay, Duration::from_secs(2));
        session.checkout(&checkout, &form)?
    };

    println!("{confirmation}");

    Ok(())
}

fn demo_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Nova".to_string(),
        last_name: "Shopper".to_string(),
        address: "42 Market Street".to_string(),
        city: "Springfield".to_string(),
        state: "OR".to_string(),
        postal_code: "97477".to_string(),
        country: "USA".to_string(),
        email: "shopper@example.com".to_string(),
        phone: "+1 555 0199".to_string(),
        shipping_method: ShippingMethod::Standard,
    }
}
