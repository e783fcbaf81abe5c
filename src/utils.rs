//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Catalog fixture set to load
    #[clap(short, long, default_value = "nova")]
    pub fixture: String,

    /// Restrict the listing to one category
    #[clap(short, long)]
    pub category: Option<String>,

    /// Skip the simulated checkout processing delay
    #[clap(long)]
    pub instant: bool,
}
