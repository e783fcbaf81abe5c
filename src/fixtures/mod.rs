//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::catalog::Catalog;

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),
}

/// Fixture loader rooted at a base directory of YAML data files.
#[derive(Debug)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a catalog from a YAML fixture file under `catalog/`.
    ///
    /// Entries keep their file order, which becomes the catalog's featured
    /// ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// invalid, or the entries disagree on currency.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        catalog_from_yaml(&contents)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a catalog from YAML fixture content.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed, a price is invalid, or
/// the entries disagree on currency.
pub fn catalog_from_yaml(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: catalog::CatalogFixture = serde_norway::from_str(contents)?;

    let mut loaded = Catalog::new();

    for entry in fixture.catalog {
        let id = entry.id.clone();
        let product = entry.try_into()?;

        loaded.insert(id, product)?;
    }

    Ok(loaded)
}
