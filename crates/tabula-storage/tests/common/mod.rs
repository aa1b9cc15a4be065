//! Common helpers for row store integration tests.

use tabula_core::Schema;
use tabula_storage::RowStore;
use tempfile::TempDir;

/// A store over a fresh temporary directory.
///
/// The directory lives as long as the harness.
pub struct StoreHarness {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// Store under test
    pub store: RowStore,
}

impl StoreHarness {
    /// Harness with the default product schema.
    pub fn new() -> Self {
        Self::with_schema(Schema::default())
    }

    /// Harness with a custom schema.
    pub fn with_schema(schema: Schema) -> Self {
        let dir = TempDir::new().unwrap();
        let store = RowStore::new(dir.path().join("data_bootstrap.csv"), schema);
        Self { dir, store }
    }

    /// Raw file content.
    pub fn content(&self) -> String {
        std::fs::read_to_string(self.store.path()).unwrap_or_default()
    }
}

impl Default for StoreHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A product submission as `(field, value)` pairs.
pub fn product(name: &str, price: &str, region: &str) -> Vec<(String, String)> {
    vec![
        ("Produkt".to_string(), name.to_string()),
        ("Preis".to_string(), price.to_string()),
        ("Region".to_string(), region.to_string()),
    ]
}
