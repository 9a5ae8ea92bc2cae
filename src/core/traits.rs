//! Core traits
//!
//! The enrichment joiner only needs keyed lookups into an already-resolved
//! product catalog. This trait lets callers supply whatever map they built
//! from the catalog response.

use crate::types::{CatalogEntry, ProductNumber};
use std::collections::{BTreeMap, HashMap};

/// Read-only lookup from numeric product id to catalog metadata
pub trait ProductCatalog {
    /// Get the catalog entry for a product number
    fn lookup(&self, product: ProductNumber) -> Option<&CatalogEntry>;
}

impl ProductCatalog for HashMap<ProductNumber, CatalogEntry> {
    fn lookup(&self, product: ProductNumber) -> Option<&CatalogEntry> {
        self.get(&product)
    }
}

impl ProductCatalog for BTreeMap<ProductNumber, CatalogEntry> {
    fn lookup(&self, product: ProductNumber) -> Option<&CatalogEntry> {
        self.get(&product)
    }
}
