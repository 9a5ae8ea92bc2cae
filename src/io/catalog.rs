//! Product catalog loading
//!
//! Reads a product catalog that was already fetched from the catalog API and
//! saved as JSON. Both the API's response envelope and a bare product array
//! are accepted:
//!
//! ```json
//! {"products": [{"id": 7, "title": "Essence Mascara", "category": "beauty",
//!                "brand": "Essence", "rating": 4.94}]}
//! ```
//!
//! Unknown product fields are ignored. When an id appears twice the first
//! entry wins.

use crate::types::{AnalyticsError, CatalogEntry, ProductNumber};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogProduct {
    id: ProductNumber,
    #[serde(flatten)]
    entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Envelope { products: Vec<CatalogProduct> },
    Products(Vec<CatalogProduct>),
}

/// Parse a catalog JSON document into a lookup map
pub fn parse_catalog(json: &str) -> Result<HashMap<ProductNumber, CatalogEntry>, AnalyticsError> {
    let document: CatalogDocument = serde_json::from_str(json).map_err(|e| {
        AnalyticsError::catalog(format!("Unrecognised catalog document: {}", e))
    })?;

    let products = match document {
        CatalogDocument::Envelope { products } | CatalogDocument::Products(products) => products,
    };

    let mut catalog = HashMap::with_capacity(products.len());
    for product in products {
        catalog.entry(product.id).or_insert(product.entry);
    }

    Ok(catalog)
}

/// Load a catalog JSON file into a lookup map
pub fn load_catalog(path: &Path) -> Result<HashMap<ProductNumber, CatalogEntry>, AnalyticsError> {
    let json = fs::read_to_string(path).map_err(|e| AnalyticsError::open_failed(path, e))?;
    parse_catalog(&json)
}
