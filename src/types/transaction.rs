//! Transaction-related types for the sales analytics pipeline
//!
//! This module defines the fixed-shape sales record produced by the parser,
//! the enriched record produced by the catalog join, and the catalog entry
//! supplied by the product lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric product identifier used by the product catalog
///
/// Extracted from the digit run embedded in a `ProductID` such as `P042`.
pub type ProductNumber = u32;

/// A single sales transaction
///
/// Field order matches the pipe-delimited input record:
/// `TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region`.
///
/// Revenue is never stored; use [`Transaction::line_revenue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Transaction identifier, expected to start with `T`
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,

    /// Calendar date as written in the input (no timezone)
    #[serde(rename = "Date")]
    pub date: String,

    /// Product identifier, expected to start with `P`
    #[serde(rename = "ProductID")]
    pub product_id: String,

    /// Product display name with commas stripped
    #[serde(rename = "ProductName")]
    pub product_name: String,

    /// Units sold
    #[serde(rename = "Quantity")]
    pub quantity: i64,

    /// Price per unit
    #[serde(rename = "UnitPrice")]
    pub unit_price: Decimal,

    /// Customer identifier, expected to start with `C`
    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    /// Sales region
    #[serde(rename = "Region")]
    pub region: String,
}

impl Transaction {
    /// Revenue of this line: `quantity × unit_price`
    ///
    /// The parser rejects records whose product is not representable, so
    /// saturation only applies to hand-built values.
    pub fn line_revenue(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// Product metadata supplied by the external catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub rating: f64,
}

/// A validated transaction joined with catalog metadata
///
/// The three `api_*` fields are `None` whenever `api_match` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(rename = "API_Category")]
    pub api_category: Option<String>,

    #[serde(rename = "API_Brand")]
    pub api_brand: Option<String>,

    #[serde(rename = "API_Rating")]
    pub api_rating: Option<f64>,

    #[serde(rename = "API_Match")]
    pub api_match: bool,
}
