//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Sales records, enriched records and catalog entries
//! - `aggregate`: Result structures of validation and aggregation
//! - `outcome`: Per-record parse and validation outcomes
//! - `error`: Error types for operational failures

pub mod aggregate;
pub mod error;
pub mod outcome;
pub mod transaction;

pub use aggregate::{
    CustomerSummary, DailySales, EnrichmentSummary, PeakDay, ProductSales, RegionSales,
    SalesAnalysis, ValidationSummary,
};
pub use error::AnalyticsError;
pub use outcome::{InvalidReason, MalformedReason, ParseOutcome, RecordOutcome};
pub use transaction::{CatalogEntry, EnrichedTransaction, ProductNumber, Transaction};
