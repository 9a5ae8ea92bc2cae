//! Rust Sales Analytics Library
//! # Overview
//!
//! This library turns pipe-delimited sales records into a set of
//! internally-consistent analytical views, reading the input with either a
//! sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, aggregate views, outcomes, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Pure analytics components:
//!   - [`core::parser`] - Line splitting and numeric conversion
//!   - [`core::validator`] - Record rules, filters and the validation summary
//!   - [`core::aggregation`] - Revenue, ranking and trend views
//!   - [`core::enrichment`] - Product catalog join
//! - [`io`] - Readers, catalog loading, report and enriched-record writers
//! - [`strategy`] - Pluggable read → parse → validate pipelines
//! - [`app`] - Orchestration of a single CLI run
//!
//! # Record Lifecycle
//!
//! Every non-blank input line ends up in exactly one bucket:
//!
//! - **Malformed**: wrong field count or unparseable number; dropped and counted
//! - **Invalid**: parsed, but breaks a record rule; dropped and counted
//! - **Filtered out**: valid, but outside the region or amount filter
//! - **Analysed**: part of the final set every view is computed from
//!
//! # Revenue
//!
//! Line revenue is `Quantity × UnitPrice`, computed exactly. Total revenue
//! equals the sum of the per-region, per-product, per-customer and per-day
//! revenues of the same set.

pub mod app;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{validate_and_filter, AnalysisConfig, FilterOptions, ValidationReport};
pub use io::{load_catalog, write_enriched_records, write_json_report, write_text_report};
pub use types::{
    AnalyticsError, CatalogEntry, EnrichedTransaction, EnrichmentSummary, SalesAnalysis,
    Transaction, ValidationSummary,
};
