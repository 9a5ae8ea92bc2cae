//! Core analytics module
//!
//! This module contains the pure, I/O-free components of the pipeline:
//! - `parser` - Pipe-delimited lines into transaction candidates
//! - `validator` - Record rules, region/amount filters and the validation summary
//! - `aggregation` - Revenue, ranking and trend views over a validated set
//! - `enrichment` - Product catalog join
//! - `traits` - The catalog lookup abstraction used by the joiner

pub mod aggregation;
pub mod enrichment;
pub mod parser;
pub mod traits;
pub mod validator;

pub use aggregation::AnalysisConfig;
pub use enrichment::{enrich_transactions, extract_product_number};
pub use parser::{parse_fields, parse_line, parse_lines};
pub use traits::ProductCatalog;
pub use validator::{validate_and_filter, FilterOptions, ValidationReport};
