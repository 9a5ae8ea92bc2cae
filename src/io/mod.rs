//! I/O module
//!
//! Handles sales file reading, catalog loading and output.
//!
//! # Components
//!
//! - `record_format` - Pipe-delimited record handling (record conversion, enriched output)
//! - `sync_reader` - Synchronous reader with iterator interface
//! - `async_reader` - Asynchronous reader with batch reading interface
//! - `catalog` - Product catalog JSON loading
//! - `report` - Text and JSON report rendering

pub mod async_reader;
pub mod catalog;
pub mod record_format;
pub mod report;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use catalog::{load_catalog, parse_catalog};
pub use record_format::{convert_record, write_enriched_records, LineOutcome, ParseStats};
pub use report::{format_money, write_json_report, write_text_report, RunReport};
pub use sync_reader::SyncReader;
