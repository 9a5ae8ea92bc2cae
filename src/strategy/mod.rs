//! Processing strategy module for the read → parse → validate pipeline
//!
//! This module defines the Strategy pattern for the complete ingestion
//! pipeline: reading the sales file, parsing each line, checking the record
//! rules and applying the filters. This allows different implementations
//! (synchronous, asynchronous batch) to be selected at runtime while producing
//! identical results.

use crate::cli::StrategyType;
use crate::core::validator::{FilterOptions, ValidationReport};
use crate::io::ParseStats;
use crate::types::{AnalyticsError, InvalidReason, MalformedReason, Transaction};
use std::path::Path;
use tracing::{debug, info};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Everything the ingestion pipeline learned about one input file
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub stats: ParseStats,
    pub validation: ValidationReport,
}

/// Processing strategy trait for the ingestion pipeline
///
/// Each strategy must read the pipe-delimited sales file, classify every
/// non-blank line, and fold the parsed candidates into a
/// [`ValidationReport`] using the given filters.
pub trait ProcessingStrategy: Send + Sync {
    /// Read, parse and validate the records of `input_path`
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input file containing sales records
    /// * `filter` - Region and amount filters applied after validation
    ///
    /// # Returns
    ///
    /// * `Ok(PipelineResult)` with parse counts and the validated set
    /// * `Err(AnalyticsError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading
    /// - The async runtime or one of its tasks fails
    ///
    /// Malformed lines and records that break a rule are logged at debug
    /// level and counted; they never cause this method to return an error.
    fn process(
        &self,
        input_path: &Path,
        filter: &FilterOptions,
    ) -> Result<PipelineResult, AnalyticsError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

fn log_malformed(line: u64, reason: &MalformedReason) {
    debug!(line, %reason, "Discarding malformed record");
}

fn log_invalid(line: u64, tx: &Transaction, reason: InvalidReason) {
    debug!(
        line,
        transaction_id = %tx.transaction_id,
        %reason,
        "Removing invalid record"
    );
}

fn log_counts(stats: &ParseStats, validation: &ValidationReport) {
    info!("Total records parsed: {}", stats.records);
    info!("Malformed records discarded: {}", stats.malformed);
    info!("Invalid records removed: {}", validation.invalid_count);
    info!("Valid records after cleaning: {}", validation.summary.final_count);
}
