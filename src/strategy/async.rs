//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. The file is read in batches; the candidates of
//! each batch are split into chunks that are checked in parallel.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch reading over tokio::fs)
//!     └── check_batch (one tokio task per chunk)
//!             ↓
//!     ValidationReport::from_outcomes (filters + counts, in input order)
//! ```
//!
//! # Ordering
//!
//! Batches are read one after another and chunk tasks are awaited in the
//! order they were spawned, so the outcomes reach the validation fold in
//! input order. The resulting report is identical to the sync strategy's.

use crate::core::validator::{check_record, FilterOptions, ValidationReport};
use crate::io::async_reader::AsyncReader;
use crate::io::record_format::{LineOutcome, ParseStats};
use crate::strategy::{log_counts, log_invalid, log_malformed, PipelineResult, ProcessingStrategy};
use crate::types::{AnalyticsError, ParseOutcome, RecordOutcome, Transaction};
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::warn;

/// Configuration for batch processing
///
/// Controls how many records are read per batch and how many worker
/// threads check each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of records per batch
    pub batch_size: usize,
    /// Maximum number of chunks checked concurrently (also the worker thread count)
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Thread Safety
///
/// AsyncProcessingStrategy is Send + Sync. Chunk tasks own their candidates,
/// so no state is shared between worker threads.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Check one batch of candidates on up to `max_concurrent_batches` tasks
    ///
    /// Returns the checked outcomes in the order of `candidates`.
    async fn check_batch(
        &self,
        candidates: Vec<(u64, Transaction)>,
    ) -> Result<Vec<(u64, RecordOutcome)>, AnalyticsError> {
        let chunk_size = candidates
            .len()
            .div_ceil(self.config.max_concurrent_batches)
            .max(1);

        let mut tasks = Vec::new();
        let mut remaining = candidates.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<(u64, Transaction)> = remaining.by_ref().take(chunk_size).collect();
            tasks.push(tokio::spawn(async move {
                chunk
                    .into_iter()
                    .map(|(line, tx)| (line, check_record(tx)))
                    .collect::<Vec<_>>()
            }));
        }

        let mut checked = Vec::new();
        for task in tasks {
            let results = task
                .await
                .map_err(|e| AnalyticsError::runtime(format!("Validation task failed: {}", e)))?;
            checked.extend(results);
        }

        Ok(checked)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        filter: &FilterOptions,
    ) -> Result<PipelineResult, AnalyticsError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| AnalyticsError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| AnalyticsError::open_failed(input_path, e))?;

            let mut reader = AsyncReader::new(file.compat()).await?;
            let mut stats = ParseStats::default();
            let mut outcomes = Vec::new();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                let mut candidates = Vec::with_capacity(batch.len());
                for LineOutcome { line, outcome } in batch {
                    stats.record(&outcome);
                    match outcome {
                        ParseOutcome::Parsed(tx) => candidates.push((line, tx)),
                        ParseOutcome::Malformed(reason) => log_malformed(line, &reason),
                    }
                }

                for (line, checked) in self.check_batch(candidates).await? {
                    if let RecordOutcome::Invalid(tx, reason) = &checked {
                        log_invalid(line, tx, *reason);
                    }
                    outcomes.push(checked);
                }
            }

            let validation = ValidationReport::from_outcomes(outcomes, filter);
            log_counts(&stats, &validation);

            Ok(PipelineResult { stats, validation })
        })
    }
}
