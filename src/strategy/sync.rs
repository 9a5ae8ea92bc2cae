//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It streams outcomes from the `SyncReader`, checks
//! each parsed candidate as it arrives, and folds the outcomes into a
//! `ValidationReport` once the file is exhausted.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Line splitting and parsing to `SyncReader` (iterator interface)
//! - Record rules to `validator::check_record`
//! - Filtering and counting to `ValidationReport::from_outcomes`

use crate::core::validator::{check_record, FilterOptions, ValidationReport};
use crate::io::record_format::{LineOutcome, ParseStats};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{log_counts, log_invalid, log_malformed, PipelineResult, ProcessingStrategy};
use crate::types::{AnalyticsError, ParseOutcome, RecordOutcome};
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_sales_analytics::core::FilterOptions;
/// use rust_sales_analytics::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let result = SyncProcessingStrategy
///     .process(Path::new("sales_data.txt"), &FilterOptions::default())
///     .expect("Processing failed");
/// println!("{} valid records", result.validation.valid.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        filter: &FilterOptions,
    ) -> Result<PipelineResult, AnalyticsError> {
        let reader = SyncReader::new(input_path)?;

        let mut stats = ParseStats::default();
        let mut outcomes = Vec::new();

        for result in reader {
            let LineOutcome { line, outcome } = result?;
            stats.record(&outcome);

            match outcome {
                ParseOutcome::Parsed(tx) => {
                    let checked = check_record(tx);
                    if let RecordOutcome::Invalid(tx, reason) = &checked {
                        log_invalid(line, tx, *reason);
                    }
                    outcomes.push(checked);
                }
                ParseOutcome::Malformed(reason) => log_malformed(line, &reason),
            }
        }

        let validation = ValidationReport::from_outcomes(outcomes, filter);
        log_counts(&stats, &validation);

        Ok(PipelineResult { stats, validation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region\n";

    /// Helper function to create a temporary sales file for testing
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_strategy_processes_valid_record() {
        let file = create_temp_file(&format!(
            "{}T1|2024-01-01|P10|Widget|5|100|C1|North\n",
            HEADER
        ));

        let result = SyncProcessingStrategy
            .process(file.path(), &FilterOptions::default())
            .unwrap();

        assert_eq!(result.stats.parsed, 1);
        assert_eq!(result.validation.valid.len(), 1);
        assert_eq!(result.validation.valid[0].unit_price, Decimal::from(100));
    }

    #[test]
    fn test_sync_strategy_counts_malformed_and_invalid() {
        let file = create_temp_file(&format!(
            "{}T1|2024-01-01|P10|Widget|5|100|C1|North\n\
             T2|2024-01-01|P20|Gadget|0|50|C2|South\n\
             T3|2024-01-01|P30|Gizmo|abc|50|C2|South\n\
             \n\
             X4|2024-01-02|P40|Doohickey|1|10|C3|East\n",
            HEADER
        ));

        let result = SyncProcessingStrategy
            .process(file.path(), &FilterOptions::default())
            .unwrap();

        assert_eq!(
            result.stats,
            ParseStats {
                records: 4,
                parsed: 3,
                malformed: 1,
            }
        );
        assert_eq!(result.validation.summary.total_input, 3);
        assert_eq!(result.validation.invalid_count, 2);
        assert_eq!(result.validation.valid[0].transaction_id, "T1");
    }

    #[test]
    fn test_sync_strategy_applies_filters() {
        let file = create_temp_file(&format!(
            "{}T1|2024-01-01|P10|Widget|5|100|C1|North\n\
             T2|2024-01-01|P20|Gadget|1|50|C2|South\n",
            HEADER
        ));
        let filter = FilterOptions::new(Some("South".to_string()), None, None).unwrap();

        let result = SyncProcessingStrategy.process(file.path(), &filter).unwrap();

        assert_eq!(result.validation.summary.filtered_by_region, 1);
        assert_eq!(result.validation.valid[0].transaction_id, "T2");
        assert_eq!(result.validation.regions, vec!["North", "South"]);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let result =
            SyncProcessingStrategy.process(Path::new("nonexistent.txt"), &FilterOptions::default());
        assert!(matches!(result, Err(AnalyticsError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
