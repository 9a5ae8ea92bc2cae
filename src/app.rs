//! Command orchestration
//!
//! Wires one CLI invocation together: ingestion through the selected
//! strategy, the analysis views, optional catalog enrichment, and report
//! output.

use crate::cli::{CliArgs, OutputFormat, StrategyType};
use crate::core::enrichment::enrich_transactions;
use crate::io::{load_catalog, write_enriched_records, write_json_report, write_text_report, RunReport};
use crate::strategy::create_strategy;
use crate::types::{AnalyticsError, EnrichmentSummary, SalesAnalysis};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

/// Run the full analysis described by `args`, writing the report to `output`
///
/// # Errors
///
/// Returns an error for an invalid filter configuration, an unreadable
/// input or catalog file, or a failure while writing output.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), AnalyticsError> {
    let filter = args.to_filter_options()?;

    let config = if args.strategy == StrategyType::Async {
        Some(args.to_batch_config())
    } else {
        None
    };
    let strategy = create_strategy(args.strategy, config);

    let pipeline = strategy.process(&args.input_file, &filter)?;
    let transactions = &pipeline.validation.valid;

    let analysis = SalesAnalysis::compute(transactions, &args.to_analysis_config());

    let enrichment = match &args.catalog {
        Some(catalog_path) => {
            let catalog = load_catalog(catalog_path)?;
            info!("Loaded {} catalog products", catalog.len());

            let enriched = enrich_transactions(transactions, &catalog);
            let summary = EnrichmentSummary::from_records(&enriched);
            info!(
                "Enriched {}/{} records ({}%)",
                summary.matched, summary.total, summary.success_rate
            );

            if let Some(path) = &args.enriched_output {
                let file = File::create(path).map_err(|e| {
                    AnalyticsError::output(format!(
                        "Failed to create '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                write_enriched_records(&enriched, &mut BufWriter::new(file))?;
                info!("Enriched records written to {}", path.display());
            }

            Some(summary)
        }
        None => None,
    };

    let report = RunReport {
        generated_at: chrono::Local::now().naive_local(),
        validation: &pipeline.validation.summary,
        analysis: &analysis,
        enrichment: enrichment.as_ref(),
    };

    match args.format {
        OutputFormat::Text => write_text_report(&report, output),
        OutputFormat::Json => write_json_report(&report, output),
    }
}
