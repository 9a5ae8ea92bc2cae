use crate::core::aggregation::{AnalysisConfig, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_TOP_N};
use crate::core::validator::FilterOptions;
use crate::strategy::BatchConfig;
use crate::types::AnalyticsError;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Validate, filter and analyse pipe-delimited sales records
#[derive(Parser, Debug)]
#[command(name = "sales-analytics")]
#[command(about = "Validate, filter and analyse pipe-delimited sales records", long_about = None)]
pub struct CliArgs {
    /// Input file path containing sales records
    #[arg(value_name = "INPUT", help = "Path to the pipe-delimited sales file")]
    pub input_file: PathBuf,

    /// Keep only records from this region (exact match)
    #[arg(long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// Keep only records whose line revenue is at least this amount
    #[arg(long = "min-amount", value_name = "AMOUNT")]
    pub min_amount: Option<Decimal>,

    /// Keep only records whose line revenue is at most this amount
    #[arg(long = "max-amount", value_name = "AMOUNT")]
    pub max_amount: Option<Decimal>,

    /// Number of products in the top-products ranking
    #[arg(long = "top-n", value_name = "N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Quantity below which a product is reported as a low performer
    #[arg(long = "low-threshold", value_name = "QUANTITY", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_threshold: i64,

    /// Product catalog JSON used for enrichment
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Write enriched records to this file (requires --catalog)
    #[arg(long = "enriched-output", value_name = "PATH", requires = "catalog")]
    pub enriched_output: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Processing strategy to use for reading and validating records
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for batched parallel validation"
    )]
    pub strategy: StrategyType,

    /// Number of records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent validation tasks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of chunks validated concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values use the defaults; zero values fall back to the
    /// defaults with a logged warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the record filters from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] when `--min-amount` is
    /// greater than `--max-amount`.
    pub fn to_filter_options(&self) -> Result<FilterOptions, AnalyticsError> {
        FilterOptions::new(self.region.clone(), self.min_amount, self.max_amount)
    }

    /// Create the aggregation tunables from CLI arguments
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            top_n: self.top_n,
            low_stock_threshold: self.low_threshold,
        }
    }
}
