//! Sales Analytics CLI
//!
//! Command-line interface for validating, filtering and analysing
//! pipe-delimited sales records.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- sales_data.txt
//! cargo run -- --region North --min-amount 1000 sales_data.txt
//! cargo run -- --format json --output report.json sales_data.txt
//! cargo run -- --catalog products.json --enriched-output enriched.txt sales_data.txt
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 sales_data.txt
//! ```
//!
//! The report goes to stdout (or `--output`); logs go to stderr and are
//! controlled with `RUST_LOG` (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid arguments, file not found, file not readable, etc.)

use rust_sales_analytics::{app, cli};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .try_init();
}

fn main() {
    init_tracing();

    let args = cli::parse_args();

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error: Failed to create '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdout().lock()),
    };

    if let Err(e) = app::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
