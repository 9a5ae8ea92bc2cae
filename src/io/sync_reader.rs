//! Synchronous record reader with iterator interface
//!
//! Provides a streaming iterator over parse outcomes from a pipe-delimited
//! sales file. Record conversion is delegated to the record_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader configured as a plain `|` splitter (no
//! quoting, variable field counts) so that every line reaches the parser
//! with its fields untouched. The first physical line is the header and is
//! always skipped, even when it is blank. Other blank lines are skipped
//! silently.
//!
//! ```no_run
//! use rust_sales_analytics::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("sales_data.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("line {}: {:?}", record.line, record.outcome),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()` or
//!   yielded as `Err` by the iterator
//! - Malformed lines are not errors; they are yielded as
//!   [`ParseOutcome::Malformed`](crate::types::ParseOutcome::Malformed)

use crate::core::parser::FIELD_SEPARATOR;
use crate::io::record_format::{convert_record, LineOutcome, HEADER_LINE};
use crate::types::AnalyticsError;
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Synchronous pipe-delimited reader
///
/// Reads one line at a time; memory usage does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<BufReader<File>>,
    record: ByteRecord,
}

impl SyncReader {
    /// Open a sales file for streaming iteration
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::FileNotFound`] when the path does not exist
    /// and [`AnalyticsError::IoError`] for other open or header read failures.
    pub fn new(path: &Path) -> Result<Self, AnalyticsError> {
        let file = File::open(path).map_err(|e| AnalyticsError::open_failed(path, e))?;

        let mut source = BufReader::new(file);
        source.read_until(b'\n', &mut Vec::new())?;

        let reader = ReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Ok(Self {
            reader,
            record: ByteRecord::new(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LineOutcome, AnalyticsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_byte_record(&mut self.record) {
                Ok(false) => return None,
                Ok(true) => {
                    let line = self.record.position().map_or(0, |pos| pos.line()) + HEADER_LINE;
                    if let Some(outcome) = convert_record(self.record.iter()) {
                        return Some(Ok(LineOutcome { line, outcome }));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
