//! Asynchronous record reader with batch interface
//!
//! Provides batch reading of parse outcomes from a pipe-delimited sales
//! source for the async processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async configured as a plain `|` splitter, matching [`SyncReader`](super::SyncReader)
//! - The record_format module for conversion, so both readers yield
//!   identical outcomes for identical input
//!
//! ```text
//! Async source → AsyncReader → Batches of LineOutcomes
//!                    ↓
//!           record_format module
//!           (convert_record)
//! ```

use crate::core::parser::FIELD_SEPARATOR;
use crate::io::record_format::{convert_record, LineOutcome, HEADER_LINE};
use crate::types::AnalyticsError;
use csv_async::{AsyncReaderBuilder, ByteRecord};
use futures::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Asynchronous pipe-delimited reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<BufReader<R>>,
    record: ByteRecord,
}

impl<R: AsyncRead + Unpin + Send> AsyncReader<R> {
    /// Create a new AsyncReader, consuming the first physical line as the header
    ///
    /// # Errors
    ///
    /// Returns an error if the header line cannot be read.
    pub async fn new(reader: R) -> Result<Self, AnalyticsError> {
        let mut source = BufReader::new(reader);
        source.read_until(b'\n', &mut Vec::new()).await?;

        let csv_reader = AsyncReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .create_reader(source);

        Ok(Self {
            csv_reader,
            record: ByteRecord::new(),
        })
    }

    /// Read up to `batch_size` non-blank records
    ///
    /// Returns an empty vector once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails.
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Vec<LineOutcome>, AnalyticsError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let more = self
                .csv_reader
                .read_byte_record(&mut self.record)
                .await
                .map_err(|e| AnalyticsError::ParseError {
                    line: None,
                    message: e.to_string(),
                })?;
            if !more {
                break;
            }

            let line = self.record.position().map_or(0, |pos| pos.line()) + HEADER_LINE;
            if let Some(outcome) = convert_record(self.record.iter()) {
                batch.push(LineOutcome { line, outcome });
            }
        }

        Ok(batch)
    }
}
