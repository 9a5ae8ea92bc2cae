//! Pipe-delimited record handling
//!
//! This module centralizes the delimited-text concerns shared by the readers
//! and writers:
//! - Conversion of raw byte records into parse outcomes
//! - Parse statistics for discard-count logging
//! - Enriched record serialization
//!
//! All functions are pure (no I/O beyond the supplied writer) for easy testing.

use crate::core::parser::{parse_fields, FIELD_SEPARATOR};
use crate::types::{AnalyticsError, EnrichedTransaction, ParseOutcome};
use std::borrow::Cow;
use std::io::Write;

/// Column order of an enriched record
pub const ENRICHED_HEADER: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_Category",
    "API_Brand",
    "API_Rating",
    "API_Match",
];

/// Physical lines consumed as the header before records are read, whatever they contain
pub const HEADER_LINE: u64 = 1;

/// A parse outcome tagged with its source line
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// 1-based line number in the input file (header is line 1)
    pub line: u64,
    pub outcome: ParseOutcome,
}

/// Counts of non-blank records seen by a reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    pub parsed: usize,
    pub malformed: usize,
}

impl ParseStats {
    /// Count one outcome
    pub fn record(&mut self, outcome: &ParseOutcome) {
        self.records += 1;
        match outcome {
            ParseOutcome::Parsed(_) => self.parsed += 1,
            ParseOutcome::Malformed(_) => self.malformed += 1,
        }
    }
}

/// Convert the fields of one raw record into a parse outcome
///
/// Invalid UTF-8 is replaced rather than rejected. Returns `None` for blank
/// lines, which are skipped without being counted.
pub fn convert_record<'a, I>(fields: I) -> Option<ParseOutcome>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let fields: Vec<Cow<'a, str>> = fields.into_iter().map(String::from_utf8_lossy).collect();

    if fields.len() == 1 && fields[0].trim().is_empty() {
        return None;
    }

    Some(parse_fields(&fields))
}

/// Write enriched records as pipe-delimited text with a header row
///
/// Absent API fields are written as empty fields. Fields are never quoted,
/// so the output reads back through the same `|` splitter as the input.
pub fn write_enriched_records(
    records: &[EnrichedTransaction],
    output: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(output);

    writer
        .write_record(ENRICHED_HEADER)
        .map_err(|e| AnalyticsError::output(format!("Failed to write header: {}", e)))?;

    for record in records {
        let tx = &record.transaction;
        writer
            .write_record([
                tx.transaction_id.clone(),
                tx.date.clone(),
                tx.product_id.clone(),
                tx.product_name.clone(),
                tx.quantity.to_string(),
                tx.unit_price.to_string(),
                tx.customer_id.clone(),
                tx.region.clone(),
                record.api_category.clone().unwrap_or_default(),
                record.api_brand.clone().unwrap_or_default(),
                record
                    .api_rating
                    .map(|rating| rating.to_string())
                    .unwrap_or_default(),
                record.api_match.to_string(),
            ])
            .map_err(|e| {
                AnalyticsError::output(format!(
                    "Failed to write enriched record {}: {}",
                    tx.transaction_id, e
                ))
            })?;
    }

    writer
        .flush()
        .map_err(|e| AnalyticsError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
