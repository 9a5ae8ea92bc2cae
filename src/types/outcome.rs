//! Per-record outcomes of parsing and validation
//!
//! Data-quality problems are never raised as errors. Each raw line becomes a
//! [`ParseOutcome`] and each parsed candidate becomes a [`RecordOutcome`], so
//! discard and reject counts are a fold over explicit values.

use super::transaction::Transaction;
use thiserror::Error;

/// Why a raw line could not be turned into a [`Transaction`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("expected 8 fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid quantity '{value}'")]
    InvalidQuantity { value: String },

    #[error("invalid unit price '{value}'")]
    InvalidUnitPrice { value: String },

    #[error("line revenue of {quantity} x {unit_price} is out of range")]
    NumericOverflow { quantity: String, unit_price: String },
}

/// Result of parsing one raw line
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Transaction),
    Malformed(MalformedReason),
}

impl ParseOutcome {
    /// The parsed transaction, if any
    pub fn ok(self) -> Option<Transaction> {
        match self {
            ParseOutcome::Parsed(tx) => Some(tx),
            ParseOutcome::Malformed(_) => None,
        }
    }
}

/// Which validation rule a parsed candidate failed
///
/// Variants are listed in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("region is empty")]
    EmptyRegion,

    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("unit price must be greater than zero")]
    NonPositiveUnitPrice,

    #[error("transaction id must start with 'T'")]
    BadTransactionId,

    #[error("product id must start with 'P'")]
    BadProductId,

    #[error("customer id must start with 'C'")]
    BadCustomerId,
}

/// Result of validating one parsed candidate
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Valid(Transaction),
    Invalid(Transaction, InvalidReason),
}
