//! Validation and filtering of parsed candidates
//!
//! Each candidate is checked against the record rules in order, stopping at
//! the first failure:
//!
//! 1. `Region` is not blank
//! 2. `Quantity > 0`
//! 3. `UnitPrice > 0`
//! 4. `TransactionID` starts with `T`
//! 5. `ProductID` starts with `P`
//! 6. `CustomerID` starts with `C`
//!
//! Survivors are then narrowed by the optional region and line-revenue
//! filters. Filtering never changes `invalid_count`.

use crate::types::{AnalyticsError, InvalidReason, RecordOutcome, Transaction, ValidationSummary};
use rust_decimal::Decimal;

/// Optional narrowing applied after validation
///
/// Both amount bounds are inclusive and apply to the line revenue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub region: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl FilterOptions {
    /// Create filter options, rejecting an inverted amount range
    pub fn new(
        region: Option<String>,
        min_amount: Option<Decimal>,
        max_amount: Option<Decimal>,
    ) -> Result<Self, AnalyticsError> {
        if let (Some(min), Some(max)) = (min_amount, max_amount) {
            if min > max {
                return Err(AnalyticsError::invalid_config(format!(
                    "min-amount {} exceeds max-amount {}",
                    min, max
                )));
            }
        }

        Ok(Self {
            region,
            min_amount,
            max_amount,
        })
    }

    /// Whether either amount bound was supplied
    pub fn has_amount_bounds(&self) -> bool {
        self.min_amount.is_some() || self.max_amount.is_some()
    }

    fn matches_region(&self, tx: &Transaction) -> bool {
        self.region.as_ref().is_none_or(|region| tx.region == *region)
    }

    fn matches_amount(&self, tx: &Transaction) -> bool {
        let revenue = tx.line_revenue();
        self.min_amount.is_none_or(|min| revenue >= min)
            && self.max_amount.is_none_or(|max| revenue <= max)
    }
}

/// Find the first rule a candidate breaks, if any
pub fn first_failed_rule(tx: &Transaction) -> Option<InvalidReason> {
    if tx.region.trim().is_empty() {
        Some(InvalidReason::EmptyRegion)
    } else if tx.quantity <= 0 {
        Some(InvalidReason::NonPositiveQuantity)
    } else if tx.unit_price <= Decimal::ZERO {
        Some(InvalidReason::NonPositiveUnitPrice)
    } else if !tx.transaction_id.starts_with('T') {
        Some(InvalidReason::BadTransactionId)
    } else if !tx.product_id.starts_with('P') {
        Some(InvalidReason::BadProductId)
    } else if !tx.customer_id.starts_with('C') {
        Some(InvalidReason::BadCustomerId)
    } else {
        None
    }
}

/// Classify one candidate
pub fn check_record(tx: Transaction) -> RecordOutcome {
    match first_failed_rule(&tx) {
        Some(reason) => RecordOutcome::Invalid(tx, reason),
        None => RecordOutcome::Valid(tx),
    }
}

/// Result of one validation pass
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Valid records that passed every filter, in input order
    pub valid: Vec<Transaction>,
    pub invalid_count: usize,
    pub summary: ValidationSummary,
    /// Distinct regions among valid records before filtering, first-seen order
    pub regions: Vec<String>,
    /// Lowest and highest line revenue of the filtered set
    pub revenue_range: Option<(Decimal, Decimal)>,
}

impl ValidationReport {
    /// Fold per-record outcomes into a report, then apply the filters
    pub fn from_outcomes<I>(outcomes: I, filter: &FilterOptions) -> Self
    where
        I: IntoIterator<Item = RecordOutcome>,
    {
        let mut total_input = 0;
        let mut invalid_count = 0;
        let mut valid = Vec::new();

        for outcome in outcomes {
            total_input += 1;
            match outcome {
                RecordOutcome::Valid(tx) => valid.push(tx),
                RecordOutcome::Invalid(..) => invalid_count += 1,
            }
        }

        let mut regions: Vec<String> = Vec::new();
        for tx in &valid {
            if !regions.contains(&tx.region) {
                regions.push(tx.region.clone());
            }
        }

        let mut filtered_by_region = 0;
        if filter.region.is_some() {
            valid.retain(|tx| filter.matches_region(tx));
            filtered_by_region = valid.len();
        }

        let mut filtered_by_amount = 0;
        if filter.has_amount_bounds() {
            valid.retain(|tx| filter.matches_amount(tx));
            filtered_by_amount = valid.len();
        }

        let revenue_range = valid.iter().map(Transaction::line_revenue).fold(
            None,
            |range: Option<(Decimal, Decimal)>, revenue| match range {
                None => Some((revenue, revenue)),
                Some((low, high)) => Some((low.min(revenue), high.max(revenue))),
            },
        );

        let summary = ValidationSummary {
            total_input,
            invalid_count,
            filtered_by_region,
            filtered_by_amount,
            final_count: valid.len(),
        };

        Self {
            valid,
            invalid_count,
            summary,
            regions,
            revenue_range,
        }
    }
}

/// Validate candidates and apply the filters
pub fn validate_and_filter<I>(candidates: I, filter: &FilterOptions) -> ValidationReport
where
    I: IntoIterator<Item = Transaction>,
{
    ValidationReport::from_outcomes(candidates.into_iter().map(check_record), filter)
}
