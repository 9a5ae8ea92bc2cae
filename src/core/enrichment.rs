//! Enrichment joiner
//!
//! Joins validated transactions with product catalog metadata. The
//! `ProductID` is reduced to its first run of ASCII digits (`P042` → `42`)
//! and looked up in the catalog. Anything that does not resolve, including
//! ids without digits or with digit runs too large for a product number,
//! is a miss: the record is kept with `api_match = false` and empty API
//! fields.

use crate::core::aggregation::round_money;
use crate::core::traits::ProductCatalog;
use crate::types::{EnrichedTransaction, EnrichmentSummary, ProductNumber, Transaction};
use rust_decimal::Decimal;

/// Extract the numeric product id embedded in a `ProductID`
pub fn extract_product_number(product_id: &str) -> Option<ProductNumber> {
    let start = product_id.find(|c: char| c.is_ascii_digit())?;
    let digits = &product_id[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Attach catalog metadata to one transaction
pub fn enrich_transaction<C>(transaction: Transaction, catalog: &C) -> EnrichedTransaction
where
    C: ProductCatalog + ?Sized,
{
    let entry = extract_product_number(&transaction.product_id)
        .and_then(|product| catalog.lookup(product));

    match entry {
        Some(entry) => EnrichedTransaction {
            transaction,
            api_category: Some(entry.category.clone()),
            api_brand: entry.brand.clone(),
            api_rating: Some(entry.rating),
            api_match: true,
        },
        None => EnrichedTransaction {
            transaction,
            api_category: None,
            api_brand: None,
            api_rating: None,
            api_match: false,
        },
    }
}

/// Attach catalog metadata to every transaction, preserving order
pub fn enrich_transactions<C>(transactions: &[Transaction], catalog: &C) -> Vec<EnrichedTransaction>
where
    C: ProductCatalog + ?Sized,
{
    transactions
        .iter()
        .cloned()
        .map(|tx| enrich_transaction(tx, catalog))
        .collect()
}

impl EnrichmentSummary {
    /// Match statistics over a set of enriched records
    pub fn from_records(records: &[EnrichedTransaction]) -> Self {
        let total = records.len();
        let matched = records.iter().filter(|r| r.api_match).count();
        let failed_product_ids = records
            .iter()
            .filter(|r| !r.api_match)
            .map(|r| r.transaction.product_id.clone())
            .collect();

        let success_rate = if total == 0 {
            Decimal::ZERO
        } else {
            round_money(Decimal::from(matched) * Decimal::ONE_HUNDRED / Decimal::from(total))
        };

        Self {
            total,
            matched,
            success_rate,
            failed_product_ids,
        }
    }
}
