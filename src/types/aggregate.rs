//! Aggregate result types
//!
//! Every type here is a plain value computed fresh from a validated
//! transaction set. None of them hold references back into the engine.

use rust_decimal::Decimal;
use serde::Serialize;

/// Counters produced by one validation pass
///
/// `filtered_by_region` and `filtered_by_amount` hold the surviving count after
/// the corresponding filter, and stay `0` when that filter was not requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total_input: usize,
    pub invalid_count: usize,
    pub filtered_by_region: usize,
    pub filtered_by_amount: usize,
    pub final_count: usize,
}

/// Revenue of one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    /// Share of the grand total, in percent, rounded to 2 dp
    pub percentage_of_total: Decimal,
}

/// Quantity and revenue of one product
///
/// Used for both the top-products ranking and the low-performer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub product: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}

/// Purchase profile of one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub total_spent: Decimal,
    pub purchase_count: usize,
    /// `total_spent / purchase_count`, rounded to 2 dp
    pub avg_order_value: Decimal,
    /// Distinct product names bought, in first-purchase order
    pub distinct_products: Vec<String>,
}

/// Sales of one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: String,
    pub revenue: Decimal,
    pub transaction_count: usize,
    pub unique_customer_count: usize,
}

/// The date with the highest revenue
///
/// `date` is `None` (and the figures zero) for an empty transaction set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeakDay {
    pub date: Option<String>,
    pub revenue: Decimal,
    pub transaction_count: usize,
}

/// Every analytical view over one validated transaction set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesAnalysis {
    pub total_revenue: Decimal,
    pub transaction_count: usize,
    pub average_order_value: Decimal,
    /// First and last date by lexical order
    pub date_range: Option<(String, String)>,
    pub region_sales: Vec<RegionSales>,
    pub top_products: Vec<ProductSales>,
    pub customers: Vec<CustomerSummary>,
    pub daily_trend: Vec<DailySales>,
    pub peak_day: PeakDay,
    pub low_performers: Vec<ProductSales>,
}

/// Match statistics of an enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentSummary {
    pub total: usize,
    pub matched: usize,
    /// `matched / total × 100`, rounded to 2 dp
    pub success_rate: Decimal,
    /// Product ids of unmatched records, in record order
    pub failed_product_ids: Vec<String>,
}
