//! Aggregation engine
//!
//! Side-effect-free queries over a validated transaction set. Each query
//! makes a single grouping pass keyed by its group field, then derives a
//! sorted result. Groups remember the index at which their key first
//! appeared, and that index breaks every ranking tie.
//!
//! Revenue sums are exact (`Decimal`), so region, product and customer
//! totals always add up to [`total_revenue`]. Sums saturate at
//! `Decimal::MAX` instead of panicking; only then do the views stop
//! reconciling. Only derived ratios
//! (percentages and averages) are rounded, to 2 dp, half-to-even.
//!
//! Every query accepts an empty slice and returns its zero/empty value.

use crate::types::{
    CustomerSummary, DailySales, PeakDay, ProductSales, RegionSales, SalesAnalysis, Transaction,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of products in the default top-products ranking
pub const DEFAULT_TOP_N: usize = 5;

/// Quantity below which a product counts as a low performer
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Tunables of the aggregate queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub top_n: usize,
    pub low_stock_threshold: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Round a derived money or percentage value to 2 dp (banker's rounding)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// `numerator / denominator`, or zero when the denominator is zero
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

struct Group<A> {
    key: String,
    first_seen: usize,
    acc: A,
}

/// Accumulators keyed by group, kept in first-seen order
struct Grouped<A> {
    index: HashMap<String, usize>,
    groups: Vec<Group<A>>,
}

impl<A: Default> Grouped<A> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut A {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.index.insert(key.to_string(), position);
                self.groups.push(Group {
                    key: key.to_string(),
                    first_seen: position,
                    acc: A::default(),
                });
                position
            }
        };
        &mut self.groups[position].acc
    }

    fn into_groups(self) -> Vec<Group<A>> {
        self.groups
    }
}

#[derive(Default)]
struct SalesTotals {
    revenue: Decimal,
    quantity: i64,
    count: usize,
}

impl SalesTotals {
    fn add(&mut self, tx: &Transaction) {
        self.revenue = self.revenue.saturating_add(tx.line_revenue());
        self.quantity = self.quantity.saturating_add(tx.quantity);
        self.count += 1;
    }
}

#[derive(Default)]
struct CustomerTotals {
    spent: Decimal,
    count: usize,
    products: Vec<String>,
}

#[derive(Default)]
struct DailyTotals {
    revenue: Decimal,
    count: usize,
    customers: HashSet<String>,
}

fn group_by_product(transactions: &[Transaction]) -> Vec<Group<SalesTotals>> {
    let mut grouped = Grouped::<SalesTotals>::new();
    for tx in transactions {
        grouped.entry(&tx.product_name).add(tx);
    }
    grouped.into_groups()
}

fn product_sales(group: Group<SalesTotals>) -> ProductSales {
    ProductSales {
        product: group.key,
        total_quantity: group.acc.quantity,
        total_revenue: group.acc.revenue,
    }
}

/// Sum of line revenue over all records
pub fn total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(Transaction::line_revenue)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Revenue per region, highest first
///
/// Percentages are relative to the total of the same slice.
pub fn region_sales(transactions: &[Transaction]) -> Vec<RegionSales> {
    let grand_total = total_revenue(transactions);

    let mut grouped = Grouped::<SalesTotals>::new();
    for tx in transactions {
        grouped.entry(&tx.region).add(tx);
    }

    let mut groups = grouped.into_groups();
    groups.sort_by(|a, b| {
        b.acc
            .revenue
            .cmp(&a.acc.revenue)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    groups
        .into_iter()
        .map(|group| RegionSales {
            percentage_of_total: round_money(
                ratio(group.acc.revenue, grand_total) * Decimal::ONE_HUNDRED,
            ),
            region: group.key,
            total_sales: group.acc.revenue,
            transaction_count: group.acc.count,
        })
        .collect()
}

/// The `n` products with the most units sold
pub fn top_products(transactions: &[Transaction], n: usize) -> Vec<ProductSales> {
    let mut groups = group_by_product(transactions);
    groups.sort_by(|a, b| {
        b.acc
            .quantity
            .cmp(&a.acc.quantity)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    groups.into_iter().take(n).map(product_sales).collect()
}

/// Spend profile per customer, biggest spender first
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerSummary> {
    let mut grouped = Grouped::<CustomerTotals>::new();
    for tx in transactions {
        let totals = grouped.entry(&tx.customer_id);
        totals.spent = totals.spent.saturating_add(tx.line_revenue());
        totals.count += 1;
        if !totals.products.contains(&tx.product_name) {
            totals.products.push(tx.product_name.clone());
        }
    }

    let mut groups = grouped.into_groups();
    groups.sort_by(|a, b| {
        b.acc
            .spent
            .cmp(&a.acc.spent)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    groups
        .into_iter()
        .map(|group| CustomerSummary {
            avg_order_value: round_money(ratio(
                group.acc.spent,
                Decimal::from(group.acc.count),
            )),
            customer_id: group.key,
            total_spent: group.acc.spent,
            purchase_count: group.acc.count,
            distinct_products: group.acc.products,
        })
        .collect()
}

/// Revenue, volume and reach per date, oldest first
///
/// Dates are ordered as strings, which is chronological for ISO dates.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailySales> {
    let mut days: BTreeMap<&str, DailyTotals> = BTreeMap::new();
    for tx in transactions {
        let totals = days.entry(tx.date.as_str()).or_default();
        totals.revenue = totals.revenue.saturating_add(tx.line_revenue());
        totals.count += 1;
        totals.customers.insert(tx.customer_id.clone());
    }

    days.into_iter()
        .map(|(date, totals)| DailySales {
            date: date.to_string(),
            revenue: totals.revenue,
            transaction_count: totals.count,
            unique_customer_count: totals.customers.len(),
        })
        .collect()
}

/// The date with the strictly highest revenue
///
/// On a tie the date that appears first in the input wins.
pub fn peak_sales_day(transactions: &[Transaction]) -> PeakDay {
    let mut grouped = Grouped::<SalesTotals>::new();
    for tx in transactions {
        grouped.entry(&tx.date).add(tx);
    }

    let mut peak = PeakDay::default();
    for group in grouped.into_groups() {
        if peak.date.is_none() || group.acc.revenue > peak.revenue {
            peak = PeakDay {
                date: Some(group.key),
                revenue: group.acc.revenue,
                transaction_count: group.acc.count,
            };
        }
    }
    peak
}

/// Products that sold fewer than `threshold` units, fewest first
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductSales> {
    let mut groups: Vec<Group<SalesTotals>> = group_by_product(transactions)
        .into_iter()
        .filter(|group| group.acc.quantity < threshold)
        .collect();
    groups.sort_by(|a, b| {
        a.acc
            .quantity
            .cmp(&b.acc.quantity)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    groups.into_iter().map(product_sales).collect()
}

impl SalesAnalysis {
    /// Evaluate every view over one validated transaction set
    pub fn compute(transactions: &[Transaction], config: &AnalysisConfig) -> Self {
        let total_revenue = total_revenue(transactions);
        let transaction_count = transactions.len();

        let date_range = transactions
            .iter()
            .map(|tx| tx.date.as_str())
            .min()
            .zip(transactions.iter().map(|tx| tx.date.as_str()).max())
            .map(|(first, last)| (first.to_string(), last.to_string()));

        SalesAnalysis {
            total_revenue,
            transaction_count,
            average_order_value: round_money(ratio(
                total_revenue,
                Decimal::from(transaction_count),
            )),
            date_range,
            region_sales: region_sales(transactions),
            top_products: top_products(transactions, config.top_n),
            customers: customer_analysis(transactions),
            daily_trend: daily_trend(transactions),
            peak_day: peak_sales_day(transactions),
            low_performers: low_performing_products(transactions, config.low_stock_threshold),
        }
    }
}
