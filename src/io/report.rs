//! Report output
//!
//! Renders a completed analysis for people (`write_text_report`) or for
//! other programs (`write_json_report`). Rendering is the only place money
//! is formatted; the engine hands over exact `Decimal` values.

use crate::core::aggregation::round_money;
use crate::types::{AnalyticsError, EnrichmentSummary, SalesAnalysis, ValidationSummary};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 40;
const TOP_CUSTOMERS: usize = 5;

/// Everything a report shows about one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    #[serde(serialize_with = "serialize_timestamp")]
    pub generated_at: NaiveDateTime,
    pub validation: &'a ValidationSummary,
    pub analysis: &'a SalesAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<&'a EnrichmentSummary>,
}

fn serialize_timestamp<S: serde::Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format("%Y-%m-%dT%H:%M:%S"))
}

/// Format a money value with 2 dp and `,` thousands separators
pub fn format_money(value: Decimal) -> String {
    let rendered = format!("{:.2}", round_money(value));
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{}", sign, grouped, fraction)
}

fn heading(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn render_text(report: &RunReport<'_>, out: &mut dyn Write) -> io::Result<()> {
    let analysis = report.analysis;
    let validation = report.validation;

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "SALES ANALYTICS REPORT")?;
    writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Records Processed: {}", analysis.transaction_count)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    heading(out, "OVERALL SUMMARY")?;
    writeln!(out, "Total Revenue: {}", format_money(analysis.total_revenue))?;
    writeln!(out, "Total Transactions: {}", analysis.transaction_count)?;
    writeln!(
        out,
        "Average Order Value: {}",
        format_money(analysis.average_order_value)
    )?;
    match &analysis.date_range {
        Some((first, last)) => writeln!(out, "Date Range: {} to {}", first, last)?,
        None => writeln!(out, "Date Range: N/A")?,
    }
    writeln!(out)?;

    heading(out, "DATA QUALITY")?;
    writeln!(out, "Records Parsed: {}", validation.total_input)?;
    writeln!(out, "Invalid Records Removed: {}", validation.invalid_count)?;
    if validation.filtered_by_region > 0 {
        writeln!(out, "After Region Filter: {}", validation.filtered_by_region)?;
    }
    if validation.filtered_by_amount > 0 {
        writeln!(out, "After Amount Filter: {}", validation.filtered_by_amount)?;
    }
    writeln!(out, "Records Analysed: {}", validation.final_count)?;
    writeln!(out)?;

    heading(out, "REGION-WISE PERFORMANCE")?;
    writeln!(out, "Region | Sales | % of Total | Transactions")?;
    for region in &analysis.region_sales {
        writeln!(
            out,
            "{} | {} | {:.2}% | {}",
            region.region,
            format_money(region.total_sales),
            region.percentage_of_total,
            region.transaction_count
        )?;
    }
    writeln!(out)?;

    heading(out, &format!("TOP {} PRODUCTS", analysis.top_products.len()))?;
    writeln!(out, "Rank | Product | Quantity | Revenue")?;
    for (rank, product) in analysis.top_products.iter().enumerate() {
        writeln!(
            out,
            "{} | {} | {} | {}",
            rank + 1,
            product.product,
            product.total_quantity,
            format_money(product.total_revenue)
        )?;
    }
    writeln!(out)?;

    heading(out, &format!("TOP {} CUSTOMERS", TOP_CUSTOMERS))?;
    writeln!(out, "Rank | Customer | Total Spent | Orders")?;
    for (rank, customer) in analysis.customers.iter().take(TOP_CUSTOMERS).enumerate() {
        writeln!(
            out,
            "{} | {} | {} | {}",
            rank + 1,
            customer.customer_id,
            format_money(customer.total_spent),
            customer.purchase_count
        )?;
    }
    writeln!(out)?;

    heading(out, "DAILY SALES TREND")?;
    writeln!(out, "Date | Revenue | Transactions | Customers")?;
    for day in &analysis.daily_trend {
        writeln!(
            out,
            "{} | {} | {} | {}",
            day.date,
            format_money(day.revenue),
            day.transaction_count,
            day.unique_customer_count
        )?;
    }
    writeln!(out)?;

    heading(out, "PRODUCT PERFORMANCE ANALYSIS")?;
    match &analysis.peak_day.date {
        Some(date) => writeln!(
            out,
            "Best Selling Day: {} | {} | {} transactions",
            date,
            format_money(analysis.peak_day.revenue),
            analysis.peak_day.transaction_count
        )?,
        None => writeln!(out, "Best Selling Day: N/A")?,
    }
    writeln!(out, "Low Performing Products:")?;
    if analysis.low_performers.is_empty() {
        writeln!(out, "None")?;
    }
    for product in &analysis.low_performers {
        writeln!(
            out,
            "{} | {} | {}",
            product.product,
            product.total_quantity,
            format_money(product.total_revenue)
        )?;
    }

    if let Some(enrichment) = report.enrichment {
        writeln!(out)?;
        heading(out, "API ENRICHMENT SUMMARY")?;
        writeln!(out, "Total Records Enriched: {}", enrichment.matched)?;
        writeln!(out, "Success Rate: {:.2}%", enrichment.success_rate)?;
        writeln!(out, "Failed Product IDs:")?;
        for product_id in &enrichment.failed_product_ids {
            writeln!(out, "{}", product_id)?;
        }
    }

    Ok(())
}

/// Write the human-readable report
pub fn write_text_report(report: &RunReport<'_>, out: &mut dyn Write) -> Result<(), AnalyticsError> {
    render_text(report, out)
        .and_then(|_| out.flush())
        .map_err(|e| AnalyticsError::output(format!("Failed to write report: {}", e)))
}

/// Write the report as pretty-printed JSON
pub fn write_json_report(report: &RunReport<'_>, out: &mut dyn Write) -> Result<(), AnalyticsError> {
    serde_json::to_writer_pretty(&mut *out, report)
        .map_err(|e| AnalyticsError::output(format!("Failed to serialize report: {}", e)))?;
    writeln!(out)
        .and_then(|_| out.flush())
        .map_err(|e| AnalyticsError::output(format!("Failed to write report: {}", e)))
}
