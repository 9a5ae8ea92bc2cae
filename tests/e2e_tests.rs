//! End-to-end integration tests
//!
//! These tests drive the complete pipeline over predefined fixture files:
//! 1. Read input.txt from a fixture directory
//! 2. Parse and validate every record with the selected strategy
//! 3. Compute the analysis views over the valid set
//! 4. Compare the results with hand-computed expectations
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - A clean file (happy_path)
//! - Malformed lines, rule violations, thousands separators and blank lines (dirty_data)
//! - Catalog enrichment (dirty_data/catalog.json)
//!
//! Each test is run twice: once with the sync strategy and once with the async strategy.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_sales_analytics::cli::StrategyType;
    use rust_sales_analytics::core::enrichment::enrich_transactions;
    use rust_sales_analytics::core::{AnalysisConfig, FilterOptions};
    use rust_sales_analytics::io::{load_catalog, ParseStats};
    use rust_sales_analytics::strategy::{create_strategy, BatchConfig, PipelineResult};
    use rust_sales_analytics::types::{
        EnrichmentSummary, ProductSales, SalesAnalysis, ValidationSummary,
    };
    use std::path::Path;

    /// Run a fixture's input.txt through the selected strategy
    ///
    /// The async strategy uses a small batch size so that fixtures span
    /// several batches.
    fn run_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
        filter: &FilterOptions,
    ) -> PipelineResult {
        let input_path = format!("tests/fixtures/{}/input.txt", fixture_name);
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let strategy = create_strategy(strategy_type, Some(BatchConfig::new(3, 2)));
        strategy
            .process(Path::new(&input_path), filter)
            .unwrap_or_else(|e| panic!("Failed to process records: {}", e))
    }

    fn names(products: &[ProductSales]) -> Vec<&str> {
        products.iter().map(|p| p.product.as_str()).collect()
    }

    #[rstest]
    fn test_happy_path(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let result = run_fixture("happy_path", strategy, &FilterOptions::default());

        assert_eq!(
            result.stats,
            ParseStats {
                records: 6,
                parsed: 6,
                malformed: 0,
            }
        );
        assert_eq!(result.validation.invalid_count, 0);
        assert_eq!(result.validation.regions, vec!["North", "South", "East", "West"]);

        let analysis = SalesAnalysis::compute(&result.validation.valid, &AnalysisConfig::default());

        assert_eq!(analysis.total_revenue, Decimal::from(227_500));
        assert_eq!(analysis.average_order_value, Decimal::new(3_791_667, 2));
        assert_eq!(
            analysis.date_range,
            Some(("2024-01-01".to_string(), "2024-01-03".to_string()))
        );

        let regions: Vec<(&str, Decimal)> = analysis
            .region_sales
            .iter()
            .map(|r| (r.region.as_str(), r.total_sales))
            .collect();
        assert_eq!(
            regions,
            vec![
                ("North", Decimal::from(165_000)),
                ("West", Decimal::from(45_000)),
                ("South", Decimal::from(11_500)),
                ("East", Decimal::from(6_000)),
            ]
        );

        assert_eq!(
            names(&analysis.top_products),
            vec!["Mouse", "Keyboard", "Monitor", "Laptop"]
        );

        let customers: Vec<&str> = analysis
            .customers
            .iter()
            .map(|c| c.customer_id.as_str())
            .collect();
        assert_eq!(customers, vec!["C1", "C3", "C2"]);

        let days: Vec<(&str, Decimal, usize)> = analysis
            .daily_trend
            .iter()
            .map(|d| (d.date.as_str(), d.revenue, d.unique_customer_count))
            .collect();
        assert_eq!(
            days,
            vec![
                ("2024-01-01", Decimal::from(55_000), 2),
                ("2024-01-02", Decimal::from(96_000), 1),
                ("2024-01-03", Decimal::from(76_500), 1),
            ]
        );

        assert_eq!(analysis.peak_day.date.as_deref(), Some("2024-01-02"));
        assert_eq!(analysis.peak_day.revenue, Decimal::from(96_000));
        assert_eq!(
            names(&analysis.low_performers),
            vec!["Laptop", "Keyboard", "Monitor"]
        );
    }

    #[rstest]
    fn test_dirty_data(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let result = run_fixture("dirty_data", strategy, &FilterOptions::default());

        assert_eq!(
            result.stats,
            ParseStats {
                records: 10,
                parsed: 8,
                malformed: 2,
            }
        );
        assert_eq!(
            result.validation.summary,
            ValidationSummary {
                total_input: 8,
                invalid_count: 4,
                filtered_by_region: 0,
                filtered_by_amount: 0,
                final_count: 4,
            }
        );

        let ids: Vec<&str> = result
            .validation
            .valid
            .iter()
            .map(|tx| tx.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T001", "T002", "T009", "T010"]);
        assert_eq!(result.validation.valid[0].unit_price, Decimal::from(45_000));
        assert_eq!(result.validation.valid[1].product_name, "MouseWireless");

        let analysis = SalesAnalysis::compute(&result.validation.valid, &AnalysisConfig::default());

        assert_eq!(analysis.total_revenue, Decimal::from(144_500));
        let percentages: Vec<Decimal> = analysis
            .region_sales
            .iter()
            .map(|r| r.percentage_of_total)
            .collect();
        assert_eq!(
            percentages,
            vec![Decimal::new(9343, 2), Decimal::new(346, 2), Decimal::new(311, 2)]
        );
        assert_eq!(
            names(&analysis.top_products),
            vec!["MouseWireless", "Laptop", "Keyboard"]
        );
        assert_eq!(analysis.peak_day.date.as_deref(), Some("2024-12-01"));
        assert_eq!(names(&analysis.low_performers), vec!["Laptop", "Keyboard"]);
    }

    #[rstest]
    fn test_region_filter(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let filter = FilterOptions::new(Some("North".to_string()), None, None).unwrap();
        let result = run_fixture("happy_path", strategy, &filter);

        assert_eq!(result.validation.summary.filtered_by_region, 2);
        assert_eq!(result.validation.summary.final_count, 2);
        assert_eq!(result.validation.regions.len(), 4);
        assert!(result.validation.valid.iter().all(|tx| tx.region == "North"));
    }

    #[rstest]
    fn test_amount_filter(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let filter =
            FilterOptions::new(None, Some(Decimal::from(5_000)), Some(Decimal::from(50_000))).unwrap();
        let result = run_fixture("dirty_data", strategy, &filter);

        assert_eq!(result.validation.invalid_count, 4);
        assert_eq!(result.validation.summary.filtered_by_amount, 2);
        assert_eq!(
            result.validation.revenue_range,
            Some((Decimal::from(5_000), Decimal::from(45_000)))
        );
    }

    #[rstest]
    fn test_enrichment(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let result = run_fixture("dirty_data", strategy, &FilterOptions::default());
        let catalog = load_catalog(Path::new("tests/fixtures/dirty_data/catalog.json")).unwrap();

        let enriched = enrich_transactions(&result.validation.valid, &catalog);
        let summary = EnrichmentSummary::from_records(&enriched);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.success_rate, Decimal::from(75));
        assert_eq!(summary.failed_product_ids, vec!["P102"]);

        assert_eq!(enriched[0].api_category.as_deref(), Some("laptops"));
        assert_eq!(enriched[0].api_brand.as_deref(), Some("Apple"));
        assert_eq!(enriched[2].api_brand, None);
        assert_eq!(enriched[2].api_rating, Some(4.2));
    }

    #[test]
    fn test_strategies_agree_on_fixtures() {
        for fixture in ["happy_path", "dirty_data"] {
            let sync = run_fixture(fixture, StrategyType::Sync, &FilterOptions::default());
            let batched = run_fixture(fixture, StrategyType::Async, &FilterOptions::default());
            assert_eq!(sync, batched, "strategies disagree on {}", fixture);
        }
    }
}
