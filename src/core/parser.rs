//! Record parser
//!
//! Turns pipe-delimited sales lines into [`Transaction`] candidates. The
//! record shape is fixed:
//!
//! ```text
//! TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region
//! ```
//!
//! Lines that cannot be coerced into that shape become
//! [`ParseOutcome::Malformed`]; they are never counted as invalid and never
//! reach validation. The parser is pure and does not log.

use crate::types::{MalformedReason, ParseOutcome, Transaction};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Field separator of the input record
pub const FIELD_SEPARATOR: u8 = b'|';

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 8;

const THOUSANDS_SEPARATOR: char = ',';

/// Parse one raw line (header already removed by the caller)
///
/// Whitespace around the whole line is ignored; whitespace inside fields
/// is preserved.
pub fn parse_line(line: &str) -> ParseOutcome {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR as char).collect();
    parse_fields(&fields)
}

/// Parse a record that has already been split into fields
///
/// Readers that split records themselves call this directly so that both
/// paths apply identical rules.
pub fn parse_fields<S: AsRef<str>>(fields: &[S]) -> ParseOutcome {
    let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region] =
        fields
    else {
        return ParseOutcome::Malformed(MalformedReason::FieldCount {
            found: fields.len(),
        });
    };

    let raw_quantity = strip_thousands(quantity.as_ref());
    let Some(quantity) = parse_quantity(&raw_quantity) else {
        return ParseOutcome::Malformed(MalformedReason::InvalidQuantity {
            value: raw_quantity,
        });
    };

    let raw_price = strip_thousands(unit_price.as_ref());
    let Some(unit_price) = parse_unit_price(&raw_price) else {
        return ParseOutcome::Malformed(MalformedReason::InvalidUnitPrice { value: raw_price });
    };

    if Decimal::from(quantity).checked_mul(unit_price).is_none() {
        return ParseOutcome::Malformed(MalformedReason::NumericOverflow {
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
        });
    }

    ParseOutcome::Parsed(Transaction {
        transaction_id: transaction_id.as_ref().trim_start().to_string(),
        date: date.as_ref().to_string(),
        product_id: product_id.as_ref().to_string(),
        // Commas are stripped from names too, matching the numeric fields
        product_name: strip_thousands(product_name.as_ref()),
        quantity,
        unit_price,
        customer_id: customer_id.as_ref().to_string(),
        region: region.as_ref().trim_end().to_string(),
    })
}

/// Parse a sequence of raw lines, keeping only the well-formed candidates
///
/// Blank lines are skipped; malformed lines are dropped silently.
pub fn parse_lines<'a, I>(lines: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_line(line).ok())
        .collect()
}

fn strip_thousands(raw: &str) -> String {
    raw.replace(THOUSANDS_SEPARATOR, "")
}

fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn parse_unit_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parsed(line: &str) -> Transaction {
        match parse_line(line) {
            ParseOutcome::Parsed(tx) => tx,
            ParseOutcome::Malformed(reason) => panic!("expected parsed record, got {}", reason),
        }
    }

    #[test]
    fn test_parse_line_valid_record() {
        let tx = parsed("T1|2024-01-01|P10|Widget|5|100|C1|North");

        assert_eq!(tx.transaction_id, "T1");
        assert_eq!(tx.date, "2024-01-01");
        assert_eq!(tx.product_id, "P10");
        assert_eq!(tx.product_name, "Widget");
        assert_eq!(tx.quantity, 5);
        assert_eq!(tx.unit_price, Decimal::new(100, 0));
        assert_eq!(tx.customer_id, "C1");
        assert_eq!(tx.region, "North");
    }

    #[test]
    fn test_parse_line_keeps_semantically_invalid_values() {
        // Zero quantity parses; rejecting it is the validator's job
        let tx = parsed("T2|2024-01-01|P20|Gadget|0|50|C2|South");
        assert_eq!(tx.quantity, 0);
    }

    #[rstest]
    #[case::too_few("T1|2024-01-01|P10|Widget|5|100|C1", 7)]
    #[case::too_many("T1|2024-01-01|P10|Widget|5|100|C1|North|extra", 9)]
    #[case::single_field("garbage", 1)]
    #[case::comma_delimited("T1,2024-01-01,P10,Widget,5,100,C1,North", 1)]
    fn test_parse_line_wrong_field_count(#[case] line: &str, #[case] found: usize) {
        assert_eq!(
            parse_line(line),
            ParseOutcome::Malformed(MalformedReason::FieldCount { found })
        );
    }

    #[rstest]
    #[case::word("T1|2024-01-01|P10|Widget|five|100|C1|North")]
    #[case::decimal("T1|2024-01-01|P10|Widget|2.5|100|C1|North")]
    #[case::empty("T1|2024-01-01|P10|Widget||100|C1|North")]
    fn test_parse_line_invalid_quantity(#[case] line: &str) {
        assert!(matches!(
            parse_line(line),
            ParseOutcome::Malformed(MalformedReason::InvalidQuantity { .. })
        ));
    }

    #[rstest]
    #[case::word("T1|2024-01-01|P10|Widget|5|cheap|C1|North")]
    #[case::empty("T1|2024-01-01|P10|Widget|5||C1|North")]
    #[case::currency_symbol("T1|2024-01-01|P10|Widget|5|$100|C1|North")]
    fn test_parse_line_invalid_unit_price(#[case] line: &str) {
        assert!(matches!(
            parse_line(line),
            ParseOutcome::Malformed(MalformedReason::InvalidUnitPrice { .. })
        ));
    }

    #[rstest]
    #[case::plain("12", "1500", 12, Decimal::new(1500, 0))]
    #[case::thousands("1,200", "45,000.50", 1200, Decimal::new(4500050, 2))]
    #[case::padded(" 3 ", " 9.99 ", 3, Decimal::new(999, 2))]
    #[case::negative("-4", "10", -4, Decimal::new(10, 0))]
    #[case::scientific("1", "1.5e3", 1, Decimal::new(1500, 0))]
    fn test_parse_line_numeric_fields(
        #[case] quantity: &str,
        #[case] price: &str,
        #[case] expected_quantity: i64,
        #[case] expected_price: Decimal,
    ) {
        let line = format!("T1|2024-01-01|P10|Widget|{}|{}|C1|North", quantity, price);
        let tx = parsed(&line);
        assert_eq!(tx.quantity, expected_quantity);
        assert_eq!(tx.unit_price, expected_price);
    }

    #[test]
    fn test_parse_line_strips_commas_from_product_name() {
        let tx = parsed("T1|2024-01-01|P10|Mouse, Wireless|5|100|C1|North");
        assert_eq!(tx.product_name, "Mouse Wireless");
    }

    #[test]
    fn test_parse_line_ignores_surrounding_whitespace() {
        let tx = parsed("  T1|2024-01-01|P10|Widget|5|100|C1|North \r");
        assert_eq!(tx.transaction_id, "T1");
        assert_eq!(tx.region, "North");
    }

    #[test]
    fn test_parse_line_preserves_inner_whitespace() {
        let tx = parsed("T1|2024-01-01| P10|Widget|5|100|C1 |North");
        assert_eq!(tx.product_id, " P10");
        assert_eq!(tx.customer_id, "C1 ");
    }

    #[test]
    fn test_parse_line_rejects_unrepresentable_revenue() {
        let line = format!(
            "T1|2024-01-01|P10|Widget|{}|{}|C1|North",
            i64::MAX,
            Decimal::MAX
        );
        assert!(matches!(
            parse_line(&line),
            ParseOutcome::Malformed(MalformedReason::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_parse_fields_matches_parse_line() {
        let line = "T1|2024-01-01|P10|Widget|5|100|C1|North";
        let fields: Vec<String> = line.split('|').map(str::to_string).collect();
        assert_eq!(parse_fields(&fields), parse_line(line));
    }

    #[test]
    fn test_parse_lines_drops_malformed_and_blank_lines() {
        let lines = [
            "T1|2024-01-01|P10|Widget|5|100|C1|North",
            "",
            "T2|2024-01-01|P10|Widget",
            "T3|2024-01-01|P10|Widget|x|100|C1|North",
            "   ",
            "T4|2024-01-02|P11|Gadget|0|50|C2|South",
        ];

        let ids: Vec<String> = parse_lines(lines)
            .into_iter()
            .map(|tx| tx.transaction_id)
            .collect();
        assert_eq!(ids, vec!["T1", "T4"]);
    }
}
