//! Amount formatting and parsing.
//!
//! Amounts travel through the payslip pipeline as grouped strings
//! ("77,000"), so the formatter and parser must be exact inverses of each
//! other: whatever `format_amount` emits, `parse_amount` recovers the same
//! numeric value before any arithmetic is done on it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Coerce an arbitrary raw value into an amount.
///
/// Numbers pass through; strings are trimmed, de-grouped and parsed.
/// Anything else (null, booleans, nested structures, unparseable text)
/// coerces to zero rather than failing.
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => number
            .to_string()
            .parse()
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .unwrap_or(Decimal::ZERO),
        Value::String(text) => parse_amount(text),
        _ => Decimal::ZERO,
    }
}

/// Parse a possibly-grouped amount string ("1,234.5" -> 1234.5).
///
/// Blank or unparseable input yields zero.
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    cleaned
        .parse()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Render an amount with thousands grouping and at most three fraction
/// digits (half-up), trailing zeros trimmed. No currency symbol; the
/// template adds that.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(65000)), "65,000");
        assert_eq!(format_amount(dec!(1234567)), "1,234,567");
    }

    #[test]
    fn test_format_fraction_digits() {
        assert_eq!(format_amount(dec!(1234.5)), "1,234.5");
        assert_eq!(format_amount(dec!(1234.50)), "1,234.5");
        assert_eq!(format_amount(dec!(1234.5678)), "1,234.568");
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.5");
    }

    #[test]
    fn test_parse_strips_grouping() {
        assert_eq!(parse_amount("77,000"), dec!(77000));
        assert_eq!(parse_amount(" 1,234.5 "), dec!(1234.5));
        assert_eq!(parse_amount(""), dec!(0));
        assert_eq!(parse_amount("garbage"), dec!(0));
    }

    #[test]
    fn test_round_trip() {
        for amount in [
            dec!(0),
            dec!(1),
            dec!(999),
            dec!(1000),
            dec!(65000),
            dec!(77000),
            dec!(1234567.89),
            dec!(-45000),
            dec!(0.125),
        ] {
            assert_eq!(parse_amount(&format_amount(amount)), amount);
        }
    }

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(coerce_amount(&json!(65000)), dec!(65000));
        assert_eq!(coerce_amount(&json!(65000.5)), dec!(65000.5));
        assert_eq!(coerce_amount(&json!("7,000")), dec!(7000));
        assert_eq!(coerce_amount(&json!("5000")), dec!(5000));
    }

    #[test]
    fn test_coerce_garbage_to_zero() {
        assert_eq!(coerce_amount(&json!(null)), dec!(0));
        assert_eq!(coerce_amount(&json!("")), dec!(0));
        assert_eq!(coerce_amount(&json!("n/a")), dec!(0));
        assert_eq!(coerce_amount(&json!(true)), dec!(0));
        assert_eq!(coerce_amount(&json!([1, 2])), dec!(0));
        assert_eq!(coerce_amount(&json!({"amount": 5})), dec!(0));
    }
}
