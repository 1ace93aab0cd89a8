//! Record normalization.
//!
//! Turns one raw submission plus its extracted line items into a
//! fully-defined [`PayslipRecord`]. Normalization never fails: missing or
//! malformed scalars absorb into documented defaults, and the three
//! totals follow an override-else-derive policy where a supplied value —
//! including an explicit zero — always wins over the computed sum.

use rust_decimal::Decimal;

use crate::config::PayslipDefaults;
use crate::payslip::format::{format_amount, parse_amount};
use crate::payslip::models::{LineItem, LineItems, PayslipRecord, RawRecord};

/// Placeholder shown for blank header fields.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Build the complete payslip record for one raw submission.
pub fn normalize(raw: &RawRecord, items: LineItems, defaults: &PayslipDefaults) -> PayslipRecord {
    // Totals: a present key is an override, even when it coerces to zero;
    // only an absent (or null) key triggers derivation. Derived sums
    // de-group the formatted row amounts before adding.
    let gross = raw
        .amount("gross_earnings")
        .unwrap_or_else(|| sum_amounts(&items.earnings));
    let total_deductions = raw
        .amount("total_deductions")
        .unwrap_or_else(|| sum_amounts(&items.deductions));
    // Net honors the overridden gross/deductions values, not a
    // recomputation from the rows.
    let net_payable = raw
        .amount("net_payable")
        .unwrap_or(gross - total_deductions);

    PayslipRecord {
        company_name: raw
            .text("company_name")
            .unwrap_or_else(|| defaults.company_name.clone()),
        company_address: raw
            .text("company_address")
            .unwrap_or_else(|| defaults.company_address.clone()),
        payslip_month: text_or_placeholder(raw, "payslip_month"),
        employee_name: text_or_placeholder(raw, "employee_name"),
        employee_number: raw
            .text("employee_number")
            .unwrap_or_else(|| defaults.employee_number.clone()),
        // pay_period falls back to the payslip month before the placeholder
        pay_period: raw
            .text("pay_period")
            .or_else(|| raw.text("payslip_month"))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        paid_days: text_or_placeholder(raw, "paid_days"),
        pay_date: text_or_placeholder(raw, "pay_date"),
        loss_of_pay_days: raw
            .text("loss_of_pay_days")
            .unwrap_or_else(|| "0".to_string()),
        gross_earnings: format_amount(gross),
        total_deductions: format_amount(total_deductions),
        net_payable: format_amount(net_payable),
        amount_in_words: raw.text("amount_in_words").unwrap_or_default(),
        notes: raw.text("notes").unwrap_or_default(),
        earnings: items.earnings,
        deductions: items.deductions,
    }
}

fn text_or_placeholder(raw: &RawRecord, key: &str) -> String {
    raw.text(key).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn sum_amounts(items: &[LineItem]) -> Decimal {
    items.iter().map(|item| parse_amount(&item.amount)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payslip::extract::extract_line_items;
    use serde_json::json;

    fn normalized(value: serde_json::Value) -> PayslipRecord {
        let raw: RawRecord = serde_json::from_value(value).unwrap();
        let items = extract_line_items(&raw);
        normalize(&raw, items, &PayslipDefaults::default())
    }

    #[test]
    fn test_totals_derived_from_flat_fields() {
        let record = normalized(json!({
            "employee_number": "BRG-01",
            "basic_amount": 65000,
            "internet_amount": 7000,
            "transport_amount": 5000,
            "income_tax": 5000
        }));

        assert_eq!(record.gross_earnings, "77,000");
        assert_eq!(record.total_deductions, "5,000");
        assert_eq!(record.net_payable, "72,000");
    }

    #[test]
    fn test_supplied_gross_preserved_over_row_sum() {
        let record = normalized(json!({
            "basic_amount": 65000,
            "gross_earnings": 80000
        }));
        // disagreement with the row sum is deliberate: the override wins
        assert_eq!(record.gross_earnings, "80,000");
    }

    #[test]
    fn test_net_uses_overridden_totals() {
        let record = normalized(json!({
            "basic_amount": 10,
            "income_tax": 5,
            "gross_earnings": 90000,
            "total_deductions": 15000
        }));
        assert_eq!(record.net_payable, "75,000");
    }

    #[test]
    fn test_zero_override_is_not_absence() {
        let record = normalized(json!({
            "basic_amount": 65000,
            "gross_earnings": 0
        }));
        assert_eq!(record.gross_earnings, "0");
    }

    #[test]
    fn test_derived_sum_degroups_formatted_rows() {
        let record = normalized(json!({
            "earning:Housing": "1,200,000",
            "earning:Bonus": "300,000"
        }));
        assert_eq!(record.gross_earnings, "1,500,000");
    }

    #[test]
    fn test_every_field_defined_for_empty_input() {
        let record = normalized(json!({}));

        assert_eq!(record.company_name, "BRIDGEOCEAN LIMITED");
        assert_eq!(record.company_address, "Ajah, Lagos");
        assert_eq!(record.employee_number, "EMP-0001");
        assert_eq!(record.payslip_month, PLACEHOLDER);
        assert_eq!(record.employee_name, PLACEHOLDER);
        assert_eq!(record.pay_period, PLACEHOLDER);
        assert_eq!(record.paid_days, PLACEHOLDER);
        assert_eq!(record.pay_date, PLACEHOLDER);
        assert_eq!(record.loss_of_pay_days, "0");
        assert_eq!(record.gross_earnings, "0");
        assert_eq!(record.total_deductions, "0");
        assert_eq!(record.net_payable, "0");
        assert_eq!(record.amount_in_words, "");
        assert_eq!(record.notes, "");
        assert_eq!(record.earnings.len(), 3);
        assert_eq!(record.deductions.len(), 3);
    }

    #[test]
    fn test_pay_period_defaults_to_payslip_month() {
        let record = normalized(json!({"payslip_month": "October 2025"}));
        assert_eq!(record.pay_period, "October 2025");

        let record = normalized(json!({
            "payslip_month": "October 2025",
            "pay_period": "01-15 October 2025"
        }));
        assert_eq!(record.pay_period, "01-15 October 2025");
    }

    #[test]
    fn test_empty_string_is_a_value() {
        // explicit empty strings survive; only absence and null default
        let record = normalized(json!({"employee_name": "", "pay_date": null}));
        assert_eq!(record.employee_name, "");
        assert_eq!(record.pay_date, PLACEHOLDER);
    }

    #[test]
    fn test_numeric_day_counts_display_verbatim() {
        let record = normalized(json!({"paid_days": 10, "loss_of_pay_days": 2}));
        assert_eq!(record.paid_days, "10");
        assert_eq!(record.loss_of_pay_days, "2");
    }
}
