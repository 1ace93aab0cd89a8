//! Line-item extraction from raw records.
//!
//! Three sources, tried in order per side: a pre-shaped `earnings` /
//! `deductions` array (the single-record form payload), ad-hoc
//! `earning:<label>` / `deduction:<label>` columns (the CSV convention),
//! and finally the canonical fixed rows sourced from the legacy flat
//! fields. A side never ends up empty.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::payslip::format::{coerce_amount, format_amount};
use crate::payslip::models::{LineItem, LineItems, RawRecord};

const EARNING_PREFIX: &str = "earning:";
const DEDUCTION_PREFIX: &str = "deduction:";

const EARNING_FALLBACK: [(&str, &str); 3] = [
    ("Basic", "basic_amount"),
    ("Internet and communication", "internet_amount"),
    ("Transport reimbursement", "transport_amount"),
];

const DEDUCTION_FALLBACK: [(&str, &str); 3] = [
    ("Income Tax", "income_tax"),
    ("Provident Fund", "provident_fund"),
    ("Unpaid Leaves", "unpaid_leaves"),
];

/// Extract the earning and deduction rows from one raw record.
pub fn extract_line_items(raw: &RawRecord) -> LineItems {
    LineItems {
        earnings: extract_side(raw, "earnings", EARNING_PREFIX, &EARNING_FALLBACK),
        deductions: extract_side(raw, "deductions", DEDUCTION_PREFIX, &DEDUCTION_FALLBACK),
    }
}

fn extract_side(
    raw: &RawRecord,
    array_key: &str,
    prefix: &str,
    fallback: &[(&str, &str)],
) -> Vec<LineItem> {
    if let Some(rows) = preshaped_rows(raw, array_key) {
        if !rows.is_empty() {
            return rows;
        }
    }

    let dynamic = dynamic_rows(raw, prefix);
    if !dynamic.is_empty() {
        return dynamic;
    }

    fallback_rows(raw, fallback)
}

/// Rows already shaped as `[{label, amount}, ...]` by the form client.
fn preshaped_rows(raw: &RawRecord, key: &str) -> Option<Vec<LineItem>> {
    let Value::Array(rows) = raw.get(key)? else {
        return None;
    };

    let mut items = Vec::new();
    for row in rows {
        let Value::Object(row) = row else { continue };
        let label = match row.get("label") {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Number(label)) => label.to_string(),
            _ => continue,
        };
        let amount = row.get("amount").map(coerce_amount).unwrap_or(Decimal::ZERO);
        items.push(LineItem {
            label,
            amount: format_amount(amount),
        });
    }
    Some(items)
}

/// Rows discovered through prefixed keys, in insertion order.
fn dynamic_rows(raw: &RawRecord, prefix: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    for (key, value) in raw.entries() {
        if let Some(label) = strip_prefix_ci(key, prefix) {
            items.push(LineItem {
                label: label.trim().to_string(),
                amount: format_amount(coerce_amount(value)),
            });
        }
    }
    items
}

fn fallback_rows(raw: &RawRecord, rows: &[(&str, &str)]) -> Vec<LineItem> {
    rows.iter()
        .map(|(label, field)| LineItem {
            label: (*label).to_string(),
            amount: format_amount(raw.amount(field).unwrap_or(Decimal::ZERO)),
        })
        .collect()
}

/// Case-insensitive prefix strip. Prefixes are ASCII, so the boundary
/// check guards against keys whose leading bytes are multi-byte UTF-8.
fn strip_prefix_ci<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    if key.len() < prefix.len() || !key.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = key.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix).then_some(tail)
}
