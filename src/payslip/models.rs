use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::payslip::format::coerce_amount;

/// One raw payslip submission before normalization.
///
/// No schema is enforced: any field may be missing and values may be
/// numbers, strings or anything else the client sent. Keys iterate in
/// insertion order, which the dynamic column extractor relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RawRecord(#[schema(value_type = Object)] pub Map<String, Value>);

impl RawRecord {
    /// Value for `key` if it is present and not JSON null.
    ///
    /// Presence is the only thing checked here: an explicit empty string
    /// or zero is a value, not an absence.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Scalar display text for `key`, if one is present.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Amount for `key`, if the key is present. A present-but-garbage
    /// value coerces to zero, which still counts as an explicit value.
    pub fn amount(&self, key: &str) -> Option<Decimal> {
        self.get(key).map(coerce_amount)
    }

    /// All entries in insertion order, nulls included.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// One labeled earning or deduction row, amount already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    #[schema(example = "Basic")]
    pub label: String,
    #[schema(example = "65,000")]
    pub amount: String,
}

/// The earning and deduction rows extracted from one raw record.
#[derive(Debug, Clone, Default)]
pub struct LineItems {
    pub earnings: Vec<LineItem>,
    pub deductions: Vec<LineItem>,
}

/// A fully-defined payslip, ready for rendering.
///
/// Constructed fresh per request or batch row; every field is populated
/// (from input or a default) and never mutated afterwards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayslipRecord {
    pub company_name: String,
    pub company_address: String,
    pub payslip_month: String,
    pub employee_name: String,
    pub employee_number: String,
    pub pay_period: String,
    pub paid_days: String,
    pub pay_date: String,
    pub loss_of_pay_days: String,
    pub earnings: Vec<LineItem>,
    pub deductions: Vec<LineItem>,
    pub gross_earnings: String,
    pub total_deductions: String,
    pub net_payable: String,
    pub amount_in_words: String,
    pub notes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkGenerateRequest {
    pub records: Vec<RawRecord>,
}

/// Parse an uploaded CSV table into raw records.
///
/// The header row supplies the keys; column order is preserved so that
/// dynamic earning:/deduction: columns keep their CSV ordering. Every
/// cell stays a string; coercion happens during normalization.
pub fn parse_csv_records(data: &[u8]) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut fields = Map::new();
        for (key, cell) in headers.iter().zip(row.iter()) {
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), Value::String(cell.to_string()));
        }
        records.push(RawRecord(fields));
    }
    Ok(records)
}
