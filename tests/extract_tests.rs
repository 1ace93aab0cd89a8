use payslip_server::payslip::extract::extract_line_items;
use payslip_server::payslip::models::{parse_csv_records, RawRecord};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_no_dynamic_columns_yields_canonical_triples() {
    let items = extract_line_items(&raw(json!({"employee_number": "BRG-01"})));

    let earning_labels: Vec<&str> = items.earnings.iter().map(|i| i.label.as_str()).collect();
    let deduction_labels: Vec<&str> = items.deductions.iter().map(|i| i.label.as_str()).collect();

    assert_eq!(
        earning_labels,
        vec!["Basic", "Internet and communication", "Transport reimbursement"]
    );
    assert_eq!(
        deduction_labels,
        vec!["Income Tax", "Provident Fund", "Unpaid Leaves"]
    );
}

#[test]
fn test_dynamic_columns_replace_canonical_rows() {
    let items = extract_line_items(&raw(json!({
        "earning:Housing": 1000,
        "deduction:Pension": 200
    })));

    assert_eq!(items.earnings.len(), 1);
    assert_eq!(items.earnings[0].label, "Housing");
    assert_eq!(items.earnings[0].amount, "1,000");
    assert_eq!(items.deductions.len(), 1);
    assert_eq!(items.deductions[0].label, "Pension");
    assert_eq!(items.deductions[0].amount, "200");
}

#[test]
fn test_csv_row_order_survives_extraction() {
    let csv = b"employee_number,earning:Overtime,earning:Basic,earning:Housing,deduction:Tax\n\
BRG-01,100,65000,20000,5000\n";
    let records = parse_csv_records(csv).unwrap();
    let items = extract_line_items(&records[0]);

    let labels: Vec<&str> = items.earnings.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Overtime", "Basic", "Housing"]);
}

#[test]
fn test_legacy_flat_fields_feed_canonical_rows() {
    let items = extract_line_items(&raw(json!({
        "basic_amount": "65,000",
        "transport_amount": 5000,
        "unpaid_leaves": 1500
    })));

    assert_eq!(items.earnings[0].amount, "65,000");
    assert_eq!(items.earnings[1].amount, "0");
    assert_eq!(items.earnings[2].amount, "5,000");
    assert_eq!(items.deductions[2].amount, "1,500");
}

#[test]
fn test_blank_dynamic_values_coerce_to_zero() {
    let items = extract_line_items(&raw(json!({
        "earning:Housing": "",
        "earning:Bonus": "n/a"
    })));
    assert_eq!(items.earnings[0].amount, "0");
    assert_eq!(items.earnings[1].amount, "0");
}

#[test]
fn test_label_is_remainder_after_first_colon() {
    let items = extract_line_items(&raw(json!({
        "earning:Transport: site visits": 4000
    })));
    assert_eq!(items.earnings[0].label, "Transport: site visits");
}
