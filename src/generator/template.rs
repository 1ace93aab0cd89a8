//! Printable payslip document markup.
//!
//! Pure string building: one normalized record in, one self-contained
//! HTML page out, deterministic for a given record. The stylesheet is
//! sized for A4 print and the currency symbol is added here, not by the
//! amount formatter.

use crate::payslip::models::{LineItem, PayslipRecord};

use super::common::{escape_html, escape_html_multiline};

const CURRENCY_SYMBOL: &str = "\u{20a6}";

const STYLES: &str = r#"
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { font-family: Inter, system-ui, Arial, sans-serif; font-size: 13px; color: #222; }
  .sheet { max-width: 760px; margin: 0 auto; padding: 24px; }
  header { display: flex; justify-content: space-between; align-items: flex-start;
           border-bottom: 2px solid #222; padding-bottom: 16px; }
  header img.logo { max-height: 64px; }
  .company h1 { font-size: 20px; letter-spacing: 0.5px; }
  .company p { color: #555; margin-top: 4px; }
  h2.title { text-align: center; margin: 18px 0; font-size: 15px;
             text-transform: uppercase; letter-spacing: 1px; }
  table.meta { width: 100%; border-collapse: collapse; margin-bottom: 18px; }
  table.meta td { padding: 4px 8px; }
  table.meta td.label { color: #555; width: 22%; white-space: nowrap; }
  table.lines { width: 100%; border-collapse: collapse; margin-bottom: 14px; }
  table.lines th { text-align: left; background: #f3f3f3; padding: 6px 8px;
                   border: 1px solid #ddd; }
  table.lines th.amount, table.lines td.amount { text-align: right; width: 30%; }
  table.lines td { padding: 6px 8px; border: 1px solid #ddd; }
  table.lines tr.total td { font-weight: 600; background: #fafafa; }
  .net { border: 2px solid #222; border-radius: 6px; padding: 12px 16px;
         display: flex; justify-content: space-between; align-items: center;
         margin: 18px 0; }
  .net .figure { font-size: 18px; font-weight: 700; }
  .words { color: #555; font-style: italic; }
  .notes { margin-top: 16px; color: #555; border-top: 1px solid #ddd; padding-top: 10px; }
  @page { size: A4; margin: 20mm 12mm; }
"#;

/// Build the complete payslip page for one record.
pub fn build_html(record: &PayslipRecord, logo_data_uri: Option<&str>) -> String {
    let logo = match logo_data_uri {
        Some(uri) => format!(r#"<img class="logo" src="{}" alt="logo">"#, uri),
        None => String::new(),
    };

    let amount_in_words = if record.amount_in_words.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="words">{}</span>"#,
            escape_html(&record.amount_in_words)
        )
    };

    let notes = if record.notes.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="notes"><b>Notes:</b> {}</div>"#,
            escape_html_multiline(&record.notes)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>{styles}</style>
</head>
<body>
<div class="sheet">
  <header>
    <div class="company">
      <h1>{company_name}</h1>
      <p>{company_address}</p>
    </div>
    {logo}
  </header>
  <h2 class="title">Payslip for the month of {payslip_month}</h2>
  <table class="meta">
    <tr>
      <td class="label">Employee Name</td><td>{employee_name}</td>
      <td class="label">Employee Number</td><td>{employee_number}</td>
    </tr>
    <tr>
      <td class="label">Pay Period</td><td>{pay_period}</td>
      <td class="label">Pay Date</td><td>{pay_date}</td>
    </tr>
    <tr>
      <td class="label">Paid Days</td><td>{paid_days}</td>
      <td class="label">Loss of Pay Days</td><td>{loss_of_pay_days}</td>
    </tr>
  </table>
{earnings}
{deductions}
  <div class="net">
    <div>
      <div><b>Total Net Payable</b></div>
      {amount_in_words}
    </div>
    <div class="figure">{currency} {net_payable}</div>
  </div>
  {notes}
</div>
</body>
</html>
"#,
        styles = STYLES,
        company_name = escape_html(&record.company_name),
        company_address = escape_html_multiline(&record.company_address),
        logo = logo,
        payslip_month = escape_html(&record.payslip_month),
        employee_name = escape_html(&record.employee_name),
        employee_number = escape_html(&record.employee_number),
        pay_period = escape_html(&record.pay_period),
        pay_date = escape_html(&record.pay_date),
        paid_days = escape_html(&record.paid_days),
        loss_of_pay_days = escape_html(&record.loss_of_pay_days),
        earnings = lines_table(
            "Earnings",
            &record.earnings,
            "Gross Earnings",
            &record.gross_earnings,
        ),
        deductions = lines_table(
            "Deductions",
            &record.deductions,
            "Total Deductions",
            &record.total_deductions,
        ),
        amount_in_words = amount_in_words,
        currency = CURRENCY_SYMBOL,
        net_payable = escape_html(&record.net_payable),
        notes = notes,
    )
}

fn lines_table(title: &str, items: &[LineItem], total_label: &str, total: &str) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            "    <tr><td>{}</td><td class=\"amount\">{} {}</td></tr>\n",
            escape_html(&item.label),
            CURRENCY_SYMBOL,
            escape_html(&item.amount),
        ));
    }

    format!(
        r#"  <table class="lines">
    <tr><th>{title}</th><th class="amount">Amount</th></tr>
{rows}    <tr class="total"><td>{total_label}</td><td class="amount">{currency} {total}</td></tr>
  </table>"#,
        title = escape_html(title),
        rows = rows,
        total_label = escape_html(total_label),
        currency = CURRENCY_SYMBOL,
        total = escape_html(total),
    )
}
