use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use json::JsonValue;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use service::error::Error;
use service::utils::json::JsonParams;
use service::utils::time::{date_to_string, string_to_date, string_to_time, time_to_string};

use super::salesmen::Region;

// column order of the Records sheet, one row per record
pub(crate) const COLUMNS: [&str; 18] = [
  "record_id",
  "Date of Request",
  "SalesMan",
  "Region",
  "Customer Name",
  "Customer PO No",
  "SalesForce Reference",
  "SO No",
  "Amount (EUR)",
  "Total Discount (%)",
  "CPI (EUR)",
  "CPS (EUR)",
  "Defination", // spelling kept as in the workbook
  "Date of Delivery",
  "Date of Invoice",
  "Note",
  "created_at",
  "updated_at",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
  pub id: String,
  pub date_of_request: NaiveDate,
  pub salesman: String,
  pub region: Region,
  pub customer_name: String,
  pub customer_po_no: String,
  pub salesforce_reference: String,
  pub so_no: String,
  pub amount: Decimal,
  pub total_discount_pct: Decimal,
  pub cpi: Decimal,
  pub cps: Decimal,
  pub definition: Option<String>,
  pub date_of_delivery: Option<NaiveDate>,
  pub date_of_invoice: Option<NaiveDate>,
  pub note: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Record {
  // required fields checked here, derived fields (region, cpi) and stamps
  // are the write path's business
  pub fn from_json(data: &JsonValue) -> Result<Record, Error> {
    if !data.is_object() {
      return Err(Error::GeneralError("only object allowed".into()));
    }

    let now = Utc::now();

    let mut record = Record {
      id: data["_id"].string(),
      date_of_request: required(data, "date_of_request")?.date()?,
      salesman: required_string(data, "salesman")?,
      region: Region::Unassigned,
      customer_name: required_string(data, "customer_name")?,
      customer_po_no: required_string(data, "customer_po_no")?,
      salesforce_reference: required_string(data, "salesforce_reference")?,
      so_no: required_string(data, "so_no")?,
      amount: required_number(data, "amount")?,
      total_discount_pct: required_number(data, "total_discount_pct")?,
      cpi: Decimal::ZERO,
      cps: data["cps"].number(),
      definition: optional_string(&data["definition"]),
      date_of_delivery: data["date_of_delivery"].date_or_none()?,
      date_of_invoice: data["date_of_invoice"].date_or_none()?,
      note: optional_string(&data["note"]),
      created_at: now,
      updated_at: now,
    };
    record.derive_cpi();

    Ok(record)
  }

  // CPI is recomputed on every write, it is never taken from input
  pub fn derive_cpi(&mut self) {
    self.cpi = if self.cps > Decimal::ZERO { self.amount - self.cps } else { self.amount };
  }

  pub fn to_json(&self) -> JsonValue {
    json::object! {
      _id: self.id.clone(),
      date_of_request: date_to_string(self.date_of_request),
      salesman: self.salesman.clone(),
      region: self.region.as_str(),
      customer_name: self.customer_name.clone(),
      customer_po_no: self.customer_po_no.clone(),
      salesforce_reference: self.salesforce_reference.clone(),
      so_no: self.so_no.clone(),
      amount: money(self.amount),
      total_discount_pct: money(self.total_discount_pct),
      cpi: money(self.cpi),
      cps: money(self.cps),
      definition: self.definition.clone(),
      date_of_delivery: self.date_of_delivery.map(date_to_string),
      date_of_invoice: self.date_of_invoice.map(date_to_string),
      note: self.note.clone(),
      created_at: time_to_string(self.created_at),
      updated_at: time_to_string(self.updated_at),
    }
  }

  pub(crate) fn from_row(cells: &[String]) -> Option<Record> {
    let id = cell(cells, 0);
    if id.is_empty() {
      return None;
    }

    // a row with an unreadable request date cannot be reported on, skip it
    let date_of_request = string_to_date(cell(cells, 1)).ok()?;

    Some(Record {
      id: id.to_string(),
      date_of_request,
      salesman: cell(cells, 2).to_string(),
      region: Region::from_cell(cell(cells, 3)),
      customer_name: cell(cells, 4).to_string(),
      customer_po_no: cell(cells, 5).to_string(),
      salesforce_reference: cell(cells, 6).to_string(),
      so_no: cell(cells, 7).to_string(),
      amount: decimal(cell(cells, 8)),
      total_discount_pct: decimal(cell(cells, 9)),
      cpi: decimal(cell(cells, 10)),
      cps: decimal(cell(cells, 11)),
      definition: optional_cell(cells, 12),
      date_of_delivery: string_to_date(cell(cells, 13)).ok(),
      date_of_invoice: string_to_date(cell(cells, 14)).ok(),
      note: optional_cell(cells, 15),
      created_at: string_to_time(cell(cells, 16)).unwrap_or_else(|_| Utc::now()),
      updated_at: string_to_time(cell(cells, 17)).unwrap_or_else(|_| Utc::now()),
    })
  }

  pub(crate) fn to_row(&self) -> Vec<String> {
    vec![
      self.id.clone(),
      date_to_string(self.date_of_request),
      self.salesman.clone(),
      self.region.as_str().to_string(),
      self.customer_name.clone(),
      self.customer_po_no.clone(),
      self.salesforce_reference.clone(),
      self.so_no.clone(),
      format!("{:.2}", self.amount),
      format!("{:.2}", self.total_discount_pct),
      format!("{:.2}", self.cpi),
      format!("{:.2}", self.cps),
      self.definition.clone().unwrap_or_default(),
      self.date_of_delivery.map(date_to_string).unwrap_or_default(),
      self.date_of_invoice.map(date_to_string).unwrap_or_default(),
      self.note.clone().unwrap_or_default(),
      time_to_string(self.created_at),
      time_to_string(self.updated_at),
    ]
  }
}

pub(crate) fn money(value: Decimal) -> f64 {
  value.round_dp(2).to_f64().unwrap_or_default()
}

fn cell(cells: &[String], index: usize) -> &str {
  cells.get(index).map(|s| s.as_str()).unwrap_or("")
}

fn optional_cell(cells: &[String], index: usize) -> Option<String> {
  let value = cell(cells, index);
  if value.is_empty() {
    None
  } else {
    Some(value.to_string())
  }
}

fn decimal(value: &str) -> Decimal {
  Decimal::from_str(value.trim()).unwrap_or_default()
}

fn required<'a>(data: &'a JsonValue, name: &str) -> Result<&'a JsonValue, Error> {
  let value = &data[name];
  if value.is_null() || value.string().trim().is_empty() {
    Err(Error::Validation(format!("`{name}` is required")))
  } else {
    Ok(value)
  }
}

fn required_string(data: &JsonValue, name: &str) -> Result<String, Error> {
  let value = data[name].string();
  if value.trim().is_empty() {
    Err(Error::Validation(format!("`{name}` is required")))
  } else {
    Ok(value)
  }
}

fn required_number(data: &JsonValue, name: &str) -> Result<Decimal, Error> {
  data[name]
    .number_or_none()
    .ok_or_else(|| Error::Validation(format!("`{name}` is required")))
}

fn optional_string(value: &JsonValue) -> Option<String> {
  match value.string_or_none() {
    Some(s) if !s.is_empty() => Some(s),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn data() -> JsonValue {
    json::object! {
      date_of_request: "2024-03-05",
      salesman: "Mehmet",
      customer_name: "Acme",
      customer_po_no: "PO-77",
      salesforce_reference: "SF-1",
      so_no: "SO-100",
      amount: 1500.5,
      total_discount_pct: 10,
      cps: 0,
    }
  }

  #[test]
  fn cpi_equals_amount_when_cps_is_zero() {
    let record = Record::from_json(&data()).unwrap();
    assert_eq!(record.cpi, record.amount);
  }

  #[test]
  fn cpi_is_amount_minus_cps_when_cps_is_positive() {
    let mut data = data();
    data["cps"] = 500.into();

    let record = Record::from_json(&data).unwrap();
    assert_eq!(record.cpi, Decimal::new(10005, 1)); // 1500.5 - 500
  }

  #[test]
  fn cpi_from_input_is_ignored() {
    let mut data = data();
    data["cpi"] = 1.into();

    let record = Record::from_json(&data).unwrap();
    assert_eq!(record.cpi, record.amount);
  }

  #[test]
  fn missing_required_field_is_a_validation_error() {
    for name in
      ["date_of_request", "salesman", "customer_name", "customer_po_no", "so_no", "amount"]
    {
      let mut data = data();
      data.remove(name);

      match Record::from_json(&data) {
        Err(Error::Validation(message)) => assert!(message.contains(name)),
        other => panic!("expected validation error for `{name}`, got {other:?}"),
      }
    }
  }

  #[test]
  fn row_round_trip_keeps_optional_fields() {
    let mut data = data();
    data["definition"] = "tooling".into();
    data["date_of_invoice"] = "2024-04-01".into();

    let mut record = Record::from_json(&data).unwrap();
    record.id = "a2e8b1c4-0000-0000-0000-000000000000".into();

    let restored = Record::from_row(&record.to_row()).unwrap();
    assert_eq!(restored.definition.as_deref(), Some("tooling"));
    assert_eq!(restored.date_of_invoice, record.date_of_invoice);
    assert_eq!(restored.date_of_delivery, None);
    assert_eq!(restored.note, None);
    assert_eq!(restored.so_no, record.so_no);
    assert_eq!(restored.amount, record.amount);
  }

  #[test]
  fn rows_without_id_are_skipped() {
    assert_eq!(Record::from_row(&vec!["".to_string(); COLUMNS.len()]), None);
  }
}
