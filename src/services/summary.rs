use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use json::JsonValue;
use rust_decimal::Decimal;

use service::error::Error;
use service::{Data, Params, Service};

use crate::app::Application;
use crate::storage::records::money;
use crate::storage::{Record, Region};

// recomputed in full from the Records sheet on every call, no cache
pub struct SummaryReport {
  app: Application,
  name: Arc<String>,
}

impl SummaryReport {
  pub fn new(app: Application) -> Arc<dyn Service> {
    Arc::new(SummaryReport { app, name: Arc::new("summary-report".to_string()) })
  }
}

#[derive(Debug, Clone, Default)]
struct Totals {
  amount: Decimal,
  cpi: Decimal,
  cps: Decimal,
}

impl Service for SummaryReport {
  fn path(&self) -> &str {
    &self.name
  }

  fn find(&self, _params: Params) -> service::Result {
    let records = self.app.workbook.records()?;

    let by_region: Vec<JsonValue> = region_totals(&records)
      .iter()
      .map(|(region, totals)| {
        json::object! {
          region: region.as_str(),
          amount: money(totals.amount),
          cpi: money(totals.cpi),
          cps: money(totals.cps),
        }
      })
      .collect();

    let or_by_year: Vec<JsonValue> = or_totals(&records)
      .iter()
      .map(|(year, total)| json::object! { year: *year, total: money(*total) })
      .collect();

    let oi_by_year: Vec<JsonValue> = oi_totals(&records)
      .iter()
      .map(|(year, total)| json::object! { year: *year, total: money(*total) })
      .collect();

    let cpi: Decimal = records.iter().map(|r| r.cpi).sum();
    let cps: Decimal = records.iter().map(|r| r.cps).sum();

    Ok(json::object! {
      by_region: JsonValue::Array(by_region),
      or_by_year: JsonValue::Array(or_by_year),
      oi_by_year: JsonValue::Array(oi_by_year),
      cpi_vs_cps: [
        json::object! { metric: "CPI (EUR)", total: money(cpi) },
        json::object! { metric: "CPS (EUR)", total: money(cps) },
      ],
    })
  }

  fn get(&self, _id: String, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }

  fn create(&self, _data: Data, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }

  fn update(&self, _id: String, _data: Data, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }

  fn patch(&self, _id: String, _data: Data, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }

  fn remove(&self, _id: String, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }
}

// every record lands in exactly one region, Unassigned included, so the
// region totals reconcile with the grand total over all records
fn region_totals(records: &[Record]) -> BTreeMap<Region, Totals> {
  let mut totals = BTreeMap::new();

  for record in records {
    let entry: &mut Totals = totals.entry(record.region).or_default();
    entry.amount += record.amount;
    entry.cpi += record.cpi;
    entry.cps += record.cps;
  }

  totals
}

// Order Received, by year of the request date
fn or_totals(records: &[Record]) -> BTreeMap<i32, Decimal> {
  let mut totals = BTreeMap::new();

  for record in records {
    *totals.entry(record.date_of_request.year()).or_default() += record.amount;
  }

  totals
}

// Order Invoiced, only records carrying an invoice date, by its year
fn oi_totals(records: &[Record]) -> BTreeMap<i32, Decimal> {
  let mut totals = BTreeMap::new();

  for record in records {
    if let Some(date) = record.date_of_invoice {
      *totals.entry(date.year()).or_default() += record.cpi + record.cps;
    }
  }

  totals
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{NaiveDate, Utc};

  fn record(region: Region, requested: &str, invoiced: Option<&str>, amount: i64, cps: i64) -> Record {
    let mut record = Record {
      id: "r".into(),
      date_of_request: NaiveDate::parse_from_str(requested, "%Y-%m-%d").unwrap(),
      salesman: "s".into(),
      region,
      customer_name: "c".into(),
      customer_po_no: "po".into(),
      salesforce_reference: "sf".into(),
      so_no: "so".into(),
      amount: Decimal::from(amount),
      total_discount_pct: Decimal::ZERO,
      cpi: Decimal::ZERO,
      cps: Decimal::from(cps),
      definition: None,
      date_of_delivery: None,
      date_of_invoice: invoiced.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
      note: None,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };
    record.derive_cpi();
    record
  }

  #[test]
  fn region_totals_reconcile_with_grand_total() {
    let records = vec![
      record(Region::Northern, "2023-01-10", None, 100, 0),
      record(Region::Northern, "2023-02-10", None, 50, 20),
      record(Region::Southern, "2023-03-10", None, 70, 0),
      record(Region::Unassigned, "2023-04-10", None, 30, 0),
    ];

    let totals = region_totals(&records);
    let amount: Decimal = totals.values().map(|t| t.amount).sum();
    let grand: Decimal = records.iter().map(|r| r.amount).sum();
    assert_eq!(amount, grand);

    assert_eq!(totals[&Region::Northern].amount, Decimal::from(150));
    assert_eq!(totals[&Region::Northern].cpi, Decimal::from(130));
    assert_eq!(totals[&Region::Northern].cps, Decimal::from(20));
  }

  #[test]
  fn or_groups_by_year_of_request() {
    let records = vec![
      record(Region::Northern, "2022-12-31", None, 100, 0),
      record(Region::Northern, "2023-01-01", None, 40, 0),
      record(Region::Southern, "2023-06-15", None, 60, 0),
    ];

    let totals = or_totals(&records);
    assert_eq!(totals[&2022], Decimal::from(100));
    assert_eq!(totals[&2023], Decimal::from(100));
  }

  #[test]
  fn oi_covers_only_invoiced_records() {
    let records = vec![
      record(Region::Northern, "2022-01-10", Some("2023-02-01"), 100, 30),
      record(Region::Northern, "2022-02-10", None, 500, 0),
      record(Region::Southern, "2023-03-10", Some("2023-03-20"), 80, 0),
    ];

    let totals = oi_totals(&records);
    assert_eq!(totals.len(), 1);
    // CPI + CPS folds back to the full amount of each invoiced order
    assert_eq!(totals[&2023], Decimal::from(180));
  }
}
