use json::JsonValue;
use std::sync::Arc;
use uuid::Uuid;

use service::error::Error;
use service::utils::json::{JsonMerge, JsonParams};
use service::{Data, Params, Service};

use crate::app::Application;
use crate::storage::{region_for, Record};

pub struct Records {
  app: Application,
  path: Arc<String>,
}

impl Records {
  pub fn new(app: Application) -> Arc<dyn Service> {
    Arc::new(Records { app, path: Arc::new("records".to_string()) })
  }
}

impl Service for Records {
  fn path(&self) -> &str {
    &self.path
  }

  fn find(&self, params: Params) -> service::Result {
    let records = self.app.workbook.records()?;

    let filter = &self.params(&params)["filter"];
    if filter.is_object() {
      // lookup by key, at most one match, first row in sheet order wins
      let list: Vec<JsonValue> =
        lookup(&records, filter).iter().map(|r| r.to_json()).collect();
      let total = list.len();

      return Ok(json::object! {
        data: JsonValue::Array(list),
        total: total,
        "$skip": 0,
      });
    }

    let limit = self.limit(&params);
    let skip = self.skip(&params);

    let total = records.len();
    let list: Vec<JsonValue> =
      records.iter().skip(skip).take(limit).map(|r| r.to_json()).collect();

    Ok(json::object! {
      data: JsonValue::Array(list),
      total: total,
      "$skip": skip,
    })
  }

  fn get(&self, id: String, _params: Params) -> service::Result {
    let records = self.app.workbook.records()?;

    match records.iter().find(|r| r.id == id) {
      Some(record) => Ok(record.to_json()),
      None => Err(Error::NotFound(format!("record {id}"))),
    }
  }

  fn create(&self, data: Data, _params: Params) -> service::Result {
    let mut record = Record::from_json(&data)?;

    record.id = Uuid::new_v4().to_string();
    record.region = region_for(&self.app.workbook.salesmen()?, &record.salesman);

    let mut records = self.app.workbook.records()?;
    records.push(record.clone());
    self.app.workbook.write_records(&records)?;

    log::debug!("created record {} so_no {}", record.id, record.so_no);

    Ok(record.to_json())
  }

  fn update(&self, id: String, data: Data, _params: Params) -> service::Result {
    if !data.is_object() {
      return Err(Error::GeneralError("only object allowed".into()));
    }

    let mut records = self.app.workbook.records()?;
    let position = records
      .iter()
      .position(|r| r.id == id)
      .ok_or_else(|| Error::NotFound(format!("record {id}")))?;

    let mut record = Record::from_json(&data)?;
    record.id = records[position].id.clone();
    record.created_at = records[position].created_at;
    record.region = region_for(&self.app.workbook.salesmen()?, &record.salesman);

    records[position] = record.clone();
    self.app.workbook.write_records(&records)?;

    log::debug!("updated record {}", record.id);

    Ok(record.to_json())
  }

  fn patch(&self, id: String, data: Data, params: Params) -> service::Result {
    if !data.is_object() {
      return Err(Error::GeneralError("only object allowed".into()));
    }

    let records = self.app.workbook.records()?;
    let current = records
      .iter()
      .find(|r| r.id == id)
      .ok_or_else(|| Error::NotFound(format!("record {id}")))?;

    let mut obj = current.to_json();

    let mut patch = data.clone();
    patch.remove("_id");
    obj.merge(&patch);

    self.update(id, obj, params)
  }

  fn remove(&self, _id: String, _params: Params) -> service::Result {
    // records are never deleted by the application
    Err(Error::NotImplemented)
  }
}

fn lookup<'a>(records: &'a [Record], filter: &JsonValue) -> Option<&'a Record> {
  if let Some(so_no) = key(&filter["so_no"]) {
    records.iter().find(|r| r.so_no.trim().to_lowercase() == so_no)
  } else if let Some(po_no) = key(&filter["customer_po_no"]) {
    records.iter().find(|r| r.customer_po_no.trim().to_lowercase() == po_no)
  } else {
    None
  }
}

fn key(value: &JsonValue) -> Option<String> {
  value
    .string_or_none()
    .map(|s| s.trim().to_lowercase())
    .filter(|s| !s.is_empty())
}
