use json::JsonValue;
use std::sync::Arc;

use service::error::Error;
use service::{Data, Params, Service};

use crate::app::Application;
use crate::storage::{Region, Salesman};

pub struct Salesmen {
  app: Application,
  path: Arc<String>,
}

impl Salesmen {
  pub fn new(app: Application) -> Arc<dyn Service> {
    Arc::new(Salesmen { app, path: Arc::new("salesmen".to_string()) })
  }
}

impl Service for Salesmen {
  fn path(&self) -> &str {
    &self.path
  }

  fn find(&self, params: Params) -> service::Result {
    let limit = self.limit(&params);
    let skip = self.skip(&params);

    let salesmen = self.app.workbook.salesmen()?;

    let total = salesmen.len();
    let list: Vec<JsonValue> =
      salesmen.iter().skip(skip).take(limit).map(|s| s.to_json()).collect();

    Ok(json::object! {
      data: JsonValue::Array(list),
      total: total,
      "$skip": skip,
    })
  }

  fn get(&self, id: String, _params: Params) -> service::Result {
    let salesmen = self.app.workbook.salesmen()?;

    match salesmen.iter().find(|s| s.matches(&id)) {
      Some(salesman) => Ok(salesman.to_json()),
      None => Err(Error::NotFound(format!("salesman {id}"))),
    }
  }

  // single object upserts by name, an array replaces the whole mapping
  fn create(&self, data: Data, _params: Params) -> service::Result {
    if data.is_array() {
      let items: Vec<Salesman> =
        data.members().map(Salesman::from_json).collect::<Result<_, _>>()?;

      self.app.workbook.write_salesmen(&items)?;

      let list: Vec<JsonValue> = items.iter().map(|s| s.to_json()).collect();
      return Ok(JsonValue::Array(list));
    }

    let item = Salesman::from_json(&data)?;

    let mut salesmen = self.app.workbook.salesmen()?;
    match salesmen.iter().position(|s| s.matches(&item.name)) {
      Some(position) => salesmen[position].region = item.region,
      None => salesmen.push(item.clone()),
    }
    self.app.workbook.write_salesmen(&salesmen)?;

    Ok(item.to_json())
  }

  fn update(&self, id: String, data: Data, _params: Params) -> service::Result {
    if !data.is_object() {
      return Err(Error::GeneralError("only object allowed".into()));
    }

    let region = Region::from_json(&data["region"])?;

    let mut salesmen = self.app.workbook.salesmen()?;
    let salesman = salesmen
      .iter_mut()
      .find(|s| s.matches(&id))
      .ok_or_else(|| Error::NotFound(format!("salesman {id}")))?;

    salesman.region = region;
    let result = salesman.to_json();

    self.app.workbook.write_salesmen(&salesmen)?;

    Ok(result)
  }

  fn patch(&self, id: String, data: Data, params: Params) -> service::Result {
    // the mapping has a single mutable field, patch and update coincide
    self.update(id, data, params)
  }

  fn remove(&self, _id: String, _params: Params) -> service::Result {
    Err(Error::NotImplemented)
  }
}
