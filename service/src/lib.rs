extern crate actix_web;
extern crate chrono;
extern crate json;

pub mod error;
pub mod utils;

use json::JsonValue;
use std::convert::TryFrom;
use std::sync::Arc;

use error::Error;

#[macro_use]
extern crate quick_error;

pub type Result = std::result::Result<JsonValue, Error>;
pub type Data = JsonValue;
pub type Params = JsonValue;

pub trait Services: Send + Sync {
  fn register(&mut self, service: Arc<dyn Service>);
  fn service<S: AsRef<str> + ToString>(&self, name: S) -> Arc<dyn Service>;
}

pub trait Service: Send + Sync {
  fn path(&self) -> &str;

  fn find(&self, params: Params) -> Result;
  fn get(&self, id: String, params: Params) -> Result;
  fn create(&self, data: Data, params: Params) -> Result;
  fn update(&self, id: String, data: Data, params: Params) -> Result;
  fn patch(&self, id: String, data: Data, params: Params) -> Result;
  fn remove(&self, id: String, params: Params) -> Result;

  fn limit(&self, params: &Params) -> usize {
    let params = self.params(params);

    if let Some(limit) = params["$limit"].as_number() {
      usize::try_from(limit).unwrap_or(10)
    } else {
      10
    }
  }

  fn skip(&self, params: &Params) -> usize {
    let params = self.params(params);

    if let Some(skip) = params["$skip"].as_number() {
      usize::try_from(skip).unwrap_or(0)
    } else {
      0
    }
  }

  fn params<'a>(&self, params: &'a Params) -> &'a JsonValue {
    if params.is_array() {
      &params[0]
    } else {
      params
    }
  }
}

pub struct NoService(pub String);

impl NoService {
  fn error(&self) -> Result {
    Err(Error::NotFound(format!("service {}", self.0)))
  }
}

impl Service for NoService {
  fn path(&self) -> &str {
    self.0.as_str()
  }

  fn find(&self, _params: Params) -> Result {
    self.error()
  }

  fn get(&self, _id: String, _params: Params) -> Result {
    self.error()
  }

  fn create(&self, _data: Data, _params: Params) -> Result {
    self.error()
  }

  fn update(&self, _id: String, _data: Data, _params: Params) -> Result {
    self.error()
  }

  fn patch(&self, _id: String, _data: Data, _params: Params) -> Result {
    self.error()
  }

  fn remove(&self, _id: String, _params: Params) -> Result {
    self.error()
  }
}
