use std::str::FromStr;

use chrono::NaiveDate;
use json::JsonValue;
use rust_decimal::Decimal;

use crate::error::Error;

pub trait JsonParams {
  fn string(&self) -> String;

  fn string_or_none(&self) -> Option<String>;

  fn number(&self) -> Decimal;
  fn number_or_none(&self) -> Option<Decimal>;

  fn date(&self) -> Result<NaiveDate, Error>;
  fn date_or_none(&self) -> Result<Option<NaiveDate>, Error>;
}

impl JsonParams for JsonValue {
  fn string(&self) -> String {
    self.as_str().unwrap_or("").to_string()
  }

  fn string_or_none(&self) -> Option<String> {
    self.as_str().map(|s| s.to_string())
  }

  fn number(&self) -> Decimal {
    self.number_or_none().unwrap_or_default()
  }

  fn number_or_none(&self) -> Option<Decimal> {
    if self.is_number() {
      Decimal::from_str(&self.to_string()).ok()
    } else if let Some(s) = self.as_str() {
      Decimal::from_str(s.trim()).ok()
    } else {
      None
    }
  }

  fn date(&self) -> Result<NaiveDate, Error> {
    match self.date_or_none()? {
      Some(date) => Ok(date),
      None => Err(Error::Validation(format!("incorrect date `{}`", self))),
    }
  }

  fn date_or_none(&self) -> Result<Option<NaiveDate>, Error> {
    match self.as_str() {
      None | Some("") => Ok(None),
      Some(s) => super::time::string_to_date(s).map(Some),
    }
  }
}

pub trait JsonMerge {
  fn merge(&mut self, patch: &JsonValue);
}

impl JsonMerge for JsonValue {
  fn merge(&mut self, patch: &JsonValue) {
    for (n, v) in patch.entries() {
      self[n] = v.clone();
    }
  }
}
