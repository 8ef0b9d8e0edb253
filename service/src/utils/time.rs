use crate::error::Error;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

pub fn string_to_time<S: AsRef<str>>(data: S) -> Result<DateTime<Utc>, Error> {
  DateTime::parse_from_rfc3339(data.as_ref())
    .map(|ts| ts.into())
    .map_err(|_| Error::GeneralError(format!("incorrect date-time {}", data.as_ref())))
}

pub fn time_to_string(time: DateTime<Utc>) -> String {
  time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn string_to_date<S: AsRef<str>>(data: S) -> Result<NaiveDate, Error> {
  // date columns keep plain `2023-01-31` values, a workbook edited by hand
  // may carry a time part after them
  let data = data.as_ref().trim();
  let head = data.get(..10).unwrap_or(data);

  NaiveDate::parse_from_str(head, "%Y-%m-%d")
    .map_err(|_| Error::Validation(format!("incorrect date `{data}`")))
}

pub fn date_to_string(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}
