use json::JsonValue;

use service::error::Error;
use service::utils::json::JsonParams;

pub(crate) const DATA_COLUMNS: [&str; 2] = ["SalesMan", "Region"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
  Northern,
  Southern,
  Unassigned,
}

impl Region {
  pub fn as_str(&self) -> &'static str {
    match self {
      Region::Northern => "CPI Northern",
      Region::Southern => "CPI Southern",
      Region::Unassigned => "Unassigned",
    }
  }

  pub fn parse(value: &str) -> Option<Region> {
    match value.trim() {
      "CPI Northern" => Some(Region::Northern),
      "CPI Southern" => Some(Region::Southern),
      "Unassigned" => Some(Region::Unassigned),
      _ => None,
    }
  }

  // cells survive hand edits, anything unknown falls back to Unassigned
  pub(crate) fn from_cell(value: &str) -> Region {
    Region::parse(value).unwrap_or(Region::Unassigned)
  }

  pub fn from_json(value: &JsonValue) -> Result<Region, Error> {
    match value.string_or_none() {
      None => Ok(Region::Unassigned),
      Some(s) if s.trim().is_empty() => Ok(Region::Unassigned),
      Some(s) => {
        Region::parse(&s).ok_or_else(|| Error::Validation(format!("unknown region `{s}`")))
      },
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Salesman {
  pub name: String,
  pub region: Region,
}

impl Salesman {
  pub fn from_json(data: &JsonValue) -> Result<Salesman, Error> {
    if !data.is_object() {
      return Err(Error::GeneralError("only object allowed".into()));
    }

    let name = data["name"].string();
    if name.trim().is_empty() {
      return Err(Error::Validation("`name` is required".into()));
    }

    Ok(Salesman { name: name.trim().to_string(), region: Region::from_json(&data["region"])? })
  }

  pub fn to_json(&self) -> JsonValue {
    json::object! {
      name: self.name.clone(),
      region: self.region.as_str(),
    }
  }

  pub(crate) fn from_row(cells: &[String]) -> Option<Salesman> {
    let name = cells.first()?.trim();
    if name.is_empty() {
      return None;
    }

    let region = Region::from_cell(cells.get(1).map(|s| s.as_str()).unwrap_or(""));

    Some(Salesman { name: name.to_string(), region })
  }

  pub(crate) fn to_row(&self) -> Vec<String> {
    vec![self.name.clone(), self.region.as_str().to_string()]
  }

  pub fn matches(&self, name: &str) -> bool {
    self.name.to_lowercase() == name.trim().to_lowercase()
  }
}

pub fn region_for(salesmen: &[Salesman], name: &str) -> Region {
  salesmen
    .iter()
    .find(|s| s.matches(name))
    .map(|s| s.region)
    .unwrap_or(Region::Unassigned)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn region_parse_is_strict_on_input() {
    assert_eq!(Region::parse("CPI Northern"), Some(Region::Northern));
    assert_eq!(Region::parse(" CPI Southern "), Some(Region::Southern));
    assert_eq!(Region::parse("Western"), None);

    assert!(Region::from_json(&json::JsonValue::from("Western")).is_err());
    assert_eq!(Region::from_json(&json::JsonValue::Null).unwrap(), Region::Unassigned);
  }

  #[test]
  fn region_lookup_ignores_case_and_spaces() {
    let salesmen = vec![
      Salesman { name: "Mehmet".into(), region: Region::Northern },
      Salesman { name: "Ayşe".into(), region: Region::Southern },
    ];

    assert_eq!(region_for(&salesmen, "mehmet"), Region::Northern);
    assert_eq!(region_for(&salesmen, "  AYŞE "), Region::Southern);
    assert_eq!(region_for(&salesmen, "nobody"), Region::Unassigned);
  }

  #[test]
  fn rows_without_name_are_skipped() {
    assert_eq!(Salesman::from_row(&["".to_string(), "CPI Northern".to_string()]), None);

    let s = Salesman::from_row(&["Ali".to_string(), "garbage".to_string()]).unwrap();
    assert_eq!(s.region, Region::Unassigned);
  }
}
