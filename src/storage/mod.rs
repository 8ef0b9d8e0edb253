pub mod records;
pub mod salesmen;

pub use records::Record;
pub use salesmen::{region_for, Region, Salesman};

use std::path::PathBuf;

use service::error::Error;
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub(crate) const RECORDS_SHEET: &str = "Records";
pub(crate) const DATA_SHEET: &str = "Data"; // SalesMan > Region mapping

// Spreadsheet-as-database. Every read loads the sheet fresh from the file,
// every write rewrites the whole workbook. Concurrent writers are not
// coordinated, a locked file surfaces as a retryable IOError.
#[derive(Clone)]
pub struct Workbook {
  path: PathBuf,
}

impl Workbook {
  pub fn new(path: PathBuf) -> Self {
    Workbook { path }
  }

  // create the file with empty sheets and header rows on first access
  pub fn ensure(&self) -> Result<(), Error> {
    if self.path.exists() {
      return Ok(());
    }

    if let Some(folder) = self.path.parent() {
      std::fs::create_dir_all(folder)?;
    }

    log::info!("creating workbook {}", self.path.to_string_lossy());
    self.write_book(&[], &[])
  }

  pub fn records(&self) -> Result<Vec<Record>, Error> {
    let book = self.read_book()?;
    let rows = sheet_rows(&book, RECORDS_SHEET, records::COLUMNS.len());

    Ok(rows.iter().filter_map(|row| Record::from_row(row)).collect())
  }

  pub fn salesmen(&self) -> Result<Vec<Salesman>, Error> {
    let book = self.read_book()?;
    let rows = sheet_rows(&book, DATA_SHEET, salesmen::DATA_COLUMNS.len());

    Ok(rows.iter().filter_map(|row| Salesman::from_row(row)).collect())
  }

  pub fn write_records(&self, records: &[Record]) -> Result<(), Error> {
    // the other sheet rides along on every whole-file rewrite
    let salesmen = self.salesmen()?;
    self.write_book(records, &salesmen)
  }

  pub fn write_salesmen(&self, salesmen: &[Salesman]) -> Result<(), Error> {
    let records = self.records()?;
    self.write_book(&records, salesmen)
  }

  fn read_book(&self) -> Result<Spreadsheet, Error> {
    self.ensure()?;

    umya_spreadsheet::reader::xlsx::read(&self.path)
      .map_err(|e| Error::IOError(format!("fail to read workbook: {e:?}")))
  }

  fn write_book(&self, records: &[Record], salesmen: &[Salesman]) -> Result<(), Error> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    {
      let sheet = new_sheet(&mut book, RECORDS_SHEET)?;
      fill_row(sheet, 1, &records::COLUMNS);
      for (n, record) in records.iter().enumerate() {
        fill_row(sheet, n as u32 + 2, &record.to_row());
      }
    }

    {
      let sheet = new_sheet(&mut book, DATA_SHEET)?;
      fill_row(sheet, 1, &salesmen::DATA_COLUMNS);
      for (n, salesman) in salesmen.iter().enumerate() {
        fill_row(sheet, n as u32 + 2, &salesman.to_row());
      }
    }

    log::debug!(
      "writing workbook {}: {} records, {} salesmen",
      self.path.to_string_lossy(),
      records.len(),
      salesmen.len()
    );

    umya_spreadsheet::writer::xlsx::write(&book, &self.path)
      .map_err(|e| Error::IOError(format!("fail to write workbook: {e:?}")))
  }
}

fn new_sheet<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet, Error> {
  book
    .new_sheet(name)
    .map_err(|e| Error::GeneralError(format!("fail to add sheet {name}: {e}")))
}

fn fill_row<S: AsRef<str>>(sheet: &mut Worksheet, row: u32, values: &[S]) {
  for (i, value) in values.iter().enumerate() {
    sheet.get_cell_mut((i as u32 + 1, row)).set_value(value.as_ref());
  }
}

fn sheet_rows(book: &Spreadsheet, name: &str, width: usize) -> Vec<Vec<String>> {
  let sheet = match book.get_sheet_collection().iter().find(|s| s.get_name() == name) {
    Some(sheet) => sheet,
    None => return vec![],
  };

  let mut rows = Vec::new();
  for row in 2..=sheet.get_highest_row() {
    let cells: Vec<String> =
      (1..=width as u32).map(|col| sheet.get_value((col, row))).collect();

    if cells.iter().all(|cell| cell.is_empty()) {
      continue;
    }
    rows.push(cells);
  }

  rows
}
