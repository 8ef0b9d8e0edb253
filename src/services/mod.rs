mod records;
mod salesmen;
mod summary;

pub use records::Records;
pub use salesmen::Salesmen;
pub use summary::SummaryReport;
