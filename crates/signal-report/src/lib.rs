//! Reports of daily signals.

mod csv_writer;
mod report;

pub use csv_writer::{format_number, SignalCsvWriter, DEFAULT_FILE_NAME};
pub use report::SignalReport;
