//! Dataset adapter. Reads sales records from CSV.

pub mod csv_source;

pub use csv_source::CsvSalesSource;
