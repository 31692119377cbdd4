//! Rows module - raw export rows and the CSV row source.

mod csv_parser;
mod row_model;

pub use csv_parser::{parse_csv, CsvOptions};
pub use row_model::RawRow;
