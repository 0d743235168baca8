//! Typed, lazy row reader over CSV files.
//!
//! Reads a table one row at a time, skips the header line and converts every
//! field into a [`Value`] according to a per-column [`Schema`]. Used as the
//! table scan for CSV-backed tables.

pub(crate) mod common;
pub(crate) mod core;
pub(crate) mod scan;

pub use crate::common::error::ScanError;
pub use crate::core::{
    schema::Schema,
    temporal::{parse_date, parse_time, parse_timestamp},
    types::{FieldType, Row, Value},
};
pub use crate::scan::{
    CsvEnumerator, CsvOptions, CsvRecordSource, RecordSource, RowConverter, convert,
    identity_list,
};
