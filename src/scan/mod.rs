//! The CSV table scan.
//!
//! A [`RecordSource`] splits the file into raw records, a [`RowConverter`]
//! turns each record into a typed [`Row`](crate::Row), and a
//! [`CsvEnumerator`] drives both behind a pull-based cursor.

pub mod converter;
pub mod enumerator;
pub mod options;
pub mod source;

pub use converter::{RowConverter, convert};
pub use enumerator::{CsvEnumerator, identity_list};
pub use options::CsvOptions;
pub use source::{CsvRecordSource, RecordSource};
