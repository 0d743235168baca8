use miette::Diagnostic;
use thiserror::Error;

use crate::core::types::FieldType;

/// Errors raised while scanning a CSV table.
///
/// Temporal fields that fail to parse are not errors; they become
/// [`Value::Null`](crate::Value::Null). Everything else here is fatal for the
/// operation that raised it.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    #[error("IO Error: {0}")]
    #[diagnostic(code(scuttle_csv::io))]
    IoError(#[from] std::io::Error),

    #[error("Record Error: {0}")]
    #[diagnostic(
        code(scuttle_csv::record),
        help("the file could not be split into fields, check quoting and delimiter")
    )]
    RecordError(#[from] csv::Error),

    #[error("Cannot parse {text:?} as {field_type}: {reason}")]
    #[diagnostic(code(scuttle_csv::parse))]
    ParseError {
        field_type: FieldType,
        text: String,
        reason: String,
    },

    #[error("Column {index} is out of bounds for a schema of {len} column(s)")]
    #[diagnostic(
        code(scuttle_csv::column_out_of_bounds),
        help("projected columns must be less than the schema length")
    )]
    ColumnOutOfBounds { index: usize, len: usize },

    #[error("Field {index} is out of bounds for a record of {len} field(s)")]
    #[diagnostic(code(scuttle_csv::field_out_of_bounds))]
    FieldOutOfBounds { index: usize, len: usize },

    #[error("Unsupported operation: {0}")]
    #[diagnostic(code(scuttle_csv::unsupported))]
    Unsupported(&'static str),
}

impl ScanError {
    pub(crate) fn parse(field_type: FieldType, text: &str, reason: impl ToString) -> Self {
        Self::ParseError {
            field_type,
            text: text.to_owned(),
            reason: reason.to_string(),
        }
    }
}
