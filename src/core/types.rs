use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use strum::EnumString;

use super::temporal;

/// Column types a CSV table can declare.
///
/// These define how the raw text of a field is coerced into a [`Value`].
/// Names parse case-insensitively, and the common SQL spellings are accepted
/// as aliases.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use scuttle_csv::FieldType;
///
/// assert_eq!(FieldType::from_str("int").unwrap(), FieldType::Int);
/// assert_eq!(FieldType::from_str("BIGINT").unwrap(), FieldType::Long);
/// assert_eq!(FieldType::from_str("varchar").unwrap(), FieldType::String);
/// assert!(FieldType::from_str("decimal").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FieldType {
    /// Raw text, passed through unchanged.
    #[strum(serialize = "string", serialize = "varchar", serialize = "text")]
    String,

    #[strum(serialize = "boolean", serialize = "bool")]
    Boolean,

    /// 8-bit signed integer.
    #[strum(serialize = "byte", serialize = "tinyint")]
    Byte,

    /// 16-bit signed integer.
    #[strum(serialize = "short", serialize = "smallint")]
    Short,

    /// 32-bit signed integer.
    #[strum(serialize = "int", serialize = "integer")]
    Int,

    /// 64-bit signed integer.
    #[strum(serialize = "long", serialize = "bigint")]
    Long,

    /// 32-bit floating point number.
    #[strum(serialize = "float", serialize = "real")]
    Float,

    /// 64-bit floating point number.
    #[strum(serialize = "double")]
    Double,

    /// Calendar date, read as `yyyy-MM-dd`.
    #[strum(serialize = "date")]
    Date,

    /// Time of day, read as `hh:mm:ss`.
    #[strum(serialize = "time")]
    Time,

    /// Date and time in UTC, read as `yyyy-MM-dd hh:mm:ss`.
    #[strum(serialize = "timestamp")]
    Timestamp,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "STRING"),
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Byte => write!(f, "BYTE"),
            FieldType::Short => write!(f, "SHORT"),
            FieldType::Int => write!(f, "INT"),
            FieldType::Long => write!(f, "LONG"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::Double => write!(f, "DOUBLE"),
            FieldType::Date => write!(f, "DATE"),
            FieldType::Time => write!(f, "TIME"),
            FieldType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

/// A typed value produced from one CSV field.
///
/// Each variant corresponds to a [`FieldType`]. [`Value::Null`] is the absent
/// value: an empty field of any non-string type, or a temporal field that did
/// not match its format.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Represents a NULL value (absence of data).
    Null,

    /// A UTF-8 text string.
    Text(String),

    /// A boolean value (true/false).
    Boolean(bool),

    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),

    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Byte(i) => write!(f, "{}", i),
            Value::Short(i) => write!(f, "{}", i),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Double(fl) => write!(f, "{}", fl),
            Value::Date(d) => write!(f, "{}", d.format(temporal::DATE_DISPLAY)),
            Value::Time(t) => write!(f, "{}", t.format(temporal::TIME_DISPLAY)),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(temporal::TIMESTAMP_DISPLAY)),
        }
    }
}

impl Value {
    /// Returns the field type of this value.
    ///
    /// Returns `None` for [`Value::Null`] since NULL has no specific type.
    ///
    /// # Example
    ///
    /// ```
    /// use scuttle_csv::{FieldType, Value};
    ///
    /// assert_eq!(Value::Int(42).field_type(), Some(FieldType::Int));
    /// assert_eq!(Value::Null.field_type(), None);
    /// ```
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(FieldType::String),
            Value::Boolean(_) => Some(FieldType::Boolean),
            Value::Byte(_) => Some(FieldType::Byte),
            Value::Short(_) => Some(FieldType::Short),
            Value::Int(_) => Some(FieldType::Int),
            Value::Long(_) => Some(FieldType::Long),
            Value::Float(_) => Some(FieldType::Float),
            Value::Double(_) => Some(FieldType::Double),
            Value::Date(_) => Some(FieldType::Date),
            Value::Time(_) => Some(FieldType::Time),
            Value::Timestamp(_) => Some(FieldType::Timestamp),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// One row produced by a scan.
///
/// A scan that projects a single column yields bare [`Row::Scalar`] values;
/// any other projection yields a [`Row::Array`] with one value per projected
/// column, in projection order.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Scalar(Value),
    Array(Vec<Value>),
}

impl Row {
    /// Returns the value of a single-column row.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Row::Scalar(value) => Some(value),
            Row::Array(_) => None,
        }
    }

    /// Returns the values of this row as a slice.
    ///
    /// A scalar row is viewed as a one-element slice.
    pub fn values(&self) -> &[Value] {
        match self {
            Row::Scalar(value) => std::slice::from_ref(value),
            Row::Array(values) => values,
        }
    }

    /// Number of values in this row.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
