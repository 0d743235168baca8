use std::str::FromStr;

use tracing::warn;

use crate::{
    ScanError,
    core::{
        schema::Schema,
        temporal,
        types::{FieldType, Row, Value},
    },
};

/// Converts one raw record into one [`Row`].
///
/// The shape is fixed when the scan is created: a projection of exactly one
/// column yields [`Row::Scalar`], anything else yields [`Row::Array`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowConverter {
    /// Projects several columns, in projection order.
    Array {
        field_types: Vec<Option<FieldType>>,
        fields: Vec<usize>,
    },
    /// Projects a single column without wrapping it.
    Single {
        field_type: Option<FieldType>,
        index: usize,
    },
}

impl RowConverter {
    /// Picks the converter for a projection over `schema`.
    ///
    /// Every projected index must be a column of the schema. Indices may
    /// repeat and appear in any order.
    pub fn new(schema: &Schema, fields: &[usize]) -> Result<Self, ScanError> {
        if let Some(&index) = fields.iter().find(|&&index| index >= schema.len()) {
            return Err(ScanError::ColumnOutOfBounds {
                index,
                len: schema.len(),
            });
        }

        let converter = match fields {
            [index] => Self::Single {
                field_type: schema.field_type(*index),
                index: *index,
            },
            _ => Self::Array {
                field_types: schema.field_types.clone(),
                fields: fields.to_vec(),
            },
        };

        Ok(converter)
    }

    /// Converts a raw record.
    ///
    /// Fails if the record is too short for the projection or if a numeric
    /// or boolean field does not parse. No partial row is returned.
    pub fn convert_row(&self, record: &[String]) -> Result<Row, ScanError> {
        match self {
            Self::Array {
                field_types,
                fields,
            } => {
                let values = fields
                    .iter()
                    .map(|&field| {
                        let field_type = field_types.get(field).copied().ok_or(
                            ScanError::ColumnOutOfBounds {
                                index: field,
                                len: field_types.len(),
                            },
                        )?;
                        convert(field_type, field_text(record, field)?)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Row::Array(values))
            }
            Self::Single { field_type, index } => {
                convert(*field_type, field_text(record, *index)?).map(Row::Scalar)
            }
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Single { .. })
    }
}

fn field_text(record: &[String], index: usize) -> Result<&str, ScanError> {
    record
        .get(index)
        .map(String::as_str)
        .ok_or(ScanError::FieldOutOfBounds {
            index,
            len: record.len(),
        })
}

fn parse_number<T>(field_type: FieldType, text: &str) -> Result<T, ScanError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| ScanError::parse(field_type, text, e))
}

fn parse_bool(text: &str) -> Result<bool, ScanError> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ScanError::parse(
            FieldType::Boolean,
            text,
            "expected `true` or `false`",
        ))
    }
}

/// Coerces the text of one field into a [`Value`].
///
/// - An untyped column or a [`FieldType::String`] column returns the text
///   unchanged, so an empty field stays an empty string.
/// - Any other type turns an empty field into [`Value::Null`].
/// - Numbers and booleans that do not parse are errors.
/// - Dates and times that do not parse become [`Value::Null`].
///
/// # Example
///
/// ```
/// use scuttle_csv::{FieldType, Value, convert};
///
/// assert_eq!(convert(Some(FieldType::Int), "42").unwrap(), Value::Int(42));
/// assert_eq!(convert(Some(FieldType::Int), "").unwrap(), Value::Null);
/// assert!(convert(Some(FieldType::Int), "abc").is_err());
/// assert_eq!(convert(Some(FieldType::Date), "15/01/2014").unwrap(), Value::Null);
/// assert_eq!(convert(None, "raw text").unwrap(), Value::Text("raw text".to_string()));
/// ```
pub fn convert(field_type: Option<FieldType>, text: &str) -> Result<Value, ScanError> {
    let Some(field_type) = field_type else {
        return Ok(Value::Text(text.to_owned()));
    };

    if field_type == FieldType::String {
        return Ok(Value::Text(text.to_owned()));
    }

    if text.is_empty() {
        return Ok(Value::Null);
    }

    let value = match field_type {
        FieldType::String => Value::Text(text.to_owned()),
        FieldType::Boolean => Value::Boolean(parse_bool(text)?),
        FieldType::Byte => Value::Byte(parse_number(field_type, text)?),
        FieldType::Short => Value::Short(parse_number(field_type, text)?),
        FieldType::Int => Value::Int(parse_number(field_type, text)?),
        FieldType::Long => Value::Long(parse_number(field_type, text)?),
        FieldType::Float => Value::Float(parse_number(field_type, text.trim())?),
        FieldType::Double => Value::Double(parse_number(field_type, text.trim())?),
        FieldType::Date => temporal::parse_date(text).map_or(Value::Null, Value::Date),
        FieldType::Time => temporal::parse_time(text).map_or(Value::Null, Value::Time),
        FieldType::Timestamp => {
            temporal::parse_timestamp(text).map_or(Value::Null, Value::Timestamp)
        }
    };

    if value.is_null() {
        warn!(%field_type, text, "unparseable temporal field read as NULL");
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_text_is_null_except_string() {
        let non_string = [
            FieldType::Boolean,
            FieldType::Byte,
            FieldType::Short,
            FieldType::Int,
            FieldType::Long,
            FieldType::Float,
            FieldType::Double,
            FieldType::Date,
            FieldType::Time,
            FieldType::Timestamp,
        ];
        for field_type in non_string {
            assert_eq!(convert(Some(field_type), "").unwrap(), Value::Null);
        }
        assert_eq!(
            convert(Some(FieldType::String), "").unwrap(),
            Value::Text(String::new())
        );
        assert_eq!(convert(None, "").unwrap(), Value::Text(String::new()));
    }

    #[test]
    fn test_convert_integers() {
        assert_eq!(convert(Some(FieldType::Byte), "-7").unwrap(), Value::Byte(-7));
        assert_eq!(convert(Some(FieldType::Short), "300").unwrap(), Value::Short(300));
        assert_eq!(convert(Some(FieldType::Int), "42").unwrap(), Value::Int(42));
        assert_eq!(
            convert(Some(FieldType::Long), "9000000000").unwrap(),
            Value::Long(9_000_000_000)
        );
    }

    #[test]
    fn test_convert_integer_failures() {
        let err = convert(Some(FieldType::Int), "abc").unwrap_err();
        assert!(matches!(
            err,
            ScanError::ParseError {
                field_type: FieldType::Int,
                ..
            }
        ));
        assert!(convert(Some(FieldType::Byte), "128").is_err());
        assert!(convert(Some(FieldType::Int), "1.5").is_err());
        assert!(convert(Some(FieldType::Int), " 1").is_err());
    }

    #[test]
    fn test_convert_floats() {
        assert_eq!(convert(Some(FieldType::Float), "1.5").unwrap(), Value::Float(1.5));
        assert_eq!(
            convert(Some(FieldType::Double), " 2.25 ").unwrap(),
            Value::Double(2.25)
        );
        assert_eq!(convert(Some(FieldType::Double), "1e3").unwrap(), Value::Double(1000.0));
        assert!(convert(Some(FieldType::Double), "one").is_err());
    }

    #[test]
    fn test_convert_booleans() {
        assert_eq!(
            convert(Some(FieldType::Boolean), "TRUE").unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            convert(Some(FieldType::Boolean), "false").unwrap(),
            Value::Boolean(false)
        );
        assert!(convert(Some(FieldType::Boolean), "yes").is_err());
    }

    #[test]
    fn test_convert_temporals() {
        assert_eq!(
            convert(Some(FieldType::Date), "2014-01-15").unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2014, 1, 15).unwrap())
        );
        assert_eq!(
            convert(Some(FieldType::Time), "09:15:00").unwrap(),
            Value::Time(NaiveTime::from_hms_opt(9, 15, 0).unwrap())
        );
        assert!(matches!(
            convert(Some(FieldType::Timestamp), "2014-01-15 09:15:00").unwrap(),
            Value::Timestamp(_)
        ));
    }

    #[test]
    fn test_bad_temporals_are_null() {
        assert_eq!(convert(Some(FieldType::Date), "15/01/2014").unwrap(), Value::Null);
        assert_eq!(convert(Some(FieldType::Time), "9am").unwrap(), Value::Null);
        assert_eq!(
            convert(Some(FieldType::Timestamp), "2014-01-15T09:15:00Z").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_untyped_passes_text_through() {
        assert_eq!(
            convert(None, "raw text").unwrap(),
            Value::Text("raw text".to_string())
        );
        assert_eq!(convert(None, "42").unwrap(), Value::Text("42".to_string()));
    }

    #[test]
    fn test_single_projection_is_scalar() {
        let schema = Schema::new(vec![FieldType::Int, FieldType::String]);
        let converter = RowConverter::new(&schema, &[1]).unwrap();
        assert!(converter.is_scalar());
        assert_eq!(
            converter.convert_row(&record(&["1", "Ann"])).unwrap(),
            Row::Scalar(Value::Text("Ann".to_string()))
        );
    }

    #[test]
    fn test_array_projection_reorders_and_repeats() {
        let schema = Schema::new(vec![FieldType::Int, FieldType::String, FieldType::Long]);
        let converter = RowConverter::new(&schema, &[2, 0, 2]).unwrap();
        assert!(!converter.is_scalar());
        assert_eq!(
            converter.convert_row(&record(&["1", "Ann", "7"])).unwrap(),
            Row::Array(vec![Value::Long(7), Value::Int(1), Value::Long(7)])
        );
    }

    #[test]
    fn test_empty_projection_is_empty_array() {
        let schema = Schema::new(vec![FieldType::Int]);
        let converter = RowConverter::new(&schema, &[]).unwrap();
        assert_eq!(
            converter.convert_row(&record(&["1"])).unwrap(),
            Row::Array(vec![])
        );
    }

    #[test]
    fn test_projection_out_of_schema_is_rejected() {
        let schema = Schema::new(vec![FieldType::Int, FieldType::String]);
        let err = RowConverter::new(&schema, &[0, 2]).unwrap_err();
        assert!(matches!(err, ScanError::ColumnOutOfBounds { index: 2, len: 2 }));
    }

    #[test]
    fn test_hand_built_array_checks_schema_bounds() {
        let converter = RowConverter::Array {
            field_types: vec![],
            fields: vec![3],
        };
        let err = converter.convert_row(&record(&["a", "b", "c", "d"])).unwrap_err();
        assert!(matches!(err, ScanError::ColumnOutOfBounds { index: 3, len: 0 }));
    }

    #[test]
    fn test_date_with_trailing_time_keeps_date() {
        assert_eq!(
            convert(Some(FieldType::Date), "2014-01-15 10:00:00").unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2014, 1, 15).unwrap())
        );
        assert_eq!(
            convert(Some(FieldType::Time), "10:20:60").unwrap(),
            Value::Time(NaiveTime::from_hms_opt(10, 21, 0).unwrap())
        );
    }

    #[test]
    fn test_short_record_is_an_error() {
        let schema = Schema::new(vec![FieldType::Int, FieldType::String, FieldType::Int]);
        let converter = RowConverter::new(&schema, &[0, 2]).unwrap();
        let err = converter.convert_row(&record(&["1", "Ann"])).unwrap_err();
        assert!(matches!(err, ScanError::FieldOutOfBounds { index: 2, len: 2 }));
    }

    #[test]
    fn test_parse_failure_fails_whole_row() {
        let schema = Schema::new(vec![FieldType::Int, FieldType::Int]);
        let converter = RowConverter::new(&schema, &[0, 1]).unwrap();
        assert!(converter.convert_row(&record(&["1", "x"])).is_err());
    }
}
