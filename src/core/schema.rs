use std::str::FromStr;

use super::types::FieldType;

/// The column types of a CSV table.
///
/// A schema is an ordered list with one entry per column of the file. A
/// column with no declared type (`None`) is read as raw text.
///
/// # Example
///
/// ```
/// use scuttle_csv::{FieldType, Schema};
///
/// let schema = Schema::from_type_names(["int", "string", ""]).unwrap();
///
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.field_type(0), Some(FieldType::Int));
/// assert_eq!(schema.field_type(2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// The ordered column types.
    pub field_types: Vec<Option<FieldType>>,
}

impl Schema {
    /// Creates a schema where every column has a declared type.
    pub fn new(field_types: Vec<FieldType>) -> Self {
        Self {
            field_types: field_types.into_iter().map(Some).collect(),
        }
    }

    /// Builds a schema from type names such as `int` or `timestamp`.
    ///
    /// An empty name leaves the column untyped. Returns the first name that
    /// is not a known type as the error.
    pub fn from_type_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let field_types = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    return Ok(None);
                }
                FieldType::from_str(name)
                    .map(Some)
                    .map_err(|_| name.to_owned())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { field_types })
    }

    /// Returns the declared type of a column.
    ///
    /// Returns `None` both for untyped columns and for indices past the end.
    pub fn field_type(&self, index: usize) -> Option<FieldType> {
        self.field_types.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.field_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_types.is_empty()
    }
}

impl From<Vec<Option<FieldType>>> for Schema {
    fn from(field_types: Vec<Option<FieldType>>) -> Self {
        Self { field_types }
    }
}
