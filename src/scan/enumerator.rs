use std::{fs::File, path::Path};

use tracing::{debug, trace};

use super::{
    converter::RowConverter,
    options::CsvOptions,
    source::{CsvRecordSource, RecordSource},
};
use crate::{
    ScanError,
    core::{schema::Schema, types::Row},
};

/// Where the enumerator stands in its source.
///
/// Moves strictly forward: `NotStarted` to `Positioned` (any number of times)
/// to `Exhausted`, which is final.
#[derive(Debug, Clone, PartialEq)]
enum Cursor {
    NotStarted,
    Positioned(Row),
    Exhausted,
}

/// Returns the identity projection `[0, 1, ..., n - 1]`.
pub fn identity_list(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// A forward-only scan over a CSV table.
///
/// The first record of the source is a header and is discarded when the
/// enumerator is created. Every later record is converted with the
/// [`RowConverter`] chosen for the projection.
///
/// Iteration is an explicit pull: call [`CsvEnumerator::move_next`] and, if it
/// returns `true`, read the row with [`CsvEnumerator::current`]. The source
/// is closed as soon as a pull finds no more data. There is no way to rewind.
///
/// # Example
///
/// ```no_run
/// use scuttle_csv::{CsvEnumerator, FieldType, Schema};
///
/// let schema = Schema::new(vec![FieldType::Int, FieldType::String, FieldType::Date]);
/// let mut rows = CsvEnumerator::open("people.csv", schema)?;
///
/// while rows.move_next()? {
///     if let Some(row) = rows.current() {
///         println!("{row}");
///     }
/// }
/// # Ok::<(), scuttle_csv::ScanError>(())
/// ```
pub struct CsvEnumerator<S: RecordSource = CsvRecordSource<File>> {
    source: S,
    converter: RowConverter,
    cursor: Cursor,
    closed: bool,
}

impl CsvEnumerator<CsvRecordSource<File>> {
    /// Opens a file and scans every column of `schema`.
    pub fn open<P: AsRef<Path>>(path: P, schema: Schema) -> Result<Self, ScanError> {
        let fields = identity_list(schema.len());
        Self::open_projected(path, schema, &fields, &CsvOptions::default())
    }

    /// Opens a file and scans only the projected columns.
    pub fn open_projected<P: AsRef<Path>>(
        path: P,
        schema: Schema,
        fields: &[usize],
        options: &CsvOptions,
    ) -> Result<Self, ScanError> {
        // Reject a bad projection before touching the file.
        let converter = RowConverter::new(&schema, fields)?;
        let source = CsvRecordSource::open(path, options)?;
        Self::with_converter(source, converter)
    }
}

impl<S: RecordSource> CsvEnumerator<S> {
    /// Wraps an already open record source and skips its header record.
    ///
    /// An empty source is not an error: the enumerator simply has no rows.
    pub fn new(source: S, schema: &Schema, fields: &[usize]) -> Result<Self, ScanError> {
        let converter = RowConverter::new(schema, fields)?;
        Self::with_converter(source, converter)
    }

    fn with_converter(mut source: S, converter: RowConverter) -> Result<Self, ScanError> {
        let header = source.read_record()?;
        debug!(
            header_fields = header.as_ref().map(Vec::len),
            scalar = converter.is_scalar(),
            "skipped csv header"
        );

        Ok(Self {
            source,
            converter,
            cursor: Cursor::NotStarted,
            closed: false,
        })
    }

    /// Advances to the next row.
    ///
    /// Returns `false` once the source has no more records, closing it on
    /// that first exhausted pull. Later pulls, and pulls after an explicit
    /// [`close`](CsvEnumerator::close), return `false` without reading. A
    /// failed read or conversion is returned as an error and leaves the
    /// cursor where it was.
    pub fn move_next(&mut self) -> Result<bool, ScanError> {
        if self.cursor == Cursor::Exhausted {
            return Ok(false);
        }

        // A source closed mid-stream has nothing left to give.
        if self.closed {
            self.cursor = Cursor::Exhausted;
            return Ok(false);
        }

        let Some(record) = self.source.read_record()? else {
            self.cursor = Cursor::Exhausted;
            debug!("csv source exhausted");
            self.release()?;
            return Ok(false);
        };

        trace!(fields = record.len(), "converting record");
        let row = self.converter.convert_row(&record)?;
        self.cursor = Cursor::Positioned(row);
        Ok(true)
    }

    /// Returns the row produced by the last successful [`move_next`].
    ///
    /// Returns `None` before the first pull and after exhaustion.
    ///
    /// [`move_next`]: CsvEnumerator::move_next
    pub fn current(&self) -> Option<&Row> {
        match &self.cursor {
            Cursor::Positioned(row) => Some(row),
            Cursor::NotStarted | Cursor::Exhausted => None,
        }
    }

    /// Always fails: a CSV scan cannot be rewound.
    pub fn reset(&mut self) -> Result<(), ScanError> {
        Err(ScanError::Unsupported("reset of a forward-only csv scan"))
    }

    /// Releases the record source.
    ///
    /// Safe to call after the scan already closed the source on exhaustion,
    /// and safe to call repeatedly; only the first call reaches the source.
    pub fn close(&mut self) -> Result<(), ScanError> {
        if self.closed {
            debug!("csv source already closed");
            return Ok(());
        }
        self.release()
    }

    fn release(&mut self) -> Result<(), ScanError> {
        // Mark first so a failing close is never retried.
        self.closed = true;
        self.source.close()
    }

    /// Whether a pull has already found the end of the data.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Whether the record source has been released.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn converter(&self) -> &RowConverter {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor as IoCursor;

    use super::*;
    use crate::{Value, core::types::FieldType};

    type MemoryEnumerator = CsvEnumerator<CsvRecordSource<IoCursor<Vec<u8>>>>;

    fn memory_source(data: &str) -> CsvRecordSource<IoCursor<Vec<u8>>> {
        CsvRecordSource::from_reader(
            IoCursor::new(data.as_bytes().to_vec()),
            &CsvOptions::default(),
        )
    }

    fn enumerator(data: &str, fields: &[usize]) -> MemoryEnumerator {
        let schema = Schema::new(vec![FieldType::Int, FieldType::String, FieldType::Date]);
        CsvEnumerator::new(memory_source(data), &schema, fields).unwrap()
    }

    #[test]
    fn test_identity_list() {
        assert_eq!(identity_list(3), vec![0, 1, 2]);
        assert!(identity_list(0).is_empty());
    }

    #[test]
    fn test_header_is_skipped() {
        let mut rows = enumerator("id,name,birth\n1,Ann,2000-01-01\n", &[0, 1, 2]);
        assert!(rows.current().is_none());
        assert!(rows.move_next().unwrap());
        assert_eq!(rows.current().unwrap().values()[0], Value::Int(1));
        assert!(!rows.move_next().unwrap());
    }

    #[test]
    fn test_exhaustion_closes_source() {
        let mut rows = enumerator("id,name,birth\n1,Ann,\n", &[0, 1, 2]);
        assert!(rows.move_next().unwrap());
        assert!(!rows.is_closed());
        assert!(!rows.move_next().unwrap());
        assert!(rows.is_exhausted());
        assert!(rows.is_closed());
        assert!(rows.current().is_none());
        assert!(!rows.move_next().unwrap());
    }

    #[test]
    fn test_empty_source_has_no_rows() {
        let mut rows = enumerator("", &[0, 1, 2]);
        assert!(!rows.move_next().unwrap());
        assert!(rows.is_exhausted());
    }

    #[test]
    fn test_header_only_source_has_no_rows() {
        let mut rows = enumerator("id,name,birth\n", &[1]);
        assert!(!rows.move_next().unwrap());
    }

    #[test]
    fn test_reset_is_unsupported() {
        let mut rows = enumerator("id,name,birth\n1,Ann,\n", &[0, 1, 2]);
        assert!(matches!(rows.reset(), Err(ScanError::Unsupported(_))));
        rows.move_next().unwrap();
        assert!(matches!(rows.reset(), Err(ScanError::Unsupported(_))));
        rows.move_next().unwrap();
        assert!(matches!(rows.reset(), Err(ScanError::Unsupported(_))));
    }

    #[test]
    fn test_close_mid_stream_then_again() {
        let mut rows = enumerator("id,name,birth\n1,Ann,\n2,Bo,\n", &[0, 1, 2]);
        assert!(rows.move_next().unwrap());
        rows.close().unwrap();
        assert!(rows.is_closed());
        rows.close().unwrap();
        assert!(!rows.move_next().unwrap());
        assert!(rows.is_exhausted());
    }

    #[test]
    fn test_conversion_error_keeps_previous_row() {
        let mut rows = enumerator("id,name,birth\n1,Ann,\nx,Bo,\n", &[0]);
        assert!(rows.move_next().unwrap());
        assert!(rows.move_next().is_err());
        assert_eq!(rows.current(), Some(&Row::Scalar(Value::Int(1))));
    }

    #[test]
    fn test_bad_projection_is_rejected() {
        let schema = Schema::new(vec![FieldType::Int]);
        let err = CsvEnumerator::new(memory_source("id\n1\n"), &schema, &[1])
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::ColumnOutOfBounds { index: 1, len: 1 }));
    }
}
