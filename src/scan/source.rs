use std::{fs::File, io::Read, path::Path};

use tracing::{debug, trace};

use super::options::CsvOptions;
use crate::ScanError;

/// A forward-only supplier of raw records.
///
/// Each call to [`RecordSource::read_record`] yields the next record as an
/// ordered list of unescaped fields, or `None` once the data is exhausted.
/// How the text is split into fields is entirely up to the implementation.
pub trait RecordSource {
    /// Reads the next record.
    fn read_record(&mut self) -> Result<Option<Vec<String>>, ScanError>;

    /// Releases the underlying resource.
    fn close(&mut self) -> Result<(), ScanError>;
}

/// A [`RecordSource`] backed by the `csv` crate.
///
/// Closing drops the reader, which releases the file handle. Closing twice is
/// a no-op and reading after close reports end of data.
pub struct CsvRecordSource<R> {
    reader: Option<csv::Reader<R>>,
    record: csv::StringRecord,
}

impl CsvRecordSource<File> {
    /// Opens a CSV file for reading.
    pub fn open<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Self, ScanError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening csv file");

        let file = File::open(path)?;
        Ok(Self::from_reader(file, options))
    }
}

impl<R: Read> CsvRecordSource<R> {
    /// Reads CSV data from any reader.
    pub fn from_reader(reader: R, options: &CsvOptions) -> Self {
        Self {
            reader: Some(options.reader_builder().from_reader(reader)),
            record: csv::StringRecord::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: Read> RecordSource for CsvRecordSource<R> {
    fn read_record(&mut self) -> Result<Option<Vec<String>>, ScanError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        if !reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        trace!(line = self.record.position().map(|p| p.line()), "read record");
        Ok(Some(self.record.iter().map(str::to_owned).collect()))
    }

    fn close(&mut self) -> Result<(), ScanError> {
        if self.reader.take().is_some() {
            debug!("closed csv record source");
        }
        Ok(())
    }
}
