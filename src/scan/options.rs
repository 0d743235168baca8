/// How a CSV file is split into fields.
///
/// Only the record source reads these. The first record is always treated as
/// a header and skipped, whatever the options say.
///
/// # Example
///
/// ```
/// use scuttle_csv::CsvOptions;
///
/// let options = CsvOptions::default().with_delimiter(b';').with_trim(true);
/// assert_eq!(options.delimiter, b';');
/// assert_eq!(options.quote, b'"');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator.
    pub delimiter: u8,

    /// Quote character for fields containing the delimiter or newlines.
    pub quote: u8,

    /// Escape character inside quoted fields. `None` means quotes are
    /// escaped by doubling them.
    pub escape: Option<u8>,

    /// Strip leading and trailing whitespace from every field.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
            trim: false,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.escape.is_none())
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}
