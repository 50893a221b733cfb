use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::{cell::RefCell, fs::File, io::Read, path::Path};

use crate::{
    core::{
        item::{TableReader, TableReaderResult},
        table::{Row, Table},
    },
    encoding::TextEncoding,
    error::ConvertError,
};

/// A CSV table reader that implements the `TableReader` trait.
///
/// The whole source is read and decoded with the configured encoding before
/// any parsing happens. The first record becomes the header and every following
/// record becomes a row.
///
/// # Implementation Details
///
/// - Uses a `RefCell` so the source can be drained through `&self`
/// - Parses flexibly: short records are padded by [`Table::new`], long ones are rejected
/// - Cells are kept verbatim unless trimming is configured
/// - Empty input yields an empty table (no header, no rows)
/// - Blank lines are skipped and never become rows; write `""` for an empty single-cell row
///
/// # Examples
///
/// ```
/// use outputty::item::csv::csv_reader::CsvTableReaderBuilder;
/// use outputty::core::item::TableReader;
///
/// let data = "\
/// city,country
/// Boston,United States
/// \"Paris, TX\",United States
/// ";
///
/// let reader = CsvTableReaderBuilder::new().from_reader(data.as_bytes());
/// let table = reader.read().unwrap();
///
/// assert_eq!(table.headers(), ["city", "country"]);
/// assert_eq!(table.rows()[1][0], "Paris, TX");
/// ```
pub struct CsvTableReader<R> {
    /// Raw byte source, drained on the first read
    source: RefCell<R>,
    delimiter: u8,
    quote: u8,
    trim: Trim,
    encoding: TextEncoding,
}

impl<R: Read> TableReader for CsvTableReader<R> {
    /// Reads, decodes and parses the whole source.
    ///
    /// # Returns
    /// - `Ok(table)` with the header and every row in source order
    /// - `Err(ConvertError::Encoding)` if the bytes are invalid for the configured encoding
    /// - `Err(ConvertError::Reader)` on I/O or CSV syntax errors
    /// - `Err(ConvertError::MalformedRow)` if a row has more fields than the header
    fn read(&self) -> TableReaderResult {
        let mut bytes = Vec::new();
        self.source
            .borrow_mut()
            .read_to_end(&mut bytes)
            .map_err(|error| ConvertError::Reader(error.to_string()))?;

        let text = self.encoding.decode(&bytes)?;
        debug!("Decoded {} byte(s) as {}", bytes.len(), self.encoding);

        let mut records = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .trim(self.trim)
            .has_headers(false) // the header is taken from the first record below
            .flexible(true)
            .from_reader(text.as_bytes())
            .into_records();

        let headers = match records.next() {
            Some(record) => to_row(record)?,
            None => return Ok(Table::default()),
        };

        let rows = records.map(to_row).collect::<Result<Vec<Row>, ConvertError>>()?;

        Table::new(headers, rows)
    }
}

fn to_row(record: Result<StringRecord, csv::Error>) -> Result<Row, ConvertError> {
    match record {
        Ok(record) => Ok(record.iter().map(str::to_string).collect()),
        Err(error) => Err(ConvertError::Reader(error.to_string())),
    }
}

/// A builder for configuring CSV table reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Quote: double quote (")
/// - Trimming: none, cells are kept verbatim
/// - Encoding: UTF-8
///
/// # Examples
///
/// ```
/// use outputty::item::csv::csv_reader::CsvTableReaderBuilder;
/// use outputty::core::item::TableReader;
/// use outputty::encoding::TextEncoding;
///
/// let reader = CsvTableReaderBuilder::new()
///     .delimiter(b';')
///     .encoding(TextEncoding::for_label("latin1").unwrap())
///     .from_reader(&b"nom;ville\nJos\xe9;S\xe3o Paulo\n"[..]);
///
/// let table = reader.read().unwrap();
/// assert_eq!(table.rows()[0], ["José", "São Paulo"]);
/// ```
pub struct CsvTableReaderBuilder {
    delimiter: u8,
    quote: u8,
    trim: Trim,
    encoding: TextEncoding,
}

impl Default for CsvTableReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableReaderBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: Trim::None,
            encoding: TextEncoding::default(),
        }
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Sets whether whitespace around headers and fields is trimmed.
    pub fn trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the encoding used to decode the source bytes.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Creates a `CsvTableReader` over any byte source.
    pub fn from_reader<R: Read>(self, rdr: R) -> CsvTableReader<R> {
        CsvTableReader {
            source: RefCell::new(rdr),
            delimiter: self.delimiter,
            quote: self.quote,
            trim: self.trim,
            encoding: self.encoding,
        }
    }

    /// Creates a `CsvTableReader` over a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::SourceUnavailable`] if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvTableReader<File>, ConvertError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|error| ConvertError::source_unavailable(path, &error))?;
        Ok(self.from_reader(file))
    }
}
