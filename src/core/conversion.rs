use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::ConvertError;

use super::item::{TableReader, TableWriter};

/// Summary of a finished conversion.
#[derive(Debug)]
pub struct ConversionReport {
    /// The time when the conversion started
    pub start: Instant,
    /// The time when the conversion finished
    pub end: Instant,
    /// The total duration of the conversion
    pub duration: Duration,
    /// Number of header columns read
    pub column_count: usize,
    /// Number of data rows written
    pub row_count: usize,
}

/// A single read-then-write pass from one table format to another.
///
/// The whole input is read before anything is written. The first error from
/// either side aborts the run and is returned unchanged.
///
/// # Examples
///
/// ```
/// use outputty::core::conversion::ConversionBuilder;
/// use outputty::item::csv::csv_reader::CsvTableReaderBuilder;
/// use outputty::item::html::html_writer::HtmlTableWriterBuilder;
///
/// let mut buffer = Vec::new();
/// {
///     let reader = CsvTableReaderBuilder::new().from_reader("a,b\n1,2\n".as_bytes());
///     let writer = HtmlTableWriterBuilder::new().from_writer(&mut buffer);
///
///     let report = ConversionBuilder::new()
///         .reader(&reader)
///         .writer(&writer)
///         .build()
///         .run()
///         .unwrap();
///
///     assert_eq!(report.column_count, 2);
///     assert_eq!(report.row_count, 1);
/// }
///
/// let html = String::from_utf8(buffer).unwrap();
/// assert!(html.contains("<tr class=\"odd\">"));
/// ```
pub struct Conversion<'a> {
    name: String,
    reader: &'a dyn TableReader,
    writer: &'a dyn TableWriter,
}

impl Conversion<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self) -> Result<ConversionReport, ConvertError> {
        let start = Instant::now();

        debug!("Start of conversion: {}", self.name);

        let table = self.reader.read()?;
        debug!(
            "Read {} column(s) and {} row(s)",
            table.column_count(),
            table.len()
        );

        self.writer.write(&table)?;

        info!(
            "End of conversion: {}, {} row(s) in {:?}",
            self.name,
            table.len(),
            start.elapsed()
        );

        Ok(ConversionReport {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            column_count: table.column_count(),
            row_count: table.len(),
        })
    }
}

#[derive(Default)]
pub struct ConversionBuilder<'a> {
    name: Option<String>,
    reader: Option<&'a dyn TableReader>,
    writer: Option<&'a dyn TableWriter>,
}

impl<'a> ConversionBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            reader: None,
            writer: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn reader(mut self, reader: &'a dyn TableReader) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn writer(mut self, writer: &'a dyn TableWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    /// # Panics
    ///
    /// Panics if no reader or no writer was set.
    pub fn build(self) -> Conversion<'a> {
        Conversion {
            name: self.name.unwrap_or_else(|| "conversion".to_string()),
            reader: self.reader.expect("a reader is required to build a conversion"),
            writer: self.writer.expect("a writer is required to build a conversion"),
        }
    }
}
