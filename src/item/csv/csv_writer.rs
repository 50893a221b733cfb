use std::{fs::File, io::Write, path::Path};

use csv::{Terminator, WriterBuilder};

use crate::{
    core::{
        item::{TableWriter, TableWriterResult},
        table::Table,
    },
    encoding::TextEncoding,
    error::ConvertError,
    item::output::{EncodedOutput, create_file},
};

pub struct CsvTableWriter<W: Write> {
    output: EncodedOutput<W>,
    delimiter: u8,
    has_headers: bool,
}

impl<W: Write> TableWriter for CsvTableWriter<W> {
    fn write(&self, table: &Table) -> TableWriterResult {
        let text = self.render(table)?;
        self.output.emit(&text)
    }
}

impl<W: Write> CsvTableWriter<W> {
    /// Renders the table as `\n` terminated CSV records, quoting only where needed.
    ///
    /// A table without columns renders as empty text.
    pub fn render(&self, table: &Table) -> Result<String, ConvertError> {
        if table.column_count() == 0 {
            return Ok(String::new());
        }

        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if self.has_headers {
            wtr.write_record(table.headers())
                .map_err(|error| ConvertError::Writer(error.to_string()))?;
        }
        for row in table.rows() {
            wtr.write_record(row)
                .map_err(|error| ConvertError::Writer(error.to_string()))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|error| ConvertError::Writer(error.to_string()))?;
        String::from_utf8(bytes).map_err(|error| ConvertError::Writer(error.to_string()))
    }

    pub fn into_inner(self) -> Result<W, ConvertError> {
        self.output.into_inner()
    }
}

/// Builder for CSV table writers.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Headers: written
/// - Encoding: UTF-8
pub struct CsvTableWriterBuilder {
    delimiter: u8,
    has_headers: bool,
    encoding: TextEncoding,
}

impl Default for CsvTableWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableWriterBuilder {
    pub fn new() -> CsvTableWriterBuilder {
        CsvTableWriterBuilder {
            delimiter: b',',
            has_headers: true,
            encoding: TextEncoding::default(),
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> CsvTableWriterBuilder {
        self.delimiter = delimiter;
        self
    }

    pub fn has_headers(mut self, yes: bool) -> CsvTableWriterBuilder {
        self.has_headers = yes;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> CsvTableWriterBuilder {
        self.encoding = encoding;
        self
    }

    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvTableWriter<File>, ConvertError> {
        let file = create_file(path)?;
        Ok(self.from_writer(file))
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> CsvTableWriter<W> {
        CsvTableWriter {
            output: EncodedOutput::new(wtr, self.encoding),
            delimiter: self.delimiter,
            has_headers: self.has_headers,
        }
    }
}
