use std::{fs::File, io::Write, path::Path};

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{
    core::{
        item::{TableWriter, TableWriterResult},
        table::Table,
    },
    encoding::TextEncoding,
    error::ConvertError,
    item::output::{EncodedOutput, create_file},
};

/// Serializes a table as a sequence of row objects keyed by header name.
struct Records<'a>(&'a Table);

/// One row as a JSON object; keys follow header order, duplicates included.
struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let table = self.0;
        let mut seq = serializer.serialize_seq(Some(table.len()))?;
        for row in table.rows() {
            seq.serialize_element(&Record {
                headers: table.headers(),
                values: row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (key, value) in self.headers.iter().zip(self.values) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

pub struct JsonTableWriter<W: Write> {
    output: EncodedOutput<W>,
    use_pretty_formatter: bool,
}

impl<W: Write> TableWriter for JsonTableWriter<W> {
    fn write(&self, table: &Table) -> TableWriterResult {
        let text = self.render(table)?;
        self.output.emit(&text)
    }
}

impl<W: Write> JsonTableWriter<W> {
    /// Renders the table as a JSON array of objects followed by a newline.
    pub fn render(&self, table: &Table) -> Result<String, ConvertError> {
        let records = Records(table);
        let json = if self.use_pretty_formatter {
            serde_json::to_string_pretty(&records)
        } else {
            serde_json::to_string(&records)
        };

        match json {
            Ok(mut json) => {
                json.push('\n');
                Ok(json)
            }
            Err(error) => Err(ConvertError::Writer(error.to_string())),
        }
    }

    pub fn into_inner(self) -> Result<W, ConvertError> {
        self.output.into_inner()
    }
}

#[derive(Default)]
pub struct JsonTableWriterBuilder {
    pretty_formatter: bool,
    encoding: TextEncoding,
}

impl JsonTableWriterBuilder {
    pub fn new() -> JsonTableWriterBuilder {
        JsonTableWriterBuilder {
            pretty_formatter: false,
            encoding: TextEncoding::default(),
        }
    }

    pub fn pretty_formatter(mut self, yes: bool) -> JsonTableWriterBuilder {
        self.pretty_formatter = yes;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> JsonTableWriterBuilder {
        self.encoding = encoding;
        self
    }

    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<JsonTableWriter<File>, ConvertError> {
        let file = create_file(path)?;
        Ok(self.from_writer(file))
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> JsonTableWriter<W> {
        JsonTableWriter {
            output: EncodedOutput::new(wtr, self.encoding),
            use_pretty_formatter: self.pretty_formatter,
        }
    }
}
