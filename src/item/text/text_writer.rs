use std::{fs::File, io::Write, path::Path};

use crate::{
    core::{
        item::{TableWriter, TableWriterResult},
        table::Table,
    },
    encoding::TextEncoding,
    error::ConvertError,
    item::output::{EncodedOutput, create_file},
};

/// A writer that draws a table as a plain-text grid.
///
/// ```text
/// +-------+-----+
/// | name  | age |
/// +-------+-----+
/// | alice | 30  |
/// +-------+-----+
/// ```
///
/// Widths are counted in characters, so wide glyphs may misalign on a terminal.
pub struct TextTableWriter<W: Write> {
    output: EncodedOutput<W>,
}

impl<W: Write> TableWriter for TextTableWriter<W> {
    fn write(&self, table: &Table) -> TableWriterResult {
        self.output.emit(&render(table))
    }
}

impl<W: Write> TextTableWriter<W> {
    pub fn into_inner(self) -> Result<W, ConvertError> {
        self.output.into_inner()
    }
}

/// Renders `table` as a grid; a table without columns renders as empty text.
pub fn render(table: &Table) -> String {
    if table.column_count() == 0 {
        return String::new();
    }

    let mut widths: Vec<usize> = table.headers().iter().map(|h| h.chars().count()).collect();
    for row in table.rows() {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut text = separator.clone();
    push_row(&mut text, table.headers(), &widths);
    text.push_str(&separator);
    if !table.is_empty() {
        for row in table.rows() {
            push_row(&mut text, row, &widths);
        }
        text.push_str(&separator);
    }
    text
}

fn push_row(text: &mut String, values: &[String], widths: &[usize]) {
    text.push('|');
    for (value, width) in values.iter().zip(widths) {
        let padding = width - value.chars().count();
        text.push(' ');
        text.push_str(value);
        text.push_str(&" ".repeat(padding + 1));
        text.push('|');
    }
    text.push('\n');
}

#[derive(Default)]
pub struct TextTableWriterBuilder {
    encoding: TextEncoding,
}

impl TextTableWriterBuilder {
    pub fn new() -> Self {
        Self {
            encoding: TextEncoding::default(),
        }
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<TextTableWriter<File>, ConvertError> {
        let file = create_file(path)?;
        Ok(self.from_writer(file))
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> TextTableWriter<W> {
        TextTableWriter {
            output: EncodedOutput::new(wtr, self.encoding),
        }
    }
}
