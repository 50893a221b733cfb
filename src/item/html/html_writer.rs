use std::{borrow::Cow, fs::File, io::Write, path::Path};

use log::debug;
use quick_xml::escape::escape;

use crate::{
    core::{
        item::{TableWriter, TableWriterResult},
        table::Table,
    },
    encoding::TextEncoding,
    error::ConvertError,
    item::output::{EncodedOutput, create_file},
};

const INDENT: &str = "  ";

/// A writer that renders a table as an HTML `<table>` fragment.
///
/// The layout is fixed: two spaces per nesting level, a `header` class on the
/// heading row and `odd`/`even` classes on body rows, starting with `odd`.
/// `<tbody>` is left out when the table has no rows. The fragment ends with
/// a single newline.
///
/// Cell text is copied verbatim unless escaping is enabled on the builder.
///
/// # Examples
///
/// ```
/// use outputty::core::item::TableWriter;
/// use outputty::core::table::Table;
/// use outputty::item::html::html_writer::HtmlTableWriterBuilder;
///
/// let table = Table::new(vec!["a".to_string()], vec![]).unwrap();
///
/// let mut buffer = Vec::new();
/// {
///     let writer = HtmlTableWriterBuilder::new().from_writer(&mut buffer);
///     writer.write(&table).unwrap();
/// }
///
/// assert_eq!(
///     String::from_utf8(buffer).unwrap(),
///     "<table>\n  <thead>\n    <tr class=\"header\">\n      <th>a</th>\n    </tr>\n  </thead>\n</table>\n"
/// );
/// ```
pub struct HtmlTableWriter<W: Write> {
    output: EncodedOutput<W>,
    escape: bool,
}

impl<W: Write> TableWriter for HtmlTableWriter<W> {
    fn write(&self, table: &Table) -> TableWriterResult {
        let html = self.render(table);
        debug!("Rendered HTML table with {} row(s)", table.len());
        self.output.emit(&html)
    }
}

impl<W: Write> HtmlTableWriter<W> {
    /// Renders the table without encoding or writing it.
    pub fn render(&self, table: &Table) -> String {
        let mut html = String::new();

        line(&mut html, 0, "<table>");
        line(&mut html, 1, "<thead>");
        line(&mut html, 2, "<tr class=\"header\">");
        for name in table.headers() {
            self.cell(&mut html, "th", name);
        }
        line(&mut html, 2, "</tr>");
        line(&mut html, 1, "</thead>");

        if !table.is_empty() {
            line(&mut html, 1, "<tbody>");
            for (index, row) in table.rows().iter().enumerate() {
                let class = if index % 2 == 0 { "odd" } else { "even" };
                line(&mut html, 2, &format!("<tr class=\"{}\">", class));
                for value in row {
                    self.cell(&mut html, "td", value);
                }
                line(&mut html, 2, "</tr>");
            }
            line(&mut html, 1, "</tbody>");
        }

        line(&mut html, 0, "</table>");
        html
    }

    fn cell(&self, html: &mut String, tag: &str, text: &str) {
        let text = if self.escape {
            escape(text)
        } else {
            Cow::Borrowed(text)
        };
        line(html, 3, &format!("<{tag}>{text}</{tag}>"));
    }

    pub fn into_inner(self) -> Result<W, ConvertError> {
        self.output.into_inner()
    }
}

fn line(html: &mut String, depth: usize, content: &str) {
    for _ in 0..depth {
        html.push_str(INDENT);
    }
    html.push_str(content);
    html.push('\n');
}

/// Builder for HTML table writers.
///
/// # Default Configuration
///
/// - Escaping: disabled, cell text is written verbatim
/// - Encoding: UTF-8
#[derive(Default)]
pub struct HtmlTableWriterBuilder {
    escape: bool,
    encoding: TextEncoding,
}

impl HtmlTableWriterBuilder {
    pub fn new() -> Self {
        Self {
            escape: false,
            encoding: TextEncoding::default(),
        }
    }

    /// Sets whether `&`, `<`, `>`, `'` and `"` in headers and cells are replaced by entities.
    pub fn escape(mut self, yes: bool) -> Self {
        self.escape = yes;
        self
    }

    /// Sets the encoding of the written bytes.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Creates an `HtmlTableWriter` writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::SinkUnavailable`] if the file cannot be created.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<HtmlTableWriter<File>, ConvertError> {
        let file = create_file(path)?;
        Ok(self.from_writer(file))
    }

    /// Creates an `HtmlTableWriter` writing to any `Write` implementation.
    pub fn from_writer<W: Write>(self, wtr: W) -> HtmlTableWriter<W> {
        HtmlTableWriter {
            output: EncodedOutput::new(wtr, self.encoding),
            escape: self.escape,
        }
    }
}
