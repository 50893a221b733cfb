use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgGroup, Parser};
use log::debug;

use outputty::{
    core::{
        conversion::{ConversionBuilder, ConversionReport},
        item::{TableReader, TableWriter, TableWriterResult},
        table::Table,
    },
    encoding::TextEncoding,
    error::ConvertError,
    item::{
        csv::{csv_reader::CsvTableReaderBuilder, csv_writer::CsvTableWriterBuilder},
        html::html_writer::HtmlTableWriterBuilder,
        json::json_writer::JsonTableWriterBuilder,
        output::create_file,
        text::text_writer::TextTableWriterBuilder,
    },
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert tabular data between formats and character encodings"
)]
#[command(group(
    ArgGroup::new("writer")
        .required(true)
        .args(["write_html", "write_csv", "write_json", "write_text"])
))]
struct Args {
    /// Read CSV from PATH, or from stdin when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1, required = true)]
    read_csv: Option<Option<PathBuf>>,

    /// Write an HTML table to PATH, or to stdout when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    write_html: Option<Option<PathBuf>>,

    /// Write CSV to PATH, or to stdout when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    write_csv: Option<Option<PathBuf>>,

    /// Write a JSON array of row objects to PATH, or to stdout when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    write_json: Option<Option<PathBuf>>,

    /// Write a plain-text grid to PATH, or to stdout when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    write_text: Option<Option<PathBuf>>,

    /// Encoding of the input bytes
    #[arg(long, value_name = "NAME", default_value = "utf-8")]
    input_encoding: String,

    /// Encoding of the output bytes
    #[arg(long, value_name = "NAME", default_value = "utf-8")]
    output_encoding: String,

    /// Field delimiter for CSV input and output
    #[arg(long, value_name = "CHAR", default_value_t = ',')]
    delimiter: char,

    /// Escape markup characters in HTML cells
    #[arg(long)]
    html_escape: bool,

    /// Indent JSON output
    #[arg(long)]
    json_pretty: bool,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Html,
    Csv,
    Json,
    Text,
}

impl Args {
    fn output(&self) -> (Format, Option<&Path>) {
        let selected = [
            (Format::Html, &self.write_html),
            (Format::Csv, &self.write_csv),
            (Format::Json, &self.write_json),
            (Format::Text, &self.write_text),
        ]
        .into_iter()
        .find_map(|(format, target)| target.as_ref().map(|path| (format, path.as_deref())));

        // clap guarantees exactly one writer flag
        selected.unwrap_or((Format::Html, None))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            debug!(
                "Converted {} column(s) and {} row(s) in {:?}",
                report.column_count, report.row_count, report.duration
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<ConversionReport, ConvertError> {
    let input_encoding = TextEncoding::for_label(&args.input_encoding)?;
    let output_encoding = TextEncoding::for_label(&args.output_encoding)?;
    let delimiter = delimiter_byte(args.delimiter)?;

    let builder = CsvTableReaderBuilder::new()
        .delimiter(delimiter)
        .encoding(input_encoding);
    let reader: Box<dyn TableReader> = match &args.read_csv {
        Some(Some(path)) => Box::new(builder.from_path(path)?),
        _ => Box::new(builder.from_reader(io::stdin())),
    };

    let (format, path) = args.output();
    let writer = CliWriter {
        args,
        format,
        path,
        encoding: output_encoding,
        delimiter,
    };

    ConversionBuilder::new()
        .name("cli")
        .reader(&*reader)
        .writer(&writer)
        .build()
        .run()
}

/// Opens the selected output only once a table has been read.
struct CliWriter<'a> {
    args: &'a Args,
    format: Format,
    path: Option<&'a Path>,
    encoding: TextEncoding,
    delimiter: u8,
}

impl TableWriter for CliWriter<'_> {
    fn write(&self, table: &Table) -> TableWriterResult {
        match self.path {
            Some(path) => self.table_writer(create_file(path)?).write(table),
            None => self.table_writer(io::stdout()).write(table),
        }
    }
}

impl CliWriter<'_> {
    fn table_writer<W: Write + 'static>(&self, wtr: W) -> Box<dyn TableWriter> {
        match self.format {
            Format::Html => Box::new(
                HtmlTableWriterBuilder::new()
                    .escape(self.args.html_escape)
                    .encoding(self.encoding)
                    .from_writer(wtr),
            ),
            Format::Csv => Box::new(
                CsvTableWriterBuilder::new()
                    .delimiter(self.delimiter)
                    .encoding(self.encoding)
                    .from_writer(wtr),
            ),
            Format::Json => Box::new(
                JsonTableWriterBuilder::new()
                    .pretty_formatter(self.args.json_pretty)
                    .encoding(self.encoding)
                    .from_writer(wtr),
            ),
            Format::Text => Box::new(
                TextTableWriterBuilder::new()
                    .encoding(self.encoding)
                    .from_writer(wtr),
            ),
        }
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8, ConvertError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ConvertError::InvalidOption(format!(
            "delimiter must be a single ASCII character, got {:?}",
            delimiter
        )))
    }
}
