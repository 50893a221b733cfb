mod common;

use std::fs::{self, File};

use common::utf16_with_bom;
use tempfile::tempdir;

use outputty::{
    core::{conversion::ConversionBuilder, item::TableReader},
    encoding::TextEncoding,
    item::{
        csv::{csv_reader::CsvTableReaderBuilder, csv_writer::CsvTableWriterBuilder},
        html::html_writer::HtmlTableWriterBuilder,
        json::json_writer::JsonTableWriterBuilder,
        text::text_writer::TextTableWriterBuilder,
    },
};

#[test]
fn transform_utf16_csv_to_utf8_html_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("people.csv");
    let output_path = dir.path().join("people.html");
    fs::write(
        &input_path,
        utf16_with_bom("name,city\nÁlvaro,São Paulo\n李雷,北京\nJane,\"Boston, MA\"\n"),
    )
    .unwrap();

    let reader = CsvTableReaderBuilder::new()
        .encoding(TextEncoding::for_label("utf16").unwrap())
        .from_path(&input_path)
        .unwrap();
    let writer = HtmlTableWriterBuilder::new()
        .from_path(&output_path)
        .unwrap();

    let report = ConversionBuilder::new()
        .name("people")
        .reader(&reader)
        .writer(&writer)
        .build()
        .run()
        .unwrap();
    drop(writer);

    assert_eq!(report.column_count, 2);
    assert_eq!(report.row_count, 3);

    let html = fs::read_to_string(&output_path).unwrap();
    assert!(html.contains("      <td>São Paulo</td>\n"));
    assert!(html.contains("      <td>北京</td>\n"));
    assert!(html.contains("      <td>Boston, MA</td>\n"));
    assert_eq!(html.matches("<tr class=\"odd\">").count(), 2);
    assert_eq!(html.matches("<tr class=\"even\">").count(), 1);
}

#[test]
fn transform_utf8_csv_to_utf16_csv_and_back() {
    let source = "name,note\nZoë,\"a,b\"\n🦀,\n";

    let reader = CsvTableReaderBuilder::new().from_reader(source.as_bytes());
    let mut utf16 = Vec::new();
    {
        let writer = CsvTableWriterBuilder::new()
            .encoding(TextEncoding::Utf16Be)
            .from_writer(&mut utf16);
        ConversionBuilder::new()
            .reader(&reader)
            .writer(&writer)
            .build()
            .run()
            .unwrap();
    }

    let table = CsvTableReaderBuilder::new()
        .encoding(TextEncoding::Utf16Be)
        .from_reader(utf16.as_slice())
        .read()
        .unwrap();

    assert_eq!(table.headers(), ["name", "note"]);
    assert_eq!(table.rows(), [vec!["Zoë", "a,b"], vec!["🦀", ""]]);
}

#[test]
fn transform_latin1_csv_to_json_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("cities.csv");
    let output_path = dir.path().join("cities.json");
    fs::write(&input_path, b"city;country\nS\xe3o Paulo;Brasil\n").unwrap();

    let reader = CsvTableReaderBuilder::new()
        .delimiter(b';')
        .encoding(TextEncoding::for_label("latin1").unwrap())
        .from_reader(File::open(&input_path).unwrap());
    let writer = JsonTableWriterBuilder::new()
        .pretty_formatter(true)
        .from_path(&output_path)
        .unwrap();

    ConversionBuilder::new()
        .reader(&reader)
        .writer(&writer)
        .build()
        .run()
        .unwrap();
    drop(writer);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "city": "São Paulo", "country": "Brasil" }])
    );
}

#[test]
fn transform_csv_to_text_grid() {
    let reader = CsvTableReaderBuilder::new().from_reader("id,label\n1,one\n22,\n".as_bytes());
    let mut buffer = Vec::new();
    {
        let writer = TextTableWriterBuilder::new().from_writer(&mut buffer);
        ConversionBuilder::new()
            .reader(&reader)
            .writer(&writer)
            .build()
            .run()
            .unwrap();
    }

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        concat!(
            "+----+-------+\n",
            "| id | label |\n",
            "+----+-------+\n",
            "| 1  | one   |\n",
            "| 22 |       |\n",
            "+----+-------+\n",
        )
    );
}

#[test]
fn empty_input_should_render_table_without_columns() {
    let reader = CsvTableReaderBuilder::new().from_reader("".as_bytes());
    let mut buffer = Vec::new();
    {
        let writer = HtmlTableWriterBuilder::new().from_writer(&mut buffer);
        let report = ConversionBuilder::new()
            .reader(&reader)
            .writer(&writer)
            .build()
            .run()
            .unwrap();
        assert_eq!(report.column_count, 0);
        assert_eq!(report.row_count, 0);
    }

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "<table>\n  <thead>\n    <tr class=\"header\">\n    </tr>\n  </thead>\n</table>\n"
    );
}
