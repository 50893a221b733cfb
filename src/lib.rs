#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # outputty

 Read tabular data in one format and write it in another, with explicit
 character-encoding handling on both sides.

 ## Core Concepts

- **Table:** an ordered header plus ordered rows of text cells. Every row has as many cells as the header has columns.
- **TableReader:** decodes a byte source with a configured encoding and parses it into a `Table`.
- **TableWriter:** renders a `Table`, encodes the text with a configured encoding and writes it to a sink.
- **Conversion:** one read-then-write pass from a reader to a writer.

 ## Features

| **Feature** | **Description**                                   |
|-------------|---------------------------------------------------|
| csv         | Enables the CSV `TableReader` and `TableWriter`   |
| html        | Enables the HTML `TableWriter`                    |
| json        | Enables the JSON `TableWriter`                    |
| text        | Enables the plain-text grid `TableWriter`         |
| full        | Enables all available features (default)          |

 ## Getting Started

```rust
# use outputty::{
#     core::conversion::ConversionBuilder,
#     encoding::TextEncoding,
#     error::ConvertError,
#     item::csv::csv_reader::CsvTableReaderBuilder,
#     item::html::html_writer::HtmlTableWriterBuilder,
# };
fn main() -> Result<(), ConvertError> {
    let csv = "name,city\nÁlvaro,São Paulo\nJane,Boston\n";

    let reader = CsvTableReaderBuilder::new()
        .delimiter(b',')
        .from_reader(csv.as_bytes());

    let mut html = Vec::new();
    {
        let writer = HtmlTableWriterBuilder::new()
            .encoding(TextEncoding::for_label("iso-8859-1")?)
            .from_writer(&mut html);

        let conversion = ConversionBuilder::new()
            .reader(&reader)
            .writer(&writer)
            .build();
        conversion.run()?;
    }

    assert!(html.starts_with(b"<table>\n"));
    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: table model, reader/writer traits and the conversion pipeline
pub mod core;

/// Character encodings for input and output
pub mod encoding;

/// Error types for conversions
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of table readers / writers (for example: csv reader, html writer)
pub mod item;
