/// CSV support for reading and writing tables.
///
/// # Module Architecture
///
/// 1. **CsvTableReader**: decodes a byte source with a configurable encoding and
///    parses it into a [`Table`](crate::core::table::Table). The first record is
///    the header.
///
/// 2. **CsvTableWriter**: serializes a table back to CSV, header first, and
///    encodes the result with a configurable encoding.
///
/// Both components follow the builder pattern.
///
/// # Examples
///
/// ```
/// use outputty::core::item::{TableReader, TableWriter};
/// use outputty::item::csv::csv_reader::CsvTableReaderBuilder;
/// use outputty::item::csv::csv_writer::CsvTableWriterBuilder;
///
/// let reader = CsvTableReaderBuilder::new()
///     .delimiter(b';')
///     .from_reader("a;b\n1;x,y\n".as_bytes());
/// let table = reader.read().unwrap();
///
/// let mut buffer = Vec::new();
/// {
///     let writer = CsvTableWriterBuilder::new().from_writer(&mut buffer);
///     writer.write(&table).unwrap();
/// }
///
/// assert_eq!(String::from_utf8(buffer).unwrap(), "a,b\n1,\"x,y\"\n");
/// ```

/// A module providing facilities for reading CSV tables.
pub mod csv_reader;

/// A module providing facilities for writing CSV tables.
pub mod csv_writer;
