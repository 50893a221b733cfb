use crate::{core::table::Table, error::ConvertError};

/// Represents the result of reading a whole table.
pub type TableReaderResult = Result<Table, ConvertError>;

/// Represents the result of writing a table.
pub type TableWriterResult = Result<(), ConvertError>;

/// A source of tabular data.
///
/// A reader consumes its input on the first call: the whole byte stream is
/// decoded and parsed into a [`Table`]. A second call sees an exhausted source.
pub trait TableReader {
    fn read(&self) -> TableReaderResult;
}

/// A destination format for tabular data.
///
/// Implementations render the table to text, encode it with their configured
/// encoding and write the bytes to their sink. Nothing reaches the sink when
/// rendering or encoding fails.
pub trait TableWriter {
    fn write(&self, table: &Table) -> TableWriterResult;
}
