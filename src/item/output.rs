use std::{
    cell::RefCell,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::{encoding::TextEncoding, error::ConvertError};

/// Opens `path` for writing, truncating any existing file.
///
/// # Errors
///
/// Returns [`ConvertError::SinkUnavailable`] carrying the OS errno and message
/// when the file cannot be created.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<File, ConvertError> {
    let path = path.as_ref();
    File::create(path).map_err(|error| ConvertError::sink_unavailable(path, &error))
}

/// The byte sink shared by all table writers.
///
/// Rendered text is encoded in full before the first byte is written, so an
/// encoding failure leaves the sink untouched.
pub struct EncodedOutput<W: Write> {
    stream: RefCell<BufWriter<W>>,
    encoding: TextEncoding,
}

impl<W: Write> EncodedOutput<W> {
    pub fn new(wtr: W, encoding: TextEncoding) -> Self {
        Self {
            stream: RefCell::new(BufWriter::new(wtr)),
            encoding,
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Encodes `text`, writes it and flushes the underlying writer.
    pub fn emit(&self, text: &str) -> Result<(), ConvertError> {
        let bytes = self.encoding.encode(text)?;

        let mut stream = self.stream.borrow_mut();
        stream
            .write_all(&bytes)
            .map_err(|error| ConvertError::Writer(error.to_string()))?;
        stream
            .flush()
            .map_err(|error| ConvertError::Writer(error.to_string()))?;

        debug!("Wrote {} byte(s) as {}", bytes.len(), self.encoding);
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, ConvertError> {
        self.stream
            .into_inner()
            .into_inner()
            .map_err(|error| ConvertError::Writer(error.error().to_string()))
    }
}
