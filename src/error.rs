use std::{io, path::Path};

use thiserror::Error;

#[derive(Error, Debug)]
/// Conversion error
pub enum ConvertError {
    #[error("Encoding error ({encoding}): {reason}")]
    Encoding { encoding: String, reason: String },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Malformed row at record {record}: expected {expected} fields, found {found}")]
    MalformedRow {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("[Errno {errno}] {reason}: '{path}'")]
    SourceUnavailable {
        path: String,
        errno: i32,
        reason: String,
    },

    #[error("[Errno {errno}] {reason}: '{path}'")]
    SinkUnavailable {
        path: String,
        errno: i32,
        reason: String,
    },

    #[error("TableReader from: {0}")]
    Reader(String),

    #[error("TableWriter from: {0}")]
    Writer(String),
}

impl ConvertError {
    pub fn source_unavailable(path: &Path, error: &io::Error) -> Self {
        let (errno, reason) = os_error_parts(error);
        ConvertError::SourceUnavailable {
            path: path.display().to_string(),
            errno,
            reason,
        }
    }

    pub fn sink_unavailable(path: &Path, error: &io::Error) -> Self {
        let (errno, reason) = os_error_parts(error);
        ConvertError::SinkUnavailable {
            path: path.display().to_string(),
            errno,
            reason,
        }
    }

    /// Process exit code for this error.
    ///
    /// Unavailable files map to `2`, everything else to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::SourceUnavailable { .. } | ConvertError::SinkUnavailable { .. } => 2,
            _ => 1,
        }
    }
}

/// Splits an I/O error into its errno and the bare OS message.
///
/// `io::Error` renders OS errors as `"No such file or directory (os error 2)"`;
/// the suffix is dropped so the message reads like the C library's `strerror`.
fn os_error_parts(error: &io::Error) -> (i32, String) {
    let errno = error.raw_os_error().unwrap_or(0);
    let message = error.to_string();
    let suffix = format!(" (os error {})", errno);
    let reason = match message.strip_suffix(&suffix) {
        Some(reason) => reason.to_string(),
        None => message,
    };
    (errno, reason)
}
