/// Encoded byte sink shared by every table writer.
pub mod output;

#[cfg(feature = "csv")]
/// This module provides a CSV table reader and writer.
pub mod csv;

#[cfg(feature = "html")]
/// This module provides an HTML table writer.
pub mod html;

#[cfg(feature = "json")]
/// This module provides a JSON table writer.
pub mod json;

#[cfg(feature = "text")]
/// This module provides a plain-text grid writer.
pub mod text;
