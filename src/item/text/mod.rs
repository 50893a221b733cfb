/// A module providing facilities for drawing tables as plain text.
pub mod text_writer;
