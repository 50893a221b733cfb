/// A module providing facilities for writing tables as JSON.
pub mod json_writer;
