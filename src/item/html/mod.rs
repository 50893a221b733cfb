/// A module providing facilities for rendering tables as HTML.
pub mod html_writer;
