/// Reader and writer traits shared by every table format
pub mod item;

/// The read-then-write pipeline
pub mod conversion;

/// The in-memory table model
pub mod table;
