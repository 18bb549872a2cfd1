//! Result bundle persistence.

mod json_file;

pub use json_file::JsonFileResultSink;
