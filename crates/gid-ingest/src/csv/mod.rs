//! CSV text parsing.

mod header;
mod reader;

pub use header::normalize_headers;
pub use reader::parse_csv_text;
