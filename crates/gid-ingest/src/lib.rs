//! Encoding-tolerant CSV ingestion.
//!
//! This crate loads delimited text files into an in-memory [`CsvTable`]:
//!
//! - **Encoding fallback**: decode the raw bytes with each configured encoding
//!   in turn; the first clean decode wins
//! - **Missing markers**: tokens such as `..` or `#N/A` become absent cells
//! - **Header normalization**: trimmed, BOM-free, unique column names
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use gid_common::TracingReporter;
//! use gid_ingest::{LoadOptions, load_table};
//!
//! let loaded = load_table(Path::new("data_main.csv"), &LoadOptions::default(), &TracingReporter)?;
//! println!("{} rows via {}", loaded.table.len(), loaded.encoding.name());
//! ```

mod csv;
mod encoding;
mod error;
mod loader;
mod missing;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encodings ===
pub use encoding::{
    DEFAULT_ENCODING_LABELS, DecodeOutcome, EncodingList, decode_with_fallback,
};

// === Missing-value markers ===
pub use missing::{COMMON_NULL_TOKENS, DEFAULT_MISSING_VALUES, MissingValues};

// === CSV Reading ===
pub use csv::{normalize_headers, parse_csv_text};
pub use loader::{LoadOptions, LoadedTable, load_table};
pub use table::CsvTable;
