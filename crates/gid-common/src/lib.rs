//! Shared utilities for the global indicator data crates.
//!
//! - [`report`]: the injectable progress/diagnostic reporting capability
//! - [`polars`]: `AnyValue` conversions used when reading long-format frames

pub mod polars;
pub mod report;

pub use polars::{cell_number, cell_text};
pub use report::{MemoryReporter, Message, MessageLevel, Reporter, SilentReporter, TracingReporter};
