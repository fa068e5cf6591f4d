//! Library side of the `gid` command: configuration, logging, the staged
//! pipeline and process exit codes.

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod pipeline;
