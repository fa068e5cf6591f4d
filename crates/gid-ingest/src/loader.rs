//! File loading with encoding fallback and status reporting.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use gid_common::Reporter;
use tracing::{debug, info_span};

use crate::csv::parse_csv_text;
use crate::encoding::{DecodeOutcome, EncodingList, decode_with_fallback};
use crate::error::{IngestError, Result};
use crate::missing::MissingValues;
use crate::table::CsvTable;

/// Options controlling how a delimited file is decoded and parsed.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub encodings: EncodingList,
    pub missing: MissingValues,
}

/// A successfully loaded table and the encoding that decoded it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub table: CsvTable,
    pub encoding: &'static Encoding,
}

/// Loads a comma-separated file, trying each configured encoding in turn.
///
/// Emits one status line through `reporter` for the outcome: file not found,
/// the encoding that succeeded, or exhaustion of the encoding list. Parse
/// errors that are not decoding errors are reported and returned immediately
/// without trying further encodings.
pub fn load_table(path: &Path, options: &LoadOptions, reporter: &dyn Reporter) -> Result<LoadedTable> {
    let span = info_span!("load", file = %path.display());
    let _guard = span.enter();
    let label = path.display();

    if !path.exists() {
        reporter.fail(&format!("'{label}' not found!"));
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            reporter.fail(&format!("Read error: {source}"));
            return Err(IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match decode_with_fallback(&bytes, &options.encodings) {
        DecodeOutcome::Decoded {
            text,
            encoding,
            rejected,
        } => {
            for skipped in &rejected {
                debug!(encoding = skipped.name(), "decode failed, trying next encoding");
            }
            match parse_csv_text(&text, &options.missing, path) {
                Ok(table) => {
                    debug!(rows = table.len(), columns = table.width(), "parsed");
                    reporter.note(&format!(
                        "'{label}' read successfully (encoding: {})",
                        encoding.name()
                    ));
                    Ok(LoadedTable {
                        path: path.to_path_buf(),
                        table,
                        encoding,
                    })
                }
                Err(error) => {
                    reporter.fail(&format!("Read error: {error}"));
                    Err(error)
                }
            }
        }
        DecodeOutcome::Exhausted { .. } => {
            reporter.fail(&format!("'{label}' could not be read with any encoding!"));
            Err(IngestError::EncodingExhausted {
                path: path.to_path_buf(),
                tried: options.encodings.describe(),
            })
        }
    }
}
