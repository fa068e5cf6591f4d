//! Trial decoding against an ordered list of text encodings.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{IngestError, Result};

/// Encodings tried by default, in order.
///
/// Labels follow the WHATWG encoding standard; `latin1` and `iso-8859-9`
/// resolve to the Windows supersets (`windows-1252`, `windows-1254`).
pub const DEFAULT_ENCODING_LABELS: &[&str] = &["utf-8", "windows-1252", "latin1", "iso-8859-9"];

/// An ordered, resolved list of candidate encodings.
#[derive(Debug, Clone)]
pub struct EncodingList {
    encodings: Vec<&'static Encoding>,
}

impl EncodingList {
    /// Resolves encoding labels, keeping their order.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let encodings = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                    IngestError::UnknownEncoding {
                        label: label.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { encodings })
    }

    pub fn as_slice(&self) -> &[&'static Encoding] {
        &self.encodings
    }

    /// Comma-separated encoding names, used in diagnostics.
    pub fn describe(&self) -> String {
        self.encodings
            .iter()
            .map(|encoding| encoding.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for EncodingList {
    fn default() -> Self {
        let encodings = DEFAULT_ENCODING_LABELS
            .iter()
            .filter_map(|label| Encoding::for_label(label.as_bytes()))
            .collect();
        Self { encodings }
    }
}

/// Outcome of [`decode_with_fallback`].
#[derive(Debug)]
pub enum DecodeOutcome<'a> {
    /// The first encoding that decoded the bytes without errors.
    Decoded {
        text: Cow<'a, str>,
        encoding: &'static Encoding,
        /// Encodings that were tried and rejected before this one.
        rejected: Vec<&'static Encoding>,
    },
    /// Every candidate encoding hit malformed input.
    Exhausted { tried: Vec<&'static Encoding> },
}

/// Decodes `bytes` with each encoding in order; first clean decode wins.
///
/// A UTF-8 byte order mark is stripped when the winning encoding is UTF-8.
/// No replacement characters are ever produced.
pub fn decode_with_fallback<'a>(bytes: &'a [u8], encodings: &EncodingList) -> DecodeOutcome<'a> {
    let mut rejected = Vec::new();
    for &encoding in encodings.as_slice() {
        let input = if encoding == UTF_8 {
            bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
        } else {
            bytes
        };
        match encoding.decode_without_bom_handling_and_without_replacement(input) {
            Some(text) => {
                return DecodeOutcome::Decoded {
                    text,
                    encoding,
                    rejected,
                };
            }
            None => rejected.push(encoding),
        }
    }
    DecodeOutcome::Exhausted { tried: rejected }
}
