//! Input resolution: detect the export format and read the file as UTF-8.
//!
//! Format detection is deliberately dumb: it looks at the trailing
//! extension of the supplied file name and nothing else. Sniffing content
//! would let a mislabelled file slip through and produce garbage output;
//! an unrecognised extension instead halts the pipeline before any file
//! is written.

use crate::error::Blog2MdError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The two supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Tabular export: first line is a header row defining field names.
    Csv,
    /// Hierarchical export: a `data` root holding a sequence of `post`
    /// elements.
    Xml,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Detect the source format from the trailing extension of `input`.
///
/// Matching is case-insensitive (`export.CSV` works). Anything other than
/// `.csv`/`.xml` is [`Blog2MdError::UnsupportedFormat`]: the pipeline
/// reports it and performs no writes.
pub fn detect_format(input: &str) -> Result<SourceFormat, Blog2MdError> {
    let ext = Path::new(input)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => Ok(SourceFormat::Csv),
        Some("xml") => Ok(SourceFormat::Xml),
        _ => Err(Blog2MdError::UnsupportedFormat {
            input: input.to_string(),
        }),
    }
}

/// Read the input file as UTF-8 text, mapping I/O failures onto the
/// fatal error taxonomy.
///
/// A missing or unreadable input aborts the whole batch; no partial
/// output is produced.
pub async fn read_input(path_str: &str) -> Result<String, Blog2MdError> {
    let path = PathBuf::from(path_str);

    match tokio::fs::read_to_string(&path).await {
        Ok(text) => {
            debug!("Read {} bytes from {}", text.len(), path.display());
            Ok(text)
        }
        Err(e) => Err(match e.kind() {
            std::io::ErrorKind::NotFound => Blog2MdError::InputNotFound { path },
            std::io::ErrorKind::PermissionDenied => Blog2MdError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => Blog2MdError::InvalidUtf8 { path },
            _ => Blog2MdError::ReadFailed { path, source: e },
        }),
    }
}
