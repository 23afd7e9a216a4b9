//! Error types for the blog2md library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Blog2MdError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing input file, unrecognised extension, XML export missing its
//!   root structure). Returned as `Err(Blog2MdError)` from the top-level
//!   `convert*` functions before any output is produced.
//!
//! * [`RecordError`] — **Non-fatal**: a single record failed (unparseable
//!   CSV row, disk error on one output file) but all other records are
//!   fine. Stored inside [`crate::output::RecordResult`] so callers can
//!   inspect partial success rather than losing the whole batch to one
//!   bad post.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first record failure, log and continue, or collect all errors for a
//! post-run report.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the blog2md library.
///
/// Record-level failures use [`RecordError`] and are stored in
/// [`crate::output::RecordResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Blog2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but is not valid UTF-8 text.
    #[error("Input file '{path}' is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    /// Any other I/O failure while reading the input file.
    #[error("Failed to read input file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Format errors ─────────────────────────────────────────────────────
    /// The input file name does not end in a recognised extension.
    #[error("Unsupported input format: '{input}'\nExpected a file ending in .csv or .xml.")]
    UnsupportedFormat { input: String },

    /// The XML export is missing the expected `data`/`post` structure,
    /// or is not well-formed.
    #[error("Malformed XML export: {detail}")]
    MalformedXml { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory before writing.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single record.
///
/// Stored alongside [`crate::output::RecordResult`] when a record fails.
/// The overall conversion continues past any number of these.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum RecordError {
    /// The CSV parser rejected this row outright (bad quoting, invalid
    /// UTF-8). Rows with only a column-count mismatch do NOT land here;
    /// they pass through with a partial field mapping.
    #[error("Record {index}: row could not be parsed: {detail}")]
    ParseFailed { index: usize, detail: String },

    /// Writing the output file for this record failed.
    #[error("Record {index}: failed to write '{path}': {detail}")]
    WriteFailed {
        index: usize,
        path: String,
        detail: String,
    },
}
