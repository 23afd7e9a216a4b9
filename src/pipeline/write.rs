//! Document writing: compose the final Markdown text and persist it.
//!
//! One call handles one record, and its failure mode is deliberately
//! non-fatal: a full disk or a bad path for one post must not sink the
//! rest of the batch, so errors come back as [`RecordError`] inside the
//! per-record result rather than propagating.
//!
//! The output directory is NOT created here. The conversion pipeline
//! ensures it exactly once before any write is scheduled; doing it per
//! write would race the concurrent writes against each other for no
//! benefit.

use crate::error::RecordError;
use crate::output::RecordResult;
use crate::pipeline::frontmatter;
use crate::pipeline::mapper::Document;
use crate::pipeline::sanitize::sanitize;
use std::path::Path;
use tracing::{debug, warn};

/// Compose the full document text from a front-matter block and body.
///
/// This exact shape is the wire contract for consumers of the output:
/// delimited front matter, one blank line, body, trailing newline.
pub fn compose(front_matter: &str, body: &str) -> String {
    format!("---\n{front_matter}\n---\n\n{body}\n")
}

/// Derive the output file name for a document title.
///
/// Collisions are possible (two titles differing only in sanitised
/// characters) and resolve as last-write-wins by policy.
pub fn file_name(title: Option<&str>) -> String {
    format!("{}.md", sanitize(title))
}

/// Serialise and persist one document under `dir`.
///
/// Always returns a [`RecordResult`]; write failures are recorded in it,
/// never raised. `index` is the record's 1-based position in the source.
pub async fn write_document(dir: &Path, doc: &Document, index: usize) -> RecordResult {
    let name = file_name(doc.title.as_deref());
    let path = dir.join(&name);
    let text = compose(&frontmatter::serialize(doc), &doc.body);

    match tokio::fs::write(&path, &text).await {
        Ok(()) => {
            debug!("Wrote record {index} to {}", path.display());
            RecordResult {
                index,
                file_name: name,
                path: Some(path),
                bytes_written: text.len(),
                error: None,
            }
        }
        Err(e) => {
            warn!("Record {index}: write to {} failed: {e}", path.display());
            RecordResult {
                index,
                file_name: name,
                path: None,
                bytes_written: 0,
                error: Some(RecordError::WriteFailed {
                    index,
                    path: path.display().to_string(),
                    detail: e.to_string(),
                }),
            }
        }
    }
}
