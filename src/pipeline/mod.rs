//! Pipeline stages for export-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. add another export format) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ source ──▶ mapper ──▶ frontmatter ──▶ write
//! (path)   (csv/xml)  (Document)  (YAML block)   (.md files)
//! ```
//!
//! 1. [`input`]       — detect the format from the file extension and read
//!    the export as UTF-8
//! 2. [`source`]      — parse raw text into ordered raw records; the only
//!    stage that knows the two formats apart
//! 3. [`mapper`]      — canonicalise divergent field names onto the single
//!    [`mapper::Document`] shape
//! 4. [`frontmatter`] — render document metadata as an escaped YAML block
//! 5. [`sanitize`]    — derive a safe file-name fragment from the title
//! 6. [`write`]       — compose the final text and persist one file per
//!    record
//!
//! Data flows strictly left to right: raw bytes → raw records → canonical
//! documents → rendered text → files on disk.

pub mod frontmatter;
pub mod input;
pub mod mapper;
pub mod sanitize;
pub mod source;
pub mod write;
