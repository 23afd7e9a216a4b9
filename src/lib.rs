//! # blog2md
//!
//! Convert blog exports (CSV or XML) to Markdown files with YAML front matter.
//!
//! ## Why this crate?
//!
//! Blog platforms export posts as a CSV table or an XML dump, and flat-file
//! document stores (static-site generators, Obsidian-style vaults) want one
//! Markdown file per post with structured metadata up top. The two export
//! shapes disagree on everything — field names, casing, CDATA wrapping —
//! so this crate normalises both onto one canonical record shape and emits
//! consistently escaped front matter, one file per post.
//!
//! ## Pipeline Overview
//!
//! ```text
//! export file (.csv / .xml)
//!  │
//!  ├─ 1. Input       detect format from extension, read UTF-8 text
//!  ├─ 2. Source      parse rows / <post> elements into raw records
//!  ├─ 3. Mapper      canonical Document (title, status, date, tags, …)
//!  ├─ 4. FrontMatter YAML metadata block, escaped, block-style categories
//!  └─ 5. Write       markdown/<sanitised-title>.md, one file per record
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blog2md::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default(); // writes under ./markdown
//!     let output = convert("export.csv", &config).await?;
//!     eprintln!(
//!         "{}/{} records written",
//!         output.stats.written_records, output.stats.total_records
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Fatal problems (missing input, unsupported extension, malformed XML
//! structure) return [`Blog2MdError`] before anything is written. One bad
//! record — an unparseable CSV row, a full disk on one file — never sinks
//! the batch: it lands as a [`RecordError`] inside its
//! [`output::RecordResult`] and the remaining records proceed.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `blog2md` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! blog2md = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_content, convert_sync, inspect};
pub use error::{Blog2MdError, RecordError};
pub use output::{ConversionOutput, ConversionStats, RecordResult, SourceSummary};
pub use pipeline::input::SourceFormat;
pub use pipeline::mapper::Document;
pub use pipeline::sanitize::sanitize;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
