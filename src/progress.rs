//! Progress-callback trait for per-record conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline processes each record.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a log, or a terminal progress bar
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` because record writes complete
//! out of order under `buffer_unordered`.

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes each record.
///
/// All methods have default no-op implementations so callers only
/// override what they care about. `on_record_complete` and
/// `on_record_error` may be called out of source order; implementations
/// must protect shared mutable state accordingly.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after parsing, before any record is written.
    fn on_conversion_start(&self, total_records: usize) {
        let _ = total_records;
    }

    /// Called just before a record's write is dispatched.
    fn on_record_start(&self, index: usize, total_records: usize) {
        let _ = (index, total_records);
    }

    /// Called when a record's file has been written.
    fn on_record_complete(&self, index: usize, total_records: usize, path: &Path, bytes: usize) {
        let _ = (index, total_records, path, bytes);
    }

    /// Called when a record fails to parse or write.
    fn on_record_error(&self, index: usize, total_records: usize, error: &str) {
        let _ = (index, total_records, error);
    }

    /// Called once after all records have been attempted.
    fn on_conversion_complete(&self, total_records: usize, written_count: usize) {
        let _ = (total_records, written_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
