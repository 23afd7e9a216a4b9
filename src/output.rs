//! Output types returned by the conversion entry points.

use crate::error::RecordError;
use crate::pipeline::input::SourceFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The complete result of a conversion run.
///
/// Returned by [`crate::convert`] even when some records failed; check
/// [`ConversionStats::failed_records`] and the per-record errors in
/// [`ConversionOutput::records`] for partial failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// One entry per source record, in source order.
    pub records: Vec<RecordResult>,
    /// Aggregate counters and timings for the run.
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Iterate over the errors of failed records.
    pub fn errors(&self) -> impl Iterator<Item = &RecordError> {
        self.records.iter().filter_map(|r| r.error.as_ref())
    }
}

/// Outcome of converting a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResult {
    /// 1-based position of the record in the source.
    pub index: usize,
    /// Sanitised output file name (`<title>.md`, or `_.md` for records
    /// with no title).
    pub file_name: String,
    /// Full path of the written file; `None` when the record failed.
    pub path: Option<PathBuf>,
    /// Bytes written for this record.
    pub bytes_written: usize,
    /// The failure, if this record did not make it to disk.
    pub error: Option<RecordError>,
}

/// Aggregate statistics for a conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Records found in the source, including ones that later failed.
    pub total_records: usize,
    /// Records written to disk.
    pub written_records: usize,
    /// Records that failed to parse or write.
    pub failed_records: usize,
    /// Total bytes written across all output files.
    pub total_bytes_written: u64,
    /// Time spent reading and parsing the source.
    pub parse_duration_ms: u64,
    /// Time spent mapping, serialising and writing records.
    pub write_duration_ms: u64,
    /// Wall-clock time for the whole run.
    pub total_duration_ms: u64,
}

/// Summary produced by [`crate::inspect`]: what the source contains,
/// without converting or writing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Format detected from the input file extension.
    pub format: SourceFormat,
    /// Number of records in the source (including unparseable CSV rows).
    pub record_count: usize,
    /// Field names observed in the source, in first-seen order.
    pub field_names: Vec<String>,
}
