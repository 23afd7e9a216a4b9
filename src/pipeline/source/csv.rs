//! CSV record source.
//!
//! The first line of the export is a header row defining field names;
//! every subsequent line is one raw record keyed by those names.
//!
//! ## Malformed rows
//!
//! The reader runs in flexible mode, so a row with too few or too many
//! columns is not rejected: headers are zipped with whatever fields the
//! parser recovered and the record passes through partially. Only rows
//! the csv crate itself cannot parse at all (unterminated quotes,
//! invalid UTF-8) surface — as per-record [`RecordError::ParseFailed`]
//! entries, never as a batch abort. No row is silently dropped.

use crate::error::RecordError;
use crate::pipeline::input::SourceFormat;
use crate::pipeline::source::RawRecord;
use csv::ReaderBuilder;
use tracing::warn;

/// Parse CSV export text into raw records, one per data row.
///
/// Record indices in errors are 1-based positions among the data rows
/// (the header row does not count).
pub fn parse(text: &str) -> Vec<Result<RawRecord, RecordError>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(e) => {
            // No usable header row means no usable records at all; report
            // it once rather than per row.
            warn!("CSV header row unreadable: {e}");
            return vec![Err(RecordError::ParseFailed {
                index: 0,
                detail: format!("header row unreadable: {e}"),
            })];
        }
    };

    reader
        .records()
        .enumerate()
        .map(|(i, row)| {
            let index = i + 1;
            match row {
                Ok(row) => {
                    let mut rec = RawRecord::new(SourceFormat::Csv);
                    // zip truncates at the shorter side: short rows keep a
                    // partial mapping, long rows drop unnamed trailing fields.
                    for (name, value) in headers.iter().zip(row.iter()) {
                        rec.fields.push((name.clone(), value.to_string()));
                    }
                    Ok(rec)
                }
                Err(e) => {
                    warn!("CSV record {index} unparseable: {e}");
                    Err(RecordError::ParseFailed {
                        index,
                        detail: e.to_string(),
                    })
                }
            }
        })
        .collect()
}
