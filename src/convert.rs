//! Eager (full-batch) conversion entry points.
//!
//! [`convert`] is the primary entry point: it resolves the input file,
//! detects the format, and runs the whole pipeline. [`convert_content`]
//! is the decoupled core for callers that already hold the export text —
//! the interactive collection of a file name is an external collaborator,
//! not part of this contract. [`inspect`] parses without writing.
//!
//! Per-record failures never abort the batch: every record gets a
//! [`RecordResult`], and the returned [`ConversionOutput`] reports how
//! many made it to disk. Only read/parse-level problems are fatal, and
//! those surface before any output is produced.

use crate::config::ConversionConfig;
use crate::error::{Blog2MdError, RecordError};
use crate::output::{ConversionOutput, ConversionStats, RecordResult, SourceSummary};
use crate::pipeline::source::RawRecord;
use crate::pipeline::{input, mapper, source, write};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert an export file to one Markdown file per record.
///
/// # Arguments
/// * `input_str` — path to a `.csv` or `.xml` export file
/// * `config` — conversion configuration
///
/// # Returns
/// `Ok(ConversionOutput)` on success, even if some records failed
/// (check `output.stats.failed_records`).
///
/// # Errors
/// Returns `Err(Blog2MdError)` only for fatal errors:
/// - input file missing / unreadable / not UTF-8
/// - unrecognised extension (no output is produced)
/// - malformed XML structure
/// - output directory cannot be created
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Blog2MdError> {
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    // ── Step 1: Detect format ────────────────────────────────────────────
    let format = match config.format {
        Some(f) => f,
        None => input::detect_format(input_str)?,
    };
    debug!("Source format: {format}");

    // ── Step 2: Read input ───────────────────────────────────────────────
    let text = input::read_input(input_str).await?;

    convert_content(&text, format, config).await
}

/// Convert already-resolved export text.
///
/// The core pipeline entry: takes the content string and its format
/// directly, with no file-system read on the input side.
pub async fn convert_content(
    text: &str,
    format: input::SourceFormat,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Blog2MdError> {
    let total_start = Instant::now();

    // ── Step 1: Parse into raw records ───────────────────────────────────
    let parse_start = Instant::now();
    let records = parse_records(text, format)?;
    let parse_duration_ms = parse_start.elapsed().as_millis() as u64;
    let total = records.len();
    info!("Parsed {total} records in {parse_duration_ms}ms");

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total);
    }

    // ── Step 2: Ensure the output directory, once, before any write ──────
    // create_dir_all is idempotent; an already-existing directory is fine.
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| Blog2MdError::OutputDirFailed {
            path: config.output_dir.clone(),
            source: e,
        })?;

    // ── Step 3: Map and write each record independently ──────────────────
    // Dispatch in source order; completion order is unordered on purpose,
    // each record targets its own file.
    let write_start = Instant::now();
    let mut results: Vec<RecordResult> =
        stream::iter(records.into_iter().enumerate().map(|(i, raw)| {
            let index = i + 1;
            async move {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_record_start(index, total);
                }
                let result = match raw {
                    Ok(raw) => {
                        let doc = mapper::map_record(&raw);
                        write::write_document(&config.output_dir, &doc, index).await
                    }
                    Err(error) => failed_record(index, error),
                };
                if let Some(ref cb) = config.progress_callback {
                    match (&result.error, &result.path) {
                        (None, Some(path)) => {
                            cb.on_record_complete(index, total, path, result.bytes_written)
                        }
                        (Some(e), _) => cb.on_record_error(index, total, &e.to_string()),
                        _ => {}
                    }
                }
                result
            }
        }))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    // Restore source order for reporting.
    results.sort_by_key(|r| r.index);

    // ── Step 4: Compute stats ────────────────────────────────────────────
    let written = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - written;
    if failed > 0 {
        warn!("{failed}/{total} records failed; see per-record errors");
    }

    let stats = ConversionStats {
        total_records: total,
        written_records: written,
        failed_records: failed,
        total_bytes_written: results.iter().map(|r| r.bytes_written as u64).sum(),
        parse_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} records written, {}ms total",
        written, total, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total, written);
    }

    Ok(ConversionOutput {
        records: results,
        stats,
    })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Blog2MdError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Blog2MdError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input_str, config))
}

/// Inspect an export file without converting it.
///
/// Parses the source and reports the detected format, record count, and
/// observed field names. Performs no writes and needs no output directory.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<SourceSummary, Blog2MdError> {
    let input_str = input_str.as_ref();
    let format = input::detect_format(input_str)?;
    let text = input::read_input(input_str).await?;
    let records = parse_records(&text, format)?;

    let mut field_names: Vec<String> = Vec::new();
    for rec in records.iter().filter_map(|r| r.as_ref().ok()) {
        for (name, _) in &rec.fields {
            if !field_names.iter().any(|n| n == name) {
                field_names.push(name.clone());
            }
        }
    }

    Ok(SourceSummary {
        format,
        record_count: records.len(),
        field_names,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run the matching record source for the detected format.
///
/// CSV isolates bad rows as per-record errors; XML structural problems
/// are fatal for the whole flow, so its records all arrive as `Ok`.
fn parse_records(
    text: &str,
    format: input::SourceFormat,
) -> Result<Vec<Result<RawRecord, RecordError>>, Blog2MdError> {
    Ok(match format {
        input::SourceFormat::Csv => source::csv::parse(text),
        input::SourceFormat::Xml => source::xml::parse(text)?.into_iter().map(Ok).collect(),
    })
}

fn failed_record(index: usize, error: RecordError) -> RecordResult {
    RecordResult {
        index,
        file_name: String::new(),
        path: None,
        bytes_written: 0,
        error: Some(error),
    }
}
