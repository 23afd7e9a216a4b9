//! CLI binary for blog2md.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use blog2md::{
    convert, inspect, ConversionConfig, ConversionProgressCallback, ProgressCallback, SourceFormat,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-record
/// log lines using [indicatif]. Designed to work correctly when records
/// complete out of order (concurrent writes).
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_conversion_start` (called after parsing, before any write).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Parsing");
        bar.set_message("Reading export…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} records  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_records: usize) {
        self.activate_bar(total_records);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_records} records…"))
        ));
    }

    fn on_record_complete(&self, index: usize, total: usize, path: &Path, bytes: usize) {
        self.bar.println(format!(
            "  {} Record {:>4}/{:<4}  {}  {}",
            green("✓"),
            index,
            total,
            path.display(),
            dim(&format!("{bytes} bytes")),
        ));
        self.bar.inc(1);
    }

    fn on_record_error(&self, index: usize, total: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            let mut m: String = error.chars().take(79).collect();
            m.push('\u{2026}');
            m
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Record {:>4}/{:<4}  {}",
            red("✗"),
            index,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total_records: usize, written_count: usize) {
        let failed = total_records.saturating_sub(written_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} records converted successfully",
                green("✔"),
                bold(&written_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} records converted  ({} failed)",
                if failed == total_records {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&written_count.to_string()),
                total_records,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a CSV export into ./markdown/
  blog2md export.csv

  # Convert an XML export into a custom directory
  blog2md export.xml -o out/posts

  # Force the format when the extension lies
  blog2md dump.xml --format xml

  # Inspect an export without converting
  blog2md --inspect-only export.csv

  # Machine-readable run report
  blog2md --json export.csv > report.json

OUTPUT FORMAT:
  One file per record under the output directory, named
  <sanitised-title>.md (records without a title become _.md):

    ---
    title: My Post
    status: Published
    datePublished: '2024-01-01'
    tags: tech
    categories:
      - a
      - b
    ---

    <body text>

  Name collisions overwrite silently (last record wins).

ENVIRONMENT VARIABLES:
  BLOG2MD_OUTPUT_DIR    Output directory (same as -o)
  BLOG2MD_CONCURRENCY   Concurrent record writes (same as -c)
"#;

/// Convert blog exports (CSV or XML) to Markdown files with YAML front matter.
#[derive(Parser, Debug)]
#[command(
    name = "blog2md",
    version,
    about = "Convert blog exports (CSV or XML) to Markdown files with YAML front matter",
    long_about = "Convert a blog export (a CSV table or an XML dump of posts) into a directory \
of standalone Markdown documents, one per post, each with a structured YAML front-matter header.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the export file (.csv or .xml).
    input: String,

    /// Directory to write the Markdown files into.
    #[arg(short, long, env = "BLOG2MD_OUTPUT_DIR", default_value = "markdown")]
    output_dir: PathBuf,

    /// Force the source format instead of detecting it from the extension.
    #[arg(long, env = "BLOG2MD_FORMAT", value_enum)]
    format: Option<FormatArg>,

    /// Number of concurrent record writes.
    #[arg(short, long, env = "BLOG2MD_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Output the run report as JSON instead of human-readable text.
    #[arg(long, env = "BLOG2MD_JSON")]
    json: bool,

    /// Print export summary only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Disable the progress bar.
    #[arg(long, env = "BLOG2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "BLOG2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "BLOG2MD_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Csv,
    Xml,
}

impl From<FormatArg> for SourceFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Xml => SourceFormat::Xml,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = inspect(&cli.input)
            .await
            .context("Failed to inspect export")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary)
                    .context("Failed to serialise summary")?
            );
        } else {
            println!("File:     {}", cli.input);
            println!("Format:   {}", summary.format);
            println!("Records:  {}", summary.record_count);
            println!("Fields:   {}", summary.field_names.join(", "));
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .output_dir(&cli.output_dir)
        .concurrency(cli.concurrency);
    if let Some(format) = cli.format.clone() {
        builder = builder.format(format.into());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert(&cli.input, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled
        // (the callback already printed the final green/red tick).
        eprintln!(
            "Converted {}/{} records in {}ms → {}",
            output.stats.written_records,
            output.stats.total_records,
            output.stats.total_duration_ms,
            cli.output_dir.display()
        );
        for error in output.errors() {
            eprintln!("  {error}");
        }
    } else if !cli.quiet && !cli.json {
        eprintln!(
            "   {} bytes written  —  {}ms total",
            dim(&output.stats.total_bytes_written.to_string()),
            output.stats.total_duration_ms,
        );
    }

    Ok(())
}
