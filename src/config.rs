//! Configuration types for export-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`],
//! built via its [`ConversionConfigBuilder`]. Keeping every knob in one
//! struct makes it trivial to share configs across calls and to diff two
//! runs to understand why their outputs differ.

use crate::error::Blog2MdError;
use crate::pipeline::input::SourceFormat;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for an export-to-Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use blog2md::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .output_dir("out/posts")
///     .concurrency(4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Directory the Markdown files are written to, relative to the
    /// working directory unless absolute. Created if absent (idempotent).
    /// Default: `markdown`.
    pub output_dir: PathBuf,

    /// Force a source format instead of detecting it from the input file
    /// extension. Default: `None` (detect).
    pub format: Option<SourceFormat>,

    /// Number of record writes in flight at once. Default: 8.
    ///
    /// Writes are independent (each record targets its own file), so a
    /// modest amount of overlap hides per-file syscall latency. Records
    /// are still dispatched in source order; only completion order varies.
    pub concurrency: usize,

    /// Optional per-record progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("markdown"),
            format: None,
            concurrency: 8,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("output_dir", &self.output_dir)
            .field("format", &self.format)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn format(mut self, format: SourceFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Blog2MdError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(Blog2MdError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(Blog2MdError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = ConversionConfig::default();
        assert_eq!(c.output_dir, PathBuf::from("markdown"));
        assert_eq!(c.concurrency, 8);
        assert!(c.format.is_none());
    }

    #[test]
    fn builder_clamps_concurrency() {
        let c = ConversionConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn empty_output_dir_is_rejected() {
        let err = ConversionConfig::builder().output_dir("").build().unwrap_err();
        assert!(matches!(err, Blog2MdError::InvalidConfig(_)));
    }

    #[test]
    fn format_override_is_stored() {
        let c = ConversionConfig::builder()
            .format(SourceFormat::Xml)
            .build()
            .unwrap();
        assert_eq!(c.format, Some(SourceFormat::Xml));
    }
}
