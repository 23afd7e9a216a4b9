//! Record sources: parse raw export text into format-agnostic raw records.
//!
//! Both variants produce the same intermediate shape, [`RawRecord`]: an
//! ordered list of `(field name, value)` pairs tagged with the format that
//! produced it. The record keeps whatever field names the export used
//! (`"Post status"`, `"Status"`, ...); normalising those onto the canonical
//! schema is the mapper's job, not the source's. This keeps format checks
//! out of every downstream stage.
//!
//! A `RawRecord` is ephemeral: it lives only between parsing and field
//! mapping.

pub mod csv;
pub mod xml;

use crate::pipeline::input::SourceFormat;

/// One raw record as parsed from the export, prior to canonicalisation.
///
/// Field order is preserved from the source. Lookup is ASCII
/// case-insensitive because export schemas are inconsistently cased
/// across tools and versions.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Which source variant produced this record.
    pub format: SourceFormat,
    /// Ordered `(field name, value)` pairs as they appeared in the source.
    pub fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            fields: Vec::new(),
        }
    }

    /// Look up a field by name, ignoring ASCII case.
    ///
    /// Returns the first match in source order when a name appears twice.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
