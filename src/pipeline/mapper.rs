//! Field mapping: canonicalise a raw record into a [`Document`].
//!
//! The two export formats disagree on field names (`"Post status"` in CSV,
//! `"Status"` in XML; `"Published date"` vs `"Date"`). The mapper owns
//! those alias lists so no other stage ever looks at a raw field name.
//!
//! Mapping is pure and infallible: every input, however sparse, produces
//! some `Document`. Absent fields stay absent (`None`) rather than being
//! coerced to placeholder values, so serialisation and tests can
//! distinguish "empty string" from "field not supplied". The one
//! exception is `body`, which defaults to the empty string because the
//! writer always renders a body section.

use crate::pipeline::source::RawRecord;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Canonical, format-independent representation of one converted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Post title, passed through as-is (no trimming). Absence is a known
    /// edge case handled by the file-name sanitiser, not an error.
    pub title: Option<String>,
    /// Publication status (`Published`, `Draft`, ...).
    pub status: Option<String>,
    /// Publish date, kept as the raw source string.
    pub date_published: Option<String>,
    /// Tags scalar, format preserved as-is.
    pub tags: Option<String>,
    /// Categories, split from the source's pipe-delimited scalar. `None`
    /// when the source field is absent — never an empty vec standing in
    /// for absence.
    pub categories: Option<Vec<String>>,
    /// Body content; empty string when the source had none.
    pub body: String,
}

// Field-name aliases, CSV spelling first. Lookup through RawRecord::get is
// already case-insensitive, so these only need to cover word-level
// differences between the formats.
const TITLE_FIELDS: &[&str] = &["Title"];
const STATUS_FIELDS: &[&str] = &["Post status", "Status"];
const DATE_FIELDS: &[&str] = &["Published date", "Date"];
const TAGS_FIELDS: &[&str] = &["Tags"];
const CATEGORIES_FIELDS: &[&str] = &["Categories"];
const BODY_FIELDS: &[&str] = &["Content"];

/// Map one raw record onto the canonical document shape.
pub fn map_record(raw: &RawRecord) -> Document {
    let doc = Document {
        title: first_match(raw, TITLE_FIELDS),
        status: first_match(raw, STATUS_FIELDS),
        date_published: first_match(raw, DATE_FIELDS),
        tags: first_match(raw, TAGS_FIELDS),
        categories: first_match(raw, CATEGORIES_FIELDS).map(|s| split_categories(&s)),
        body: first_match(raw, BODY_FIELDS).unwrap_or_default(),
    };
    trace!(format = %raw.format, title = ?doc.title, "mapped record");
    doc
}

fn first_match(raw: &RawRecord, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|name| raw.get(name))
        .map(str::to_string)
}

/// Split a pipe-delimited categories scalar into an ordered sequence.
///
/// No whitespace trimming around separators; empty segments survive so
/// the output mirrors the source exactly.
fn split_categories(raw: &str) -> Vec<String> {
    raw.split('|').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::input::SourceFormat;

    fn record(format: SourceFormat, fields: &[(&str, &str)]) -> RawRecord {
        let mut rec = RawRecord::new(format);
        for (k, v) in fields {
            rec.fields.push((k.to_string(), v.to_string()));
        }
        rec
    }

    #[test]
    fn maps_csv_spellings() {
        let raw = record(
            SourceFormat::Csv,
            &[
                ("Title", "My Post"),
                ("Post status", "Published"),
                ("Published date", "2024-01-01"),
                ("Tags", "tech"),
                ("Categories", "a|b"),
                ("Content", "Hello world"),
            ],
        );
        let doc = map_record(&raw);
        assert_eq!(doc.title.as_deref(), Some("My Post"));
        assert_eq!(doc.status.as_deref(), Some("Published"));
        assert_eq!(doc.date_published.as_deref(), Some("2024-01-01"));
        assert_eq!(doc.tags.as_deref(), Some("tech"));
        assert_eq!(
            doc.categories,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(doc.body, "Hello world");
    }

    #[test]
    fn maps_xml_spellings_to_the_same_schema() {
        let raw = record(
            SourceFormat::Xml,
            &[
                ("Title", "My Post"),
                ("Status", "Draft"),
                ("Date", "2023-06-15"),
            ],
        );
        let doc = map_record(&raw);
        assert_eq!(doc.status.as_deref(), Some("Draft"));
        assert_eq!(doc.date_published.as_deref(), Some("2023-06-15"));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let doc = map_record(&record(SourceFormat::Csv, &[("Title", "t")]));
        assert_eq!(doc.status, None);
        assert_eq!(doc.date_published, None);
        assert_eq!(doc.tags, None);
        assert_eq!(doc.categories, None, "absent categories must not be Some(vec![])");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn absent_title_is_tolerated() {
        let doc = map_record(&record(SourceFormat::Csv, &[("Content", "body only")]));
        assert_eq!(doc.title, None);
        assert_eq!(doc.body, "body only");
    }

    #[test]
    fn title_is_not_trimmed() {
        let doc = map_record(&record(SourceFormat::Csv, &[("Title", "  padded  ")]));
        assert_eq!(doc.title.as_deref(), Some("  padded  "));
    }

    #[test]
    fn categories_split_preserves_order_and_whitespace() {
        let doc = map_record(&record(
            SourceFormat::Xml,
            &[("Categories", "first| second |third")],
        ));
        assert_eq!(
            doc.categories,
            Some(vec![
                "first".to_string(),
                " second ".to_string(),
                "third".to_string()
            ])
        );
    }

    #[test]
    fn single_category_is_a_one_element_sequence() {
        let doc = map_record(&record(SourceFormat::Csv, &[("Categories", "solo")]));
        assert_eq!(doc.categories, Some(vec!["solo".to_string()]));
    }

    #[test]
    fn empty_categories_scalar_is_one_empty_segment() {
        // Present-but-empty is not absence: "" splits to [""].
        let doc = map_record(&record(SourceFormat::Csv, &[("Categories", "")]));
        assert_eq!(doc.categories, Some(vec![String::new()]));
    }
}
