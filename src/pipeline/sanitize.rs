//! File-name sanitisation: turn an arbitrary post title into a safe,
//! single-segment file name fragment.
//!
//! Post titles come straight out of the export and can contain anything a
//! blog editor accepts: slashes, colons, quotes, even embedded newlines
//! from sloppy copy-paste. The sanitiser makes exactly two passes:
//!
//! 1. strip line-break and tab control characters (`\r`, `\n`, `\t`)
//! 2. replace every reserved path character (`\ / : * ? " < > |`) with `_`
//!
//! It deliberately does NOT truncate, collapse consecutive `_`, or
//! uniquify: two titles differing only in stripped/replaced characters
//! collide, and the later write wins. That matches the writer's
//! overwrite-on-collision policy.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t]").unwrap());
static RE_RESERVED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]"#).unwrap());

/// Fallback file-name fragment for records with no title at all.
pub const MISSING_TITLE_FALLBACK: &str = "_";

/// Sanitise a title into a file-name fragment.
///
/// `None` (title field absent in the source record) yields
/// [`MISSING_TITLE_FALLBACK`], so every record produces a non-empty file
/// name. Pure, total, and idempotent: sanitising already-sanitised input
/// is a no-op.
pub fn sanitize(name: Option<&str>) -> String {
    let Some(name) = name else {
        return MISSING_TITLE_FALLBACK.to_string();
    };
    let stripped = RE_CONTROL.replace_all(name, "");
    RE_RESERVED.replace_all(&stripped, "_").into_owned()
}
