//! Publication date discovery and parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::IngestError;

/// Column names tried, in order, when looking for the publication date.
pub const DATE_CANDIDATES: [&str; 6] = [
    "published_at",
    "publishedAt",
    "published_date",
    "date",
    "created_at",
    "fetched_at",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Pick the first [`DATE_CANDIDATES`] entry present in `columns`.
///
/// # Errors
///
/// Returns [`IngestError::NoDateColumn`] when none of the candidates exist.
pub fn find_date_column<'a, I>(columns: I) -> Result<&'static str, IngestError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = columns.into_iter().collect();
    DATE_CANDIDATES
        .iter()
        .find(|candidate| present.contains(candidate))
        .copied()
        .ok_or_else(|| IngestError::NoDateColumn {
            looked_for: DATE_CANDIDATES.join(", "),
            found: present.join(", "),
        })
}

/// Parse a timestamp cell into UTC.
///
/// Offsets are honoured and converted; timestamps without an offset and bare
/// dates are taken as UTC. Returns `None` for blank or unrecognised input.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
