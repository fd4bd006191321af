//! Clock and date helpers for sale timestamps
//!
//! Sale dates travel as ISO-8601 strings. The backend writes local
//! date-times without offset (`2024-03-05T14:02:11.250`), older records
//! and browser-created drafts may carry an offset or only a date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format used when a sale date is sent to the backend
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Current local wall-clock time, the creation date of a new basket
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Render a sale date for the wire
pub fn format_sale_date(date: &NaiveDateTime) -> String {
    date.format(SALE_DATE_FORMAT).to_string()
}

/// Parse a sale date in any of the accepted shapes
///
/// Offsets are dropped after conversion to the wall-clock time they carry,
/// a bare date is read as midnight.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
