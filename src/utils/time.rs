//! Time utilities: ISO-8601 timestamps and today's date.

use chrono::{Local, SecondsFormat, Utc};

/// Current UTC instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's local date as `YYYY-MM-DD` (form default).
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Date part of an ISO timestamp, used in default export file names.
pub fn date_part(iso: &str) -> &str {
    iso.get(..10).unwrap_or(iso)
}
