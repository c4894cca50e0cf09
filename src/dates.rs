use chrono::{DateTime, NaiveDateTime, Utc};

/// Accepted read formats, tried in order. The server is not consistent about
/// fraction width: .NET-style seven-digit fractions (six parsed digits plus a
/// trailing zero), standard dot-fractions of any width, and bare seconds all
/// occur in the wild.
const READ_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.6f0Z",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
];

/// Canonical wire format for a rewritten `DateCreated`: UTC with a fixed
/// six-digit fraction.
const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Parse a server-emitted date-time string. The first matching format wins;
/// `None` when nothing matches.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    READ_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// Render a date-time into the canonical `DateCreated` wire format.
pub fn format_date_created(value: DateTime<Utc>) -> String {
    value.format(WRITE_FORMAT).to_string()
}
