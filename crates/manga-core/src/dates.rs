//! Date formatting for chapter listings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Shown when a chapter has no usable creation date.
pub const DATE_UNAVAILABLE: &str = "Data não disponível";

/// Format a backend timestamp as a long pt-BR date (`15 de março de 2024`).
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, and bare `YYYY-MM-DD`.
#[must_use]
pub fn format_long_date(raw: Option<&str>) -> String {
    let Some(date) = raw.map(str::trim).and_then(parse_date) else {
        return DATE_UNAVAILABLE.to_string();
    };
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{} de {month} de {}", date.day(), date.year())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
