//! Display formatting for trip fields.
//!
//! Raw timestamps from the API come in several shapes (`2026-03-01 22:30`,
//! `2026-03-01T22:30:00+03:00`, bare `22:30`). Everything here degrades
//! gracefully: malformed input yields a fallback, never an error.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Placeholder shown when a carrier has no title.
pub const UNKNOWN_CARRIER: &str = "Неизвестный перевозчик";

/// Genitive month names, indexed by month number (1-12).
const MONTHS_GENITIVE: [&str; 13] = [
    "",
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Relaxed date-time layouts tried after strict RFC 3339 fails.
const RELAXED_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Extract `HH:MM` from a timestamp or time string.
///
/// Takes the last space- or `T`-delimited component and keeps its first two
/// colon-separated fields. Input without at least two such fields is
/// returned unchanged.
///
/// ```
/// use travel_schedule::trips::format_time;
///
/// assert_eq!(format_time("2026-03-01 22:30"), "22:30");
/// assert_eq!(format_time("2026-03-01T22:30:00+03:00"), "22:30");
/// assert_eq!(format_time("07:15:42"), "07:15");
/// assert_eq!(format_time("Москва"), "Москва");
/// ```
pub fn format_time(raw: &str) -> String {
    let component = raw.rsplit([' ', 'T']).next().unwrap_or(raw);
    let mut fields = component.split(':');

    match (fields.next(), fields.next()) {
        (Some(hours), Some(minutes)) => format!("{hours}:{minutes}"),
        _ => raw.to_string(),
    }
}

/// Russian word for "hour" agreeing with `value`.
///
/// Numbers ending in 11-14 take "часов"; otherwise the last digit decides:
/// 1 → "час", 2-4 → "часа", anything else → "часов".
pub fn pluralize_hours(value: u64) -> &'static str {
    let v = value % 100;
    if (11..=14).contains(&v) {
        return "часов";
    }
    match v % 10 {
        1 => "час",
        2..=4 => "часа",
        _ => "часов",
    }
}

/// Render a duration in seconds as whole hours, e.g. `"9 часов"`.
///
/// Minutes are truncated, not rounded. Negative durations render as zero.
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds.max(0).unsigned_abs() / 3600;
    format!("{hours} {}", pluralize_hours(hours))
}

/// Genitive month name for a 1-based month number; empty when out of range.
pub fn month_name(month: u32) -> &'static str {
    MONTHS_GENITIVE.get(month as usize).copied().unwrap_or("")
}

/// Render a date as `"<day> <month>"`.
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_name(date.month()))
}

/// Render the date part of a raw timestamp as `"<day> <month>"`.
///
/// The date part is whatever precedes the first space, or failing that the
/// first `T`. When there is no date part, or its day/month fields do not
/// parse, `today` is rendered instead.
pub fn format_date(raw: &str, today: NaiveDate) -> String {
    let date_component = if let Some((date, _)) = raw.split_once(' ') {
        date
    } else if let Some((date, _)) = raw.split_once('T') {
        date
    } else {
        return format_day_month(today);
    };

    let parts: Vec<&str> = date_component.split('-').collect();
    if parts.len() != 3 {
        return format_day_month(today);
    }

    match (parts[2].parse::<u32>(), parts[1].parse::<u32>()) {
        (Ok(day), Ok(month)) => format!("{day} {}", month_name(month)),
        _ => format_day_month(today),
    }
}

/// Parse a raw timestamp into an instant used only for ordering.
///
/// Tries RFC 3339 as-is, then with the space separator replaced by `T`, then
/// a relaxed `YYYY-MM-DDTHH:MM[:SS]` read in `now`'s offset. Anything else
/// sorts as `now`.
pub fn parse_sort_key(raw: &str, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed;
    }

    let with_t = raw.replacen(' ', "T", 1);
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&with_t) {
        return parsed;
    }

    RELAXED_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(&with_t, layout).ok())
        .and_then(|naive| naive.and_local_timezone(*now.offset()).single())
        .unwrap_or(now)
}

/// Clean a carrier title for display.
///
/// Keeps the part before the first `/` (the API appends subsidiaries after
/// a slash), trimmed. Missing or blank titles become [`UNKNOWN_CARRIER`].
pub fn clean_carrier_title(title: Option<&str>) -> String {
    let cleaned = title
        .and_then(|t| t.split('/').next())
        .map(str::trim)
        .unwrap_or("");

    if cleaned.is_empty() {
        UNKNOWN_CARRIER.to_string()
    } else {
        cleaned.to_string()
    }
}
