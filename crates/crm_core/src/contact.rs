use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses the timestamps the lead service returns: RFC 3339, or a naive
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` taken as UTC.
pub fn parse_service_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Coarse "how long ago" label for the lead card.
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(elapsed.num_days(), "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Label for a freshly created lead, falling back to "just now" when the
/// service sent no usable timestamp.
pub fn label_from_service(raw: Option<&str>, now: DateTime<Utc>) -> String {
    raw.and_then(parse_service_timestamp)
        .map(|then| relative_label(then, now))
        .unwrap_or_else(|| "just now".to_string())
}
