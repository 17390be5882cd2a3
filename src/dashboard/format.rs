use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const PREVIEW_CHARS: usize = 30;
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Renders the wall-clock part of a timestamp as `h:MM AM`.
pub fn format_time(input: Option<&str>) -> String {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%-I:%M %p").to_string(),
        None => {
            log::debug!("unparseable timestamp {raw:?}");
            INVALID_DATE.to_string()
        }
    }
}

/// First character of `name`, uppercased. Empty for a missing name.
pub fn initial(name: Option<&str>) -> String {
    name.and_then(|n| n.chars().next())
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_default()
}

pub fn preview(text: Option<&str>) -> String {
    text.map(|t| t.chars().take(PREVIEW_CHARS).collect::<String>())
        .unwrap_or_default()
}

pub fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_as_twelve_hour_clock() {
        assert_eq!(format_time(Some("2024-01-01T10:00:00Z")), "10:00 AM");
        assert_eq!(format_time(Some("2024-01-01T22:05:00+02:00")), "10:05 PM");
    }

    #[test]
    fn formats_sqlite_style_timestamps() {
        assert_eq!(format_time(Some("2024-03-09 00:07:31")), "12:07 AM");
        assert_eq!(format_time(Some("2024-03-09 13:45:00.250")), "1:45 PM");
        assert_eq!(format_time(Some("2024-03-09")), "12:00 AM");
    }

    #[test]
    fn missing_time_is_blank_and_garbage_is_flagged() {
        assert_eq!(format_time(None), "");
        assert_eq!(format_time(Some("  ")), "");
        assert_eq!(format_time(Some("yesterday")), INVALID_DATE);
    }

    #[test]
    fn initial_tolerates_empty_names() {
        assert_eq!(initial(Some("alice")), "A");
        assert_eq!(initial(Some("")), "");
        assert_eq!(initial(None), "");
        assert_eq!(initial(Some("ßen")), "SS");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview(Some("hello there friend")), "hello there friend");
        let long = "é".repeat(40);
        assert_eq!(preview(Some(&long)).chars().count(), PREVIEW_CHARS);
        assert_eq!(preview(None), "");
    }
}
