use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 so `ORDER BY created_at` sorts chronologically.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn to_score(value: i64, field: &str) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|score| *score <= crate::metrics::SCORE_MAX)
        .ok_or_else(|| anyhow!("{field} holds out-of-range score {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetimes_round_trip_at_fixed_width() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        let text = format_datetime(&at);
        assert_eq!(text, "2024-03-09T18:30:00.000000Z");
        assert_eq!(parse_datetime(&text, "created_at").unwrap(), at);
        assert!(parse_datetime("yesterday", "created_at").is_err());
    }

    #[test]
    fn scores_outside_range_are_rejected() {
        assert_eq!(to_score(7, "rating").unwrap(), 7);
        assert!(to_score(11, "rating").is_err());
        assert!(to_score(-1, "rating").is_err());
    }
}
