// Timestamp handling for cache entries
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Current time in the format written into cache entries.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a stored timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Whether something updated at `last_updated` is still younger than `ttl`.
pub fn is_within_ttl(last_updated: DateTime<Utc>, ttl: Duration, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(last_updated) < ttl
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_offset_timestamp() {
        let parsed = parse_timestamp("2025-03-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let parsed = parse_timestamp("2025-03-01T10:00:00.123456").unwrap();
        assert_eq!(parsed.timestamp(), Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap().timestamp());

        assert!(parse_timestamp("2025-03-01 10:00:00").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_written_timestamp_parses_back() {
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }

    #[test]
    fn test_ttl_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let ttl = Duration::hours(1);
        assert!(is_within_ttl(now - Duration::minutes(59), ttl, now));
        assert!(!is_within_ttl(now - Duration::hours(1), ttl, now));
        assert!(!is_within_ttl(now - Duration::hours(3), ttl, now));
    }
}
