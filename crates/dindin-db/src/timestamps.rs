//! Timestamp encoding for the TEXT columns.
//!
//! Stored as RFC 3339 UTC with microseconds and a `Z` suffix
//! (`2024-03-15T12:00:00.123456Z`). Rows written by older clients with
//! millisecond precision still parse.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

use crate::error::{DbError, DbResult};

/// Current time at storage precision, so returned records equal stored ones.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(table: &str, id: &str, raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::invalid_row(table, id, format!("timestamp '{}': {}", raw, e)))
}

/// Update time for a record last touched at `previous`.
///
/// Strictly after `previous` even when the clock has not advanced
/// (or went backwards) since the last write.
pub fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_round_trips() {
        let ts = now();
        let parsed = parse_timestamp("categories", "x", &format_timestamp(ts)).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn test_parses_millisecond_iso_strings() {
        let parsed = parse_timestamp("categories", "x", "2024-01-02T03:04:05.678Z").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(678)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_timestamp("categories", "x", "yesterday").unwrap_err();
        assert!(matches!(err, DbError::InvalidRow { .. }));
    }

    #[test]
    fn test_next_update_is_strictly_later() {
        let future = now() + Duration::hours(1);
        assert!(next_update_timestamp(future) > future);

        let past = now() - Duration::hours(1);
        assert!(next_update_timestamp(past) > past);
    }
}
