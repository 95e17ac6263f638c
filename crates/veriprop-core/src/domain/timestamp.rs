//! Lenient timestamp handling for optional date fields.
//!
//! Upstream records come from forms and mock fixtures, so optional dates can be
//! missing, empty, date-only, or plain garbage. A date that cannot be read is
//! treated as absent rather than failing the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a timestamp in any of the accepted shapes.
///
/// Accepted: RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (assumed UTC), `YYYY-MM-DD`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `#[serde(with = "lenient")]` for `Option<DateTime<Utc>>`.
///
/// Strings go through [`parse_timestamp`], integers are epoch milliseconds,
/// anything else is `None`.
pub mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => parse_timestamp(&s),
            Some(serde_json::Value::Number(n)) => {
                n.as_i64().and_then(DateTime::from_timestamp_millis)
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde::Serialize;

    #[rstest]
    #[case::rfc3339("2024-03-01T10:30:00Z", Some((2024, 3, 1, 10, 30)))]
    #[case::offset("2024-03-01T12:30:00+02:00", Some((2024, 3, 1, 10, 30)))]
    #[case::naive("2024-03-01T10:30:00", Some((2024, 3, 1, 10, 30)))]
    #[case::date_only("2024-03-01", Some((2024, 3, 1, 0, 0)))]
    #[case::empty("  ", None)]
    #[case::garbage("next tuesday", None)]
    fn parses_accepted_shapes(
        #[case] raw: &str,
        #[case] expected: Option<(i32, u32, u32, u32, u32)>,
    ) {
        let expected =
            expected.map(|(y, m, d, h, min)| Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap());
        assert_eq!(parse_timestamp(raw), expected);
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "lenient")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn malformed_field_becomes_none() {
        let h: Holder = serde_json::from_str(r#"{"at": "31/02/2024"}"#).unwrap();
        assert!(h.at.is_none());

        let h: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(h.at.is_none());

        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.at.is_none());

        let h: Holder = serde_json::from_str(r#"{"at": true}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn epoch_millis_are_accepted() {
        let h: Holder = serde_json::from_str(r#"{"at": 0}"#).unwrap();
        assert_eq!(h.at, Some(Utc.timestamp_opt(0, 0).unwrap()));
    }

    #[test]
    fn serializes_as_rfc3339() {
        let h = Holder {
            at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()),
        };
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["at"], "2024-03-01T10:30:00+00:00");
    }
}
