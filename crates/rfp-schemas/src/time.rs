//! Wire timestamp codec.
//!
//! The backend emits instants in whichever shape its serializer picks:
//! RFC 3339 with an offset, or a naive ISO string that is UTC by contract
//! (`2026-08-01T12:00:00.123456`). Both are accepted on the way in;
//! serialization always writes RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    Err(format!("unrecognized timestamp '{raw}'"))
}

/// `#[serde(with = "…")]` codec for required instants.
pub mod utc_instant {
    use super::parse_instant;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "…")]` codec for optional instants; `null` and absent
/// both map to `None`.
pub mod utc_instant_opt {
    use super::parse_instant;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        t: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_some(&t.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => parse_instant(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_with_offset() {
        let dt = parse_instant("2026-08-01T12:00:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-08-01T12:00:00+00:00");
    }

    #[test]
    fn naive_iso_is_utc() {
        let dt = parse_instant("2026-08-01T12:00:00.123456").unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123456);
        assert_eq!(dt.to_rfc3339(), "2026-08-01T12:00:00.123456+00:00");
    }

    #[test]
    fn space_separated_form() {
        assert!(parse_instant("2026-08-01 12:00:00").is_ok());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_instant("yesterday").is_err());
    }
}
