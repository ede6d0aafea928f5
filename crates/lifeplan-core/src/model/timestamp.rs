//! Dates on the wire: floating seconds since 2001-01-01T00:00:00Z.
//!
//! Exported planner data uses this reference epoch, so records keep it to stay
//! interchangeable. Precision is microseconds.

use chrono::{DateTime, SubsecRound, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Unix timestamp of the reference epoch.
pub const REFERENCE_EPOCH_UNIX: i64 = 978_307_200;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Drops sub-microsecond digits. Dates entering the model go through this so
/// they compare equal after a store round trip.
pub fn truncate(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(6)
}

pub fn to_reference_seconds(dt: &DateTime<Utc>) -> f64 {
    let micros = dt.timestamp_micros() - REFERENCE_EPOCH_UNIX * 1_000_000;
    micros as f64 / MICROS_PER_SEC
}

pub fn from_reference_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let micros = (secs * MICROS_PER_SEC).round();
    if micros.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64 + REFERENCE_EPOCH_UNIX * 1_000_000)
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(to_reference_seconds(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let secs = f64::deserialize(d)?;
    from_reference_seconds(secs).ok_or_else(|| D::Error::custom(format!("date out of range: {secs}")))
}

/// Same encoding for optional dates; absent stays absent.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_some(&to_reference_seconds(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<f64>::deserialize(d)? {
            Some(secs) => from_reference_seconds(secs)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("date out of range: {secs}"))),
            None => Ok(None),
        }
    }
}
