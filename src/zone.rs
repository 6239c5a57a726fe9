//! Time zone references and offsets.
//!
//! The zone itself is owned by the host (a [`jiff::tz::TimeZone`]), this crate only resolves
//! references to one and renders its offsets.

use jiff::tz::{Offset, TimeZone};

use crate::{Error, Result};

/// Iran Standard Time (UTC+03:30) in seconds east of UTC.
pub const IRAN_OFFSET: i32 = 12600;

/// Afghanistan Time (UTC+04:30) in seconds east of UTC.
pub const AFGHANISTAN_OFFSET: i32 = 16200;

/// A fixed UTC+03:30 zone.
///
/// It carries no IANA name, so the `z` token renders its offset.
pub fn iran() -> TimeZone {
    fixed(IRAN_OFFSET)
}

/// A fixed UTC+04:30 zone (no IANA name, like [`iran`]).
pub fn afghanistan() -> TimeZone {
    fixed(AFGHANISTAN_OFFSET)
}

/// A fixed zone from a valid constant offset.
fn fixed(seconds: i32) -> TimeZone {
    TimeZone::fixed(Offset::from_seconds(seconds).expect("offset constants are within ±25:59:59"))
}

/// Resolve a zone by its IANA name (or "UTC").
///
/// An empty (absent) or unknown name is an [`Error::InvalidZone`].
pub fn lookup(name: &str) -> Result<TimeZone> {
    let invalid = || Error::InvalidZone {
        name: name.to_owned(),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    TimeZone::get(name).map_err(|e| {
        tracing::debug!(zone = name, error = %e, "zone lookup failed");
        invalid()
    })
}

/// A reference to a time zone that may be absent or unresolvable.
pub trait ZoneRef {
    fn resolve(self) -> Result<TimeZone>;
}

impl ZoneRef for TimeZone {
    fn resolve(self) -> Result<TimeZone> {
        Ok(self)
    }
}

impl ZoneRef for &TimeZone {
    fn resolve(self) -> Result<TimeZone> {
        Ok(self.clone())
    }
}

impl ZoneRef for &str {
    fn resolve(self) -> Result<TimeZone> {
        lookup(self)
    }
}

impl ZoneRef for String {
    fn resolve(self) -> Result<TimeZone> {
        lookup(&self)
    }
}

impl ZoneRef for &String {
    fn resolve(self) -> Result<TimeZone> {
        lookup(self)
    }
}

impl<T: ZoneRef> ZoneRef for Option<T> {
    fn resolve(self) -> Result<TimeZone> {
        match self {
            Some(zone) => zone.resolve(),
            None => Err(Error::InvalidZone {
                name: String::new(),
            }),
        }
    }
}

/// Render seconds east of UTC as `±HH:MM`.
///
/// Seconds that do not make a full minute are dropped.
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, seconds / 3600, seconds % 3600 / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(IRAN_OFFSET), "+03:30");
        assert_eq!(format_offset(AFGHANISTAN_OFFSET), "+04:30");
        assert_eq!(format_offset(-12600), "-03:30");
        assert_eq!(format_offset(-3600 * 10), "-10:00");
        assert_eq!(format_offset(20700 + 59), "+05:45");
    }

    #[test]
    fn test_presets() {
        let ts = jiff::Timestamp::UNIX_EPOCH;
        assert_eq!(iran().to_offset(ts).seconds(), IRAN_OFFSET);
        assert_eq!(afghanistan().to_offset(ts).seconds(), AFGHANISTAN_OFFSET);
    }

    #[test]
    fn test_lookup_absent() {
        assert!(matches!(lookup(""), Err(Error::InvalidZone { .. })));
        assert!(matches!(lookup("   "), Err(Error::InvalidZone { .. })));
    }

    #[test]
    fn test_lookup_unknown() {
        match lookup("Mars/Olympus_Mons") {
            Err(Error::InvalidZone { name }) => assert_eq!(name, "Mars/Olympus_Mons"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zone_ref() {
        assert!(iran().resolve().is_ok());
        assert!((&afghanistan()).resolve().is_ok());
        assert!(Some("UTC").resolve().is_ok());
        assert!(String::from("UTC").resolve().is_ok());
        assert!(matches!(
            None::<TimeZone>.resolve(),
            Err(Error::InvalidZone { .. })
        ));
        assert!(matches!(Some("").resolve(), Err(Error::InvalidZone { .. })));
    }

    #[test]
    fn test_lookup_utc() {
        let tz = lookup("UTC").unwrap();
        assert_eq!(tz.to_offset(jiff::Timestamp::UNIX_EPOCH).seconds(), 0);
    }
}
