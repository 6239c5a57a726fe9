//! Holds date and time parsers.

use jiff::{
    Zoned,
    fmt::strtime::BrokenDownTime,
    tz::{Offset, TimeZone},
};

use crate::{
    AM_PM, AM_PM_SHORT, DARI_MONTHS, Error, LATIN_MONTHS, Month, Moment, PERSIAN_MONTHS, Result,
    WEEKDAYS, WEEKDAYS_SHORT, Weekday,
    strftime::{Formatter, token_at},
    zone::ZoneRef,
};

/// Parse a host date string with `now` as the basis of relative times.
///
/// The result is in the zone of `now`.
pub fn parse_datetime(s: &str, now: &Zoned) -> Result<Zoned> {
    let s = s.trim();
    let tz = now.time_zone().clone();
    let parsed = parse_datetime::parse_datetime_at_date(now.clone(), s).or_else(|e| {
        tracing::debug!(input = s, error = %e, "relative parse failed, trying absolute");
        parse_datetime::parse_datetime(s)
    });
    match parsed {
        Ok(v) => Ok(v.with_time_zone(tz)),
        Err(e) => Err(Error::parse(s, e.to_string())),
    }
}

/// Parse a triplet of "yyyy/MM/dd".
pub fn parse_ymd(s: &str) -> Result<(i32, i64, i64)> {
    let tm = BrokenDownTime::parse("%Y/%m/%d", s.trim())
        .map_err(|e| Error::parse(s, e.to_string()))?;
    match (tm.year(), tm.month(), tm.day()) {
        (Some(y), Some(m), Some(d)) => Ok((y as i32, m as i64, d as i64)),
        _ => Err(Error::parse(s, "expected yyyy/MM/dd")),
    }
}

/// Parse a Persian date in "yyyy/MM/dd" at midnight of the given zone.
///
/// Like any other field, a day past the end of the month saturates.
pub fn parse_persian_date(s: &str, zone: impl ZoneRef) -> Result<Moment> {
    let (y, m, d) = parse_ymd(s)?;
    Moment::new(y, m, d, 0, 0, 0, 0, zone)
}

/// Match prefix of strings if uniquely identifiable without casing (ASCII only).
///
/// This is only used for easier parsing of names and values with minor extra checkes for constant
/// changing if ever any of the constants needed a tweak.
struct IgnoreCasePrefixMatch<const N: usize> {
    /// How many characters this matching index need before being uniquely matched.
    common_prefixes: [usize; N],
    /// Given values.
    values: [&'static str; N],
}

impl<const N: usize> IgnoreCasePrefixMatch<N> {
    /// Create an instance or panic.
    pub const fn new(list: [&'static str; N]) -> Self {
        assert!(N > 0, "cannot initialize with empty list");

        let mut common_prefixes = [0; N];
        let mut i = 0;
        while i < list.len() {
            assert!(list[i].is_ascii(), "only ASCII values are supported");

            let mut j = i + 1;
            while j < list.len() {
                let a = list[i];
                let b = list[j];
                let eq_up_to = Self::eq_up_to_bytes(a, b);

                assert!(
                    a.len() != eq_up_to && b.len() != eq_up_to,
                    "one entry is the prefix for another so cannot be uniquely identified"
                );

                if common_prefixes[i] < eq_up_to {
                    common_prefixes[i] = eq_up_to;
                }
                if common_prefixes[j] < eq_up_to {
                    common_prefixes[j] = eq_up_to;
                }

                j += 1;
            }

            i += 1;
        }

        Self {
            values: list,
            common_prefixes,
        }
    }

    /// Match the given key if their prefixes match uniquely regardless of ASCII casing.
    pub const fn position(&self, key: &str) -> Option<usize> {
        let mut i = 0;
        while i < N {
            if key.len() > self.common_prefixes[i]
                && key.len() == Self::eq_up_to_bytes(self.values[i], key)
            {
                return Some(i);
            }

            i += 1;
        }
        None
    }

    /// How many bytes between the two strings is the same if their ASCII ignore case is the same.
    pub const fn eq_up_to_bytes(a: &str, b: &str) -> usize {
        let mut i = 0;

        let min_len = if a.len() < b.len() { a.len() } else { b.len() };
        let a = a.as_bytes();
        let b = b.as_bytes();

        while i < min_len {
            if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
                return i;
            }
            i += 1;
        }
        min_len
    }
}

const LATIN_MATCHER: IgnoreCasePrefixMatch<12> = IgnoreCasePrefixMatch::new(LATIN_MONTHS);

/// Parse a month from its number (1..=12), a unique prefix of its Latin name or its Persian or
/// Dari name.
pub fn parse_month(s: &str) -> Result<Month, &'static str> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u8>() {
        return Month::try_from(v).map_err(|_| "month is from 1 to 12 when given as a number");
    }

    let index = LATIN_MATCHER
        .position(s)
        .or_else(|| PERSIAN_MONTHS.iter().position(|i| *i == s))
        .or_else(|| DARI_MONTHS.iter().position(|i| *i == s));
    match index {
        Some(i) => Ok(Month::saturating(i as i64 + 1)), // month is 1 based but index is 0 based
        None => Err("invalid month name (\"mehr\", \"مهر\" or number where Farvardin is 1)"),
    }
}

/// Parse a weekday from its number (0..=6, Saturday is 0) or its Persian name or abbreviation.
pub fn parse_weekday(s: &str) -> Result<Weekday, &'static str> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u8>() {
        if v > Weekday::MAX.get() {
            return Err("weekday is from 0 (Saturday) to 6 (Friday) when a number");
        }
        return Ok(Weekday::new(v));
    }

    WEEKDAYS
        .iter()
        .position(|i| *i == s)
        .or_else(|| WEEKDAYS_SHORT.iter().position(|i| *i == s))
        .map(|i| Weekday::new(i as u8))
        .ok_or("invalid weekday name (\"شنبه\", \"ش\" or number where Saturday is 0)")
}

/// Consumes an input from the left.
struct Scanner<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn error(&self, reason: impl std::fmt::Display) -> Error {
        let at = self.input.len() - self.rest.len();
        Error::parse(self.input, format!("{} at byte {}", reason, at))
    }

    fn literal(&mut self, literal: &str) -> Result<()> {
        match self.rest.strip_prefix(literal) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.error(format_args!("expected {:?}", literal))),
        }
    }

    /// Read `min..=max` ASCII digits.
    fn digits(&mut self, min: usize, max: usize) -> Result<i64> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return Err(self.error(format_args!("expected at least {} digits", min)));
        }
        let (digits, rest) = self.rest.split_at(len);
        let value = digits.parse().map_err(|e| self.error(e))?;
        self.rest = rest;
        Ok(value)
    }

    /// Read a number with an optional leading minus.
    fn signed(&mut self, max: usize) -> Result<i64> {
        let negative = self.rest.starts_with('-');
        if negative {
            self.rest = &self.rest[1..];
        }
        let value = self.digits(1, max)?;
        Ok(if negative { -value } else { value })
    }

    /// Read the longest of the names and return its index.
    fn one_of(&mut self, names: &[&str]) -> Result<usize> {
        let found = names
            .iter()
            .enumerate()
            .filter(|(_, name)| self.rest.starts_with(**name))
            .max_by_key(|(_, name)| name.len());
        match found {
            Some((i, name)) => {
                self.rest = &self.rest[name.len()..];
                Ok(i)
            }
            None => Err(self.error(format_args!("expected one of {:?}", names))),
        }
    }

    /// Read `±HH:MM`.
    fn offset(&mut self) -> Result<i32> {
        let sign = match self.rest.as_bytes().first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(self.error("expected a signed offset")),
        };
        self.rest = &self.rest[1..];
        let hours = self.digits(2, 2)?;
        self.literal(":")?;
        let minutes = self.digits(2, 2)?;
        Ok(sign * (hours * 3600 + minutes * 60) as i32)
    }
}

/// The 12-hour clock as read, resolved once the marker is known.
#[derive(Debug, Clone, Copy)]
enum Hour {
    Full(i64),
    /// `h` style (1..=12 where 12 is the midnight of AM).
    Twelve(i64),
    /// `K` style (0..=12 as stored).
    Stored(i64),
}

/// Parse the input with a token pattern of [`crate::strftime`].
///
/// Only tokens that hold a field can be read (derived ones like `rw` cannot, they give
/// [`Error::UnsupportedToken`]). The year is required, other missing fields take their smallest
/// value. `yyyy` reads up to four digits so it can be followed by other numbers without a
/// separator while `yyy` and `y` read the whole number. Weekday names are checked for shape only
/// since the weekday follows the date. A `Z` token replaces the given zone with its fixed offset.
pub fn parse(pattern: &str, input: &str, zone: impl ZoneRef) -> Result<Moment> {
    let mut zone = zone.resolve()?;
    let mut scanner = Scanner { input, rest: input };

    let mut year = None;
    let (mut month, mut day) = (1, 1);
    let (mut hour, mut minute, mut second) = (Hour::Full(0), 0, 0);
    let (mut nanosecond, mut millisecond) = (None, None);
    let mut pm = None;

    for (literal, token) in Formatter::new(pattern).pieces() {
        scanner.literal(literal)?;
        let Some(token) = token else { continue };
        match token {
            "yyyy" => year = Some(scanner.signed(4)? as i32),
            "yyy" | "y" => year = Some(scanner.signed(9)? as i32),
            "MMM" => month = scanner.one_of(&PERSIAN_MONTHS)? as i64 + 1,
            "MMI" => month = scanner.one_of(&DARI_MONTHS)? as i64 + 1,
            "MM" => month = scanner.digits(2, 2)?,
            "M" => month = scanner.digits(1, 2)?,
            "dd" => day = scanner.digits(2, 2)?,
            "d" => day = scanner.digits(1, 2)?,
            "E" => {
                scanner.one_of(&WEEKDAYS)?;
            }
            "e" => {
                scanner.one_of(&WEEKDAYS_SHORT)?;
            }
            "A" => pm = Some(scanner.one_of(&AM_PM)? == 1),
            "a" => pm = Some(scanner.one_of(&AM_PM_SHORT)? == 1),
            "HH" => hour = Hour::Full(scanner.digits(2, 2)?),
            "H" => hour = Hour::Full(scanner.digits(1, 2)?),
            "kk" => hour = Hour::Full(scanner.digits(2, 2)? % 24),
            "k" => hour = Hour::Full(scanner.digits(1, 2)? % 24),
            "hh" => hour = Hour::Twelve(scanner.digits(2, 2)?),
            "h" => hour = Hour::Twelve(scanner.digits(1, 2)?),
            "KK" => hour = Hour::Stored(scanner.digits(2, 2)?),
            "K" => hour = Hour::Stored(scanner.digits(1, 2)?),
            "mm" => minute = scanner.digits(2, 2)?,
            "m" => minute = scanner.digits(1, 2)?,
            "ss" => second = scanner.digits(2, 2)?,
            "s" => second = scanner.digits(1, 2)?,
            "ns" => nanosecond = Some(scanner.digits(1, 9)?),
            "S" => millisecond = Some(scanner.digits(3, 3)?),
            "Z" => {
                let offset = scanner.offset()?;
                let offset = Offset::from_seconds(offset).map_err(|e| scanner.error(e))?;
                zone = TimeZone::fixed(offset);
            }
            other => {
                return Err(Error::UnsupportedToken {
                    token: token_at(other).unwrap_or("?"),
                });
            }
        }
    }

    if !scanner.rest.is_empty() {
        return Err(scanner.error("unexpected trailing text"));
    }
    let Some(year) = year else {
        return Err(Error::parse(input, "the pattern has no year"));
    };

    let pm = pm.unwrap_or(false);
    let hour = match hour {
        Hour::Full(h) => h,
        Hour::Twelve(12) if !pm => 0,
        Hour::Twelve(h) | Hour::Stored(h) if pm && h < 12 => h + 12,
        Hour::Twelve(h) | Hour::Stored(h) => h,
    };
    let nanosecond = nanosecond.or(millisecond.map(|ms| ms * 1_000_000)).unwrap_or(0);

    Moment::new(year, month, day, hour, minute, second, nanosecond, zone)
}
