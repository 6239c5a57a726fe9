//! Holds the token formatter of [`Moment`].
//!
//! A pattern is plain text where the following tokens are substituted (anything else is kept):
//!
//! | token             | value                                                    |
//! |-------------------|----------------------------------------------------------|
//! | `yyyy`, `yyy`, `y` | year (1394)                                             |
//! | `yy`              | last two digits of the year (94)                         |
//! | `MMM`             | Persian name of the month (فروردین)                       |
//! | `MMI`             | Dari name of the month (حمل)                              |
//! | `MM`, `M`         | month, padded to two digits or not                       |
//! | `rw`, `w`         | weeks remaining in the year, weeks passed in the year    |
//! | `RW`, `W`         | weeks remaining in the month, weeks passed in the month  |
//! | `RD`, `D`         | days remaining in the year, day of the year              |
//! | `rd`              | days remaining in the month                              |
//! | `dd`, `d`         | day of the month, padded to two digits or not            |
//! | `E`, `e`          | Persian name of the weekday, its one letter abbreviation |
//! | `A`, `a`          | Persian 12-hour marker, its abbreviation                 |
//! | `HH`, `H`         | hour (0..=23)                                            |
//! | `kk`, `k`         | hour (1..=24)                                            |
//! | `hh`, `h`         | hour (1..=12)                                            |
//! | `KK`, `K`         | hour in the 12-hour clock as stored (0..=12)             |
//! | `mm`, `m`         | minute                                                   |
//! | `ss`, `s`         | second                                                   |
//! | `ns`              | nanosecond                                               |
//! | `S`               | millisecond, padded to three digits                      |
//! | `z`               | IANA name of the time zone, the offset for fixed zones   |
//! | `Z`               | offset of the time zone (+03:30)                         |
//!
//! At each position the longest token wins so "yyyy" is never read as four "y".

use crate::{Moment, zone};

/// Every token, a token always comes before the shorter ones it starts with.
pub const TOKENS: [&str; 37] = [
    "yyyy", "yyy", "yy", "y", "MMM", "MMI", "MM", "M", "rw", "w", "RW", "W", "RD", "D", "rd", "dd",
    "d", "E", "e", "A", "a", "HH", "H", "kk", "k", "hh", "h", "KK", "K", "mm", "m", "ns", "ss",
    "s", "S", "z", "Z",
];

/// Find the token the given text starts with.
pub fn token_at(s: &str) -> Option<&'static str> {
    TOKENS.iter().find(|t| s.starts_with(**t)).copied()
}

/// Holds an exploded list of tokens and literals.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter<'a> {
    directives: Vec<(usize, &'a str)>,
    original: &'a str,
}

impl<'a> Formatter<'a> {
    pub fn new(format: &'a str) -> Self {
        let mut directives = Vec::new();
        let mut i = 0;
        while i < format.len() {
            let rest = &format[i..];
            match token_at(rest) {
                Some(token) => {
                    directives.push((i, &rest[..token.len()]));
                    i += token.len();
                }
                // step over a whole char to stay on boundaries
                None => i += rest.chars().next().map_or(1, char::len_utf8),
            }
        }

        Self {
            directives,
            original: format,
        }
    }

    /// The tokens found and where they start.
    pub fn directives(&self) -> &[(usize, &'a str)] {
        &self.directives
    }

    /// The literal text between tokens paired with the token that follows it (if any).
    pub fn pieces(&self) -> Vec<(&'a str, Option<&'a str>)> {
        let mut pieces = Vec::with_capacity(self.directives.len() + 1);
        let mut previous_end = 0;
        for (start, directive) in self.directives.iter() {
            pieces.push((&self.original[previous_end..*start], Some(*directive)));
            previous_end = start + directive.len();
        }
        if previous_end < self.original.len() {
            pieces.push((&self.original[previous_end..], None));
        }
        pieces
    }

    /// Reconstruct the values given a "reconstructor" function.
    ///
    /// A reconstructor takes a token and outputs a string to replace it ("yyyy" -> "1395"). If it
    /// returns nothing, the token is kept as is.
    pub fn lenient_reconstruct_with<F: Fn(&str) -> Option<String>>(&self, f: F) -> String {
        let mut new = String::with_capacity(self.original.len());
        for (literal, directive) in self.pieces() {
            new.push_str(literal);
            if let Some(directive) = directive {
                match f(directive) {
                    Some(s) => new.push_str(&s),
                    None => new.push_str(directive),
                }
            }
        }
        new
    }
}

/// Report a zero hour as `max` (12 or 24) for display.
pub const fn modify_hour(value: u8, max: u8) -> u8 {
    if value == 0 { max } else { value }
}

/// Create a reconstructor for [`Formatter`] that renders tokens of the given moment.
pub fn moment_resolve(m: &Moment) -> impl Fn(&str) -> Option<String> + '_ {
    move |token: &str| {
        Some(match token {
            "yyyy" | "yyy" | "y" => m.year().to_string(),
            "yy" => format!("{:02}", m.year().rem_euclid(100)),
            "MMM" => m.month().name().to_owned(),
            "MMI" => m.month().dari().to_owned(),
            "MM" => format!("{:02}", m.month().get()),
            "M" => m.month().get().to_string(),
            "rw" => m.remaining_year_week().to_string(),
            "w" => m.year_week().to_string(),
            "RW" => m.remaining_month_week().to_string(),
            "W" => m.month_week().to_string(),
            "RD" => m.remaining_year_day().to_string(),
            "D" => m.year_day().to_string(),
            "rd" => m.remaining_month_day().to_string(),
            "dd" => format!("{:02}", m.day()),
            "d" => m.day().to_string(),
            "E" => m.weekday().name().to_owned(),
            "e" => m.weekday().short().to_owned(),
            "A" => m.am_pm().name().to_owned(),
            "a" => m.am_pm().short().to_owned(),
            "HH" => format!("{:02}", m.hour()),
            "H" => m.hour().to_string(),
            "kk" => format!("{:02}", modify_hour(m.hour(), 24)),
            "k" => modify_hour(m.hour(), 24).to_string(),
            "hh" => format!("{:02}", modify_hour(m.hour12(), 12)),
            "h" => modify_hour(m.hour12(), 12).to_string(),
            "KK" => format!("{:02}", m.hour12()),
            "K" => m.hour12().to_string(),
            "mm" => format!("{:02}", m.minute()),
            "m" => m.minute().to_string(),
            "ns" => m.nanosecond().to_string(),
            "ss" => format!("{:02}", m.second()),
            "s" => m.second().to_string(),
            "S" => format!("{:03}", m.nanosecond() / 1_000_000),
            "z" => match m.zone_name() {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(token, error = %e, "cannot render the zone name");
                    return None;
                }
            },
            "Z" => match m.offset() {
                Ok(offset) => zone::format_offset(offset),
                Err(e) => {
                    tracing::warn!(token, error = %e, "cannot render the zone offset");
                    return None;
                }
            },
            _ => return None,
        })
    }
}

/// Render the moment with the given token pattern.
pub fn format(pattern: &str, m: &Moment) -> String {
    Formatter::new(pattern).lenient_reconstruct_with(moment_resolve(m))
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;

    fn at(hour: i64, minute: i64, second: i64) -> Moment {
        Moment::new(1395, 1, 1, hour, minute, second, 0, TimeZone::UTC).unwrap()
    }

    #[test]
    fn test_formatter_identification() {
        assert_eq!(Formatter::new("").directives(), &[]);
        assert_eq!(Formatter::new("---").directives(), &[]);
        assert_eq!(
            Formatter::new("yyyy-MM-dd").directives(),
            &[(0, "yyyy"), (5, "MM"), (8, "dd")]
        );
        assert_eq!(
            Formatter::new("yyyyy").directives(),
            &[(0, "yyyy"), (4, "y")]
        );
        assert_eq!(
            Formatter::new("MMMM MMI").directives(),
            &[(0, "MMM"), (3, "M"), (5, "MMI")]
        );
        assert_eq!(
            Formatter::new("RDrdD").directives(),
            &[(0, "RD"), (2, "rd"), (4, "D")]
        );
        // multibyte literals are skipped whole
        assert_eq!(
            Formatter::new("روز d").directives(),
            &[("روز ".len(), "d")]
        );
    }

    #[test]
    fn test_table_prefers_longer() {
        for (i, short) in TOKENS.iter().enumerate() {
            for long in TOKENS[i + 1..].iter() {
                assert!(
                    !long.starts_with(short),
                    "{long:?} comes after its prefix {short:?}"
                );
            }
        }
    }

    #[test]
    fn test_format_date() {
        let m = at(0, 0, 0);
        assert_eq!(m.format("yyyy-MM-dd"), "1395-01-01");
        assert_eq!(m.format("yyy/M/d"), "1395/1/1");
        assert_eq!(m.format("yy"), "95");
        assert_eq!(m.format("yyyyy"), "13951395");
        assert_eq!(m.format("MMM"), "فروردین");
        assert_eq!(m.format("MMI"), "حمل");
        assert_eq!(m.format("E e"), "یک‌شنبه ی");
        assert_eq!(m.format("[ ]"), "[ ]");
    }

    #[test]
    fn test_format_derived() {
        let m = Moment::new(1395, 7, 15, 0, 0, 0, 0, TimeZone::UTC).unwrap();
        // day 201 of a 366 day year, 30 day month
        assert_eq!(m.format("D RD"), "201 165");
        assert_eq!(m.format("w rw"), "28 23");
        assert_eq!(m.format("W RW rd"), "2 2 15");
    }

    #[test]
    fn test_format_hours() {
        let midnight = at(0, 0, 0);
        assert_eq!(midnight.format("HH H"), "00 0");
        assert_eq!(midnight.format("kk k"), "24 24");
        assert_eq!(midnight.format("hh h"), "12 12");
        assert_eq!(midnight.format("KK K"), "00 0");

        let noon = at(12, 0, 0);
        assert_eq!(noon.format("HH kk hh KK"), "12 12 12 12");
        assert_eq!(noon.format("A"), "قبل از ظهر");

        let m = at(13, 5, 9);
        assert_eq!(m.format("HH:mm:ss"), "13:05:09");
        assert_eq!(m.format("h:m:s a"), "1:5:9 ب.ظ");
        assert_eq!(m.format("KK k"), "01 13");
    }

    #[test]
    fn test_format_subsecond() {
        let m = Moment::new(1395, 1, 1, 0, 0, 0, 7_250_000, TimeZone::UTC).unwrap();
        assert_eq!(m.format("ns"), "7250000");
        assert_eq!(m.format("S"), "007");
        assert_eq!(m.format("ss.S"), "00.007");
    }

    #[test]
    fn test_format_zone() {
        let m = Moment::new(1395, 1, 1, 0, 0, 0, 0, zone::iran()).unwrap();
        assert_eq!(m.format("Z"), "+03:30");
        assert_eq!(at(0, 0, 0).format("z Z"), "UTC +00:00");

        // the presets are fixed offsets without a name
        assert_eq!(m.format("z"), "+03:30");
        let m = Moment::new(1395, 1, 1, 0, 0, 0, 0, zone::afghanistan()).unwrap();
        assert_eq!(m.format("z"), "+04:30");
    }

    #[test]
    fn test_format_zone_out_of_host_range() {
        let m = Moment::new(20000, 1, 1, 0, 0, 0, 0, TimeZone::UTC).unwrap();
        // the token is kept when the host cannot answer
        assert_eq!(m.format("yyyy Z"), "20000 Z");
    }

    #[test]
    fn test_modify_hour() {
        assert_eq!(modify_hour(0, 12), 12);
        assert_eq!(modify_hour(0, 24), 24);
        assert_eq!(modify_hour(5, 12), 5);
    }
}
