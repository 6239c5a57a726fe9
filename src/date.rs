//! Holds the named values of the Persian calendar (months, weekdays and the 12-hour marker).

use std::fmt::{self, Display};

use crate::{AM_PM, AM_PM_SHORT, DARI_MONTHS, PERSIAN_MONTHS, WEEKDAYS, WEEKDAYS_SHORT, jdn};

/// `{days, leap_days, days_before_start}` of each month.
pub const MONTH_DAYS: [[u16; 3]; 12] = [
    [31, 31, 0],   // Farvardin
    [31, 31, 31],  // Ordibehesht
    [31, 31, 62],  // Khordad
    [31, 31, 93],  // Tir
    [31, 31, 124], // Mordad
    [31, 31, 155], // Shahrivar
    [30, 30, 186], // Mehr
    [30, 30, 216], // Aban
    [30, 30, 246], // Azar
    [30, 30, 276], // Dey
    [30, 30, 306], // Bahman
    [29, 30, 336], // Esfand
];

/// Days in a common year.
pub const YEAR_DAYS: u16 = 365;

/// Days in a leap year.
pub const LEAP_YEAR_DAYS: u16 = 366;

/// Number of days in the given month of the given year.
pub const fn days_in_month(year: i32, month: Month) -> u8 {
    let leap = jdn::is_leap(year) as usize;
    MONTH_DAYS[month as usize - 1][leap] as u8
}

/// Number of days in the given year.
pub const fn days_in_year(year: i32) -> u16 {
    if jdn::is_leap(year) {
        LEAP_YEAR_DAYS
    } else {
        YEAR_DAYS
    }
}

/// A month of the Persian year, Farvardin is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Month {
    Farvardin = 1,
    Ordibehesht,
    Khordad,
    Tir,
    Mordad,
    Shahrivar,
    Mehr,
    Aban,
    Azar,
    Dey,
    Bahman,
    Esfand,
}

impl Month {
    pub const MIN: Self = Self::Farvardin;
    pub const MAX: Self = Self::Esfand;

    // Dari (Afghan) names of the same months
    pub const HAMAL: Self = Self::Farvardin;
    pub const SAUR: Self = Self::Ordibehesht;
    pub const JAUZA: Self = Self::Khordad;
    pub const SARATAN: Self = Self::Tir;
    pub const ASAD: Self = Self::Mordad;
    pub const SONBOLA: Self = Self::Shahrivar;
    pub const MIZAN: Self = Self::Mehr;
    pub const AQRAB: Self = Self::Aban;
    pub const QAUS: Self = Self::Azar;
    pub const JADI: Self = Self::Dey;
    pub const DALVA: Self = Self::Bahman;
    pub const HUT: Self = Self::Esfand;

    const ALL: [Self; 12] = [
        Self::Farvardin,
        Self::Ordibehesht,
        Self::Khordad,
        Self::Tir,
        Self::Mordad,
        Self::Shahrivar,
        Self::Mehr,
        Self::Aban,
        Self::Azar,
        Self::Dey,
        Self::Bahman,
        Self::Esfand,
    ];

    /// Take any number and saturate it to 1..=12.
    pub const fn saturating(month: i64) -> Self {
        let i = if month < 1 {
            1
        } else if month > 12 {
            12
        } else {
            month
        };
        Self::ALL[i as usize - 1]
    }

    /// The month number (1..=12).
    pub const fn get(self) -> u8 {
        self as u8
    }

    /// The Persian name.
    pub const fn name(self) -> &'static str {
        PERSIAN_MONTHS[self as usize - 1]
    }

    /// The Dari name.
    pub const fn dari(self) -> &'static str {
        DARI_MONTHS[self as usize - 1]
    }

    /// How many days are in this month given whether the year is leap.
    pub const fn days(self, leap: bool) -> u8 {
        MONTH_DAYS[self as usize - 1][leap as usize] as u8
    }

    /// How many days of the year pass before the first of this month.
    pub const fn days_before(self) -> u16 {
        MONTH_DAYS[self as usize - 1][2]
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl From<Month> for u8 {
    fn from(value: Month) -> Self {
        value.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = u8;

    /// Fails with the input if out of 1..=12.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=12 => Ok(Self::saturating(value as i64)),
            _ => Err(value),
        }
    }
}

/// A day of the week, Saturday (Shanbe) is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    Shanbe = 0,
    Yekshanbe,
    Doshanbe,
    Seshanbe,
    Charshanbe,
    Panjshanbe,
    Jomeh,
}

impl Weekday {
    pub const MIN: Self = Self::Shanbe;
    pub const MAX: Self = Self::Jomeh;

    const ALL: [Self; 7] = [
        Self::Shanbe,
        Self::Yekshanbe,
        Self::Doshanbe,
        Self::Seshanbe,
        Self::Charshanbe,
        Self::Panjshanbe,
        Self::Jomeh,
    ];

    /// Create from a 0..=6 counter, wrapping larger values around the week.
    pub const fn new(i: u8) -> Self {
        Self::ALL[(i % 7) as usize]
    }

    /// The weekday of the given Julian Day Number.
    pub const fn from_jdn(jdn: jdn::Jdn) -> Self {
        Self::new(jdn::weekday(jdn))
    }

    /// The Saturday based counter (0..=6).
    pub const fn get(self) -> u8 {
        self as u8
    }

    /// The Persian name.
    pub const fn name(self) -> &'static str {
        WEEKDAYS[self as usize]
    }

    /// The one letter Persian abbreviation.
    pub const fn short(self) -> &'static str {
        WEEKDAYS_SHORT[self as usize]
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(value: jiff::civil::Weekday) -> Self {
        // jiff counts Sunday as 0 and here Saturday is
        Self::new((value.to_sunday_zero_offset() as u8 + 1) % 7)
    }
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(value: Weekday) -> Self {
        jiff::civil::Weekday::Saturday.wrapping_add(value.get() as i64)
    }
}

/// The 12-hour clock marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AmPm {
    Am = 0,
    Pm,
}

impl AmPm {
    /// Classify a clock reading.
    ///
    /// Noon sharp (12:00:00) is still [`Self::Am`], anything after it is [`Self::Pm`].
    pub const fn from_clock(hour: u8, minute: u8, second: u8) -> Self {
        if hour > 12 || (hour == 12 && (minute > 0 || second > 0)) {
            Self::Pm
        } else {
            Self::Am
        }
    }

    /// The Persian name.
    pub const fn name(self) -> &'static str {
        AM_PM[self as usize]
    }

    /// The Persian abbreviation.
    pub const fn short(self) -> &'static str {
        AM_PM_SHORT[self as usize]
    }
}

impl Display for AmPm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}
