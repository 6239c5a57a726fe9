//! Holds [`Moment`], a Persian date and time in a host time zone.

use std::fmt::{self, Display};

use jiff::{SignedDuration, Timestamp, Zoned, civil, tz::TimeZone};

use crate::{
    AmPm, Month, Result, Weekday,
    date::{days_in_month, days_in_year},
    jdn::{self, Jdn},
    strftime,
    zone::{self, ZoneRef},
};

/// The year used in place of the missing year zero.
pub const Y0_REPLACEMENT: i32 = -1;

/// Largest nanosecond of a second.
pub const MAX_NANOSECOND: u32 = 999_999_999;

/// The pattern used by [`Display`].
pub const DISPLAY_FORMAT: &str = "yyyy-MM-ddTHH:mm:ss.nsZ";

/// A moment in time in the Persian (Solar Hijri) calendar.
///
/// Fields are always in range. Setters never fail on a bad value, they saturate it to the closest
/// valid one instead (a minute of 75 is 59, not an hour and 15 minutes) and then re-derive the
/// weekday. The only failures come from the zone reference or from the host when it cannot hold
/// the moment.
///
/// There is no year zero, a zero year is stored as [`Y0_REPLACEMENT`].
///
/// The day is bounded by the 33-year leap rule with one exception: a conversion that lands on the
/// 30th of Esfand in a year only the 2820-year cycle considers leap keeps that day, so converting
/// back and forth stays lossless.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    year: i32,
    month: Month,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    zone: TimeZone,
    weekday: Weekday,
}

/// Saturate a value to `min..=max` and leave a trace if that changed it.
fn between(field: &'static str, value: i64, min: i64, max: i64) -> i64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::trace!(field, value, clamped, "saturated out of range field");
    }
    clamped
}

const fn ensure_year(year: i32) -> i32 {
    if year == 0 { Y0_REPLACEMENT } else { year }
}

/// A year counter with no gap at zero (..., -1 -> 0, 1 -> 1, ...).
const fn to_astronomical(year: i32) -> i64 {
    if year < 0 { year as i64 + 1 } else { year as i64 }
}

/// The inverse of [`to_astronomical`], `None` when the year does not fit in an `i32`.
fn from_astronomical(year: i64) -> Option<i32> {
    let year = if year <= 0 { year.saturating_sub(1) } else { year };
    i32::try_from(year).ok()
}

impl Moment {
    // constructors

    /// Create from Persian fields, saturating each to its range.
    ///
    /// Fails only if the zone reference is absent or unknown.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        nanosecond: i64,
        zone: impl ZoneRef,
    ) -> Result<Self> {
        let zone = zone.resolve()?;
        let mut v = Self::midnight(year, Month::MIN, 1, zone);
        v.year = ensure_year(year);
        v.month = Self::saturating_month(month);
        v.day = Self::saturating_day(v.year, v.month, day);
        v.at(hour, minute, second, nanosecond);
        v.reset_weekday();
        Ok(v)
    }

    /// Create from seconds and nanoseconds since the Unix epoch, seen in the given zone.
    ///
    /// Nanoseconds out of a second's range carry into the seconds.
    pub fn from_unix(second: i64, nanosecond: i64, zone: impl ZoneRef) -> Result<Self> {
        let zone = zone.resolve()?;
        let nanos = second as i128 * 1_000_000_000 + nanosecond as i128;
        let timestamp = Timestamp::from_nanosecond(nanos)?;
        Ok(Self::from(&timestamp.to_zoned(zone)))
    }

    /// The current moment of the host in the given zone.
    pub fn now(zone: impl ZoneRef) -> Result<Self> {
        let zone = zone.resolve()?;
        Ok(Self::from(&Zoned::now().with_time_zone(zone)))
    }

    /// A date at 00:00:00 with no checks on the date (callers keep the day in range).
    fn midnight(year: i32, month: Month, day: u8, zone: TimeZone) -> Self {
        let mut v = Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            zone,
            weekday: Weekday::MIN,
        };
        v.reset_weekday();
        v
    }

    /// The same clock and zone on another (valid) date.
    fn on_date(&self, (year, month, day): (i32, Month, u8)) -> Self {
        let mut v = Self {
            year,
            month,
            day,
            ..self.clone()
        };
        v.reset_weekday();
        v
    }

    // setters

    /// Set every field at once (see [`Self::new`]).
    ///
    /// On failure `self` is left untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        year: i32,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        nanosecond: i64,
        zone: impl ZoneRef,
    ) -> Result<()> {
        *self = Self::new(year, month, day, hour, minute, second, nanosecond, zone)?;
        Ok(())
    }

    /// Set to the same moment as the given host time.
    pub fn set_zoned(&mut self, zoned: &Zoned) {
        *self = Self::from(zoned);
    }

    /// Set to the given Unix time (see [`Self::from_unix`]).
    ///
    /// On failure `self` is left untouched.
    pub fn set_unix(&mut self, second: i64, nanosecond: i64, zone: impl ZoneRef) -> Result<()> {
        *self = Self::from_unix(second, nanosecond, zone)?;
        Ok(())
    }

    /// Set the year, the day saturates if the 30th of Esfand is lost.
    pub fn set_year(&mut self, year: i32) {
        self.year = ensure_year(year);
        self.day = Self::saturating_day(self.year, self.month, self.day as i64);
        self.reset_weekday();
    }

    /// Set the month (saturated to 1..=12), the day saturates to the month's end.
    pub fn set_month(&mut self, month: i64) {
        self.month = Self::saturating_month(month);
        self.day = Self::saturating_day(self.year, self.month, self.day as i64);
        self.reset_weekday();
    }

    /// Set the day of the month (saturated to the month's range).
    pub fn set_day(&mut self, day: i64) {
        self.day = Self::saturating_day(self.year, self.month, day);
        self.reset_weekday();
    }

    /// Set the hour (saturated to 0..=23).
    pub fn set_hour(&mut self, hour: i64) {
        self.hour = between("hour", hour, 0, 23) as u8;
    }

    /// Set the minute (saturated to 0..=59).
    pub fn set_minute(&mut self, minute: i64) {
        self.minute = between("minute", minute, 0, 59) as u8;
    }

    /// Set the second (saturated to 0..=59).
    pub fn set_second(&mut self, second: i64) {
        self.second = between("second", second, 0, 59) as u8;
    }

    /// Set the nanosecond (saturated to 0..=999,999,999).
    pub fn set_nanosecond(&mut self, nanosecond: i64) {
        self.nanosecond = between("nanosecond", nanosecond, 0, MAX_NANOSECOND as i64) as u32;
    }

    /// Set all the clock fields.
    pub fn at(&mut self, hour: i64, minute: i64, second: i64, nanosecond: i64) {
        self.set_hour(hour);
        self.set_minute(minute);
        self.set_second(second);
        self.set_nanosecond(nanosecond);
    }

    /// Move the same date and clock to another zone (the instant changes).
    ///
    /// See [`Self::with_time_zone`] for keeping the instant. On failure `self` is left untouched.
    pub fn set_zone(&mut self, zone: impl ZoneRef) -> Result<()> {
        self.zone = zone.resolve()?;
        self.reset_weekday();
        Ok(())
    }

    fn saturating_month(month: i64) -> Month {
        Month::saturating(between("month", month, 1, 12))
    }

    fn saturating_day(year: i32, month: Month, day: i64) -> u8 {
        between("day", day, 1, days_in_month(year, month) as i64) as u8
    }

    fn reset_weekday(&mut self) {
        self.weekday = Weekday::from_jdn(self.jdn());
    }

    // getters

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Day of the month (1..=31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of the day (0..=23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Hour in the 12-hour clock, only hours after 12 are shifted (0 stays 0 and 12 stays 12).
    pub fn hour12(&self) -> u8 {
        if self.hour > 12 {
            self.hour - 12
        } else {
            self.hour
        }
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    pub fn zone(&self) -> &TimeZone {
        &self.zone
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Year, month and day.
    pub fn date(&self) -> (i32, Month, u8) {
        (self.year, self.month, self.day)
    }

    /// Hour, minute and second.
    pub fn clock(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }

    /// The Julian Day Number of the date.
    pub fn jdn(&self) -> Jdn {
        jdn::persian_to_jdn(self.year, self.month.get() as i32, self.day as i32)
    }

    // derived

    /// Is the year leap (33-year rule).
    pub fn is_leap(&self) -> bool {
        jdn::is_leap(self.year)
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// What day of the year it is (1..=366).
    pub fn year_day(&self) -> u16 {
        self.month.days_before() + self.day as u16
    }

    /// Days left until the end of the year (today excluded).
    pub fn remaining_year_day(&self) -> u16 {
        days_in_year(self.year).saturating_sub(self.year_day())
    }

    /// Full weeks passed in the year.
    pub fn year_week(&self) -> u16 {
        self.year_day() / 7
    }

    /// Full weeks left in the year.
    pub fn remaining_year_week(&self) -> u16 {
        self.remaining_year_day() / 7
    }

    /// Days left until the end of the month (today excluded).
    pub fn remaining_month_day(&self) -> u8 {
        self.days_in_month().saturating_sub(self.day)
    }

    /// Full weeks passed in the month.
    pub fn month_week(&self) -> u8 {
        self.day / 7
    }

    /// Full weeks left in the month.
    pub fn remaining_month_week(&self) -> u8 {
        self.remaining_month_day() / 7
    }

    /// The 12-hour marker, see [`AmPm::from_clock`] for noon.
    pub fn am_pm(&self) -> AmPm {
        AmPm::from_clock(self.hour, self.minute, self.second)
    }

    // new instances

    /// Shift the date by some days keeping the clock (no time zone transitions are considered).
    ///
    /// The date saturates at the first day of year `i32::MIN` and the 365th day of `i32::MAX`.
    pub fn add_days(&self, days: i64) -> Self {
        let (y, m, d) = jdn::jdn_to_persian(self.jdn().saturating_add(days));
        self.on_date((y, Month::saturating(m as i64), d))
    }

    /// Shift by years and months in the Persian calendar and then by days.
    ///
    /// Months carry into years and the day saturates to the end of the new month (Farvardin 31st
    /// plus 6 months is Mehr 30th). A year beyond the `i32` range saturates to the last (or first)
    /// month of `i32::MAX` (or `i32::MIN`).
    pub fn add_date(&self, years: i32, months: i64, days: i64) -> Self {
        let months = (self.month.get() as i64 - 1).saturating_add(months);
        let year = to_astronomical(self.year)
            .saturating_add(years as i64)
            .saturating_add(months.div_euclid(12));
        let (year, month) = match from_astronomical(year) {
            Some(year) => (year, Month::saturating(months.rem_euclid(12) + 1)),
            None => {
                tracing::trace!(field = "year", value = year, "saturated out of range field");
                if year > 0 {
                    (i32::MAX, Month::MAX)
                } else {
                    (i32::MIN, Month::MIN)
                }
            }
        };
        let day = Self::saturating_day(year, month, self.day as i64);
        self.on_date((year, month, day)).add_days(days)
    }

    /// Shift by an exact duration through the host (time zone transitions are considered).
    pub fn add(&self, duration: SignedDuration) -> Result<Self> {
        Ok(Self::from(&self.to_zoned()?.checked_add(duration)?))
    }

    pub fn yesterday(&self) -> Self {
        self.add_days(-1)
    }

    pub fn tomorrow(&self) -> Self {
        self.add_days(1)
    }

    /// The Saturday of this week.
    pub fn first_week_day(&self) -> Self {
        self.add_days(-(self.weekday.get() as i64))
    }

    /// The Friday of this week.
    pub fn last_week_day(&self) -> Self {
        self.add_days((Weekday::MAX.get() - self.weekday.get()) as i64)
    }

    pub fn first_month_day(&self) -> Self {
        self.on_date((self.year, self.month, 1))
    }

    pub fn last_month_day(&self) -> Self {
        self.on_date((self.year, self.month, self.days_in_month()))
    }

    pub fn first_year_day(&self) -> Self {
        self.on_date((self.year, Month::MIN, 1))
    }

    pub fn last_year_day(&self) -> Self {
        self.on_date((self.year, Month::MAX, days_in_month(self.year, Month::MAX)))
    }

    /// The same instant seen from another zone.
    pub fn with_time_zone(&self, zone: impl ZoneRef) -> Result<Self> {
        let zone = zone.resolve()?;
        Ok(Self::from(&self.to_zoned()?.with_time_zone(zone)))
    }

    /// Seconds between the two moments regardless of their order.
    pub fn since(&self, other: &Self) -> Result<u64> {
        Ok(self.unix()?.abs_diff(other.unix()?))
    }

    // export

    /// The Gregorian (Julian before the 1582 reform) year, month and day.
    pub fn gregorian(&self) -> (i32, u8, u8) {
        jdn::jdn_to_gregorian(self.jdn())
    }

    /// The Gregorian civil date and time (no zone).
    pub fn to_civil(&self) -> Result<civil::DateTime> {
        let (y, m, d) = self.gregorian();
        // jiff rejects anything past ±9999 so the saturation is only there to keep its error
        let y = y.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        Ok(civil::DateTime::new(
            y,
            m as i8,
            d as i8,
            self.hour as i8,
            self.minute as i8,
            self.second as i8,
            self.nanosecond as i32,
        )?)
    }

    /// The host time of this moment.
    pub fn to_zoned(&self) -> Result<Zoned> {
        Ok(self.to_civil()?.to_zoned(self.zone.clone())?)
    }

    /// Seconds since the Unix epoch.
    pub fn unix(&self) -> Result<i64> {
        Ok(self.to_zoned()?.timestamp().as_second())
    }

    /// Nanoseconds since the Unix epoch.
    pub fn unix_nano(&self) -> Result<i128> {
        Ok(self.to_zoned()?.timestamp().as_nanosecond())
    }

    /// Seconds east of UTC at this moment.
    pub fn offset(&self) -> Result<i32> {
        Ok(self.to_zoned()?.offset().seconds())
    }

    /// The offset as `±HH:MM`.
    pub fn zone_offset(&self) -> Result<String> {
        self.offset().map(zone::format_offset)
    }

    /// The IANA name of the zone, or the abbreviation in effect if it has no name.
    pub fn zone_name(&self) -> Result<String> {
        if let Some(name) = self.zone.iana_name() {
            return Ok(name.to_owned());
        }
        let zoned = self.to_zoned()?;
        Ok(jiff::fmt::strtime::format("%Z", &zoned)?)
    }

    /// Format with a token pattern (see [`strftime`]).
    pub fn format(&self, pattern: &str) -> String {
        strftime::format(pattern, self)
    }
}

impl From<&Zoned> for Moment {
    fn from(zoned: &Zoned) -> Self {
        let gjdn = jdn::gregorian_to_jdn(
            zoned.year() as i32,
            zoned.month() as i32,
            zoned.day() as i32,
        );
        let (year, month, day) = jdn::jdn_to_persian(gjdn);

        let mut v = Self::midnight(
            year,
            Month::saturating(month as i64),
            day,
            zoned.time_zone().clone(),
        );
        v.hour = zoned.hour() as u8;
        v.minute = zoned.minute() as u8;
        v.second = zoned.second() as u8;
        v.nanosecond = zoned.subsec_nanosecond() as u32;
        v
    }
}

impl From<Zoned> for Moment {
    fn from(zoned: Zoned) -> Self {
        Self::from(&zoned)
    }
}

impl TryFrom<&Moment> for Zoned {
    type Error = crate::Error;

    fn try_from(value: &Moment) -> Result<Self> {
        value.to_zoned()
    }
}

impl Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(DISPLAY_FORMAT).fmt(f)
    }
}
