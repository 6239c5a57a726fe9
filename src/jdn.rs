//! Conversion between calendar dates and Julian Day Numbers (JDN).
//!
//! A JDN is a continuous day counter which is used as the pivot between the Gregorian and the
//! Persian calendars, so neither calendar is ever converted to the other directly.
//!
//! None of the functions here validate their input: a day 32 or a month 13 is extrapolated by the
//! formulas. Keeping the values in range is the job of [`crate::moment::Moment`].

/// A Julian Day Number.
pub type Jdn = i64;

/// The last JDN of the Julian calendar (1582-10-04 Julian).
///
/// The day after this is 1582-10-15 in the Gregorian calendar.
pub const JULIAN_LAST_JDN: Jdn = 2299160;

/// The last Julian calendar date as a triple (year, month, day).
///
/// Dates up to and including this one are read as Julian dates, this includes the ten dates
/// (1582-10-05..=1582-10-14) that never existed since they are the Julian reading of the first
/// Gregorian days.
pub const JULIAN_LAST_DATE: (i32, i32, i32) = (1582, 10, 14);

/// Days in a full cycle of 2820 Persian years.
pub const GRAND_CYCLE_DAYS: i64 = 1029983;

/// Years in a grand cycle of the Persian calendar.
pub const GRAND_CYCLE_YEARS: i64 = 2820;

/// The Persian year which the grand cycles are counted from.
const CYCLE_EPOCH_YEAR: i32 = 475;

/// Days before the first day of the Persian epoch (a day before 0001/01/01).
const PERSIAN_EPOCH_OFFSET: i64 = 1948320;

/// End of the first half of the Persian year (the 31 day months).
pub const FIRST_HALF_MAX_DOY: i64 = 186;

/// The first day of Persian year `i32::MIN`.
pub const PERSIAN_MIN_JDN: Jdn = persian_to_jdn(i32::MIN, 1, 1);

/// The 365th day of Persian year `i32::MAX`, the last day every year has.
pub const PERSIAN_MAX_JDN: Jdn = persian_to_jdn(i32::MAX, 12, 29);

/// Clamp an `i64` year into the `i32` range.
const fn saturate_year(year: i64) -> i32 {
    if year > i32::MAX as i64 {
        i32::MAX
    } else if year < i32::MIN as i64 {
        i32::MIN
    } else {
        year as i32
    }
}

/// A `mod` that never returns negative results for negative numerators.
///
/// For positive numerators this is the same as `%`. Otherwise the remainder is computed as
/// `num - (((num + 1) / den) - 1) * den` so it is never negative. Note the quirk for `num == 0`
/// which yields `den` and not 0, the leap rule never hits it since `25 * year + 11` is never 0.
pub const fn divider(num: i64, den: i64) -> i64 {
    if num > 0 {
        return num % den;
    }
    num - ((((num + 1) / den) - 1) * den)
}

/// Is the given Persian year leap by the 33-year rule.
pub const fn is_leap(year: i32) -> bool {
    divider(25 * year as i64 + 11, 33) < 8
}

/// Convert a Gregorian date to a JDN.
///
/// Dates strictly after [`JULIAN_LAST_DATE`] use the Gregorian formula and the rest are read as
/// proleptic Julian dates.
pub const fn gregorian_to_jdn(year: i32, month: i32, day: i32) -> Jdn {
    let (gy, gm, gd) = (year as i64, month as i64, day as i64);
    let (ly, lm, ld) = JULIAN_LAST_DATE;

    if year > ly || (year == ly && month > lm) || (year == ly && month == lm && day > ld) {
        let a = (gm - 14) / 12;
        (1461 * (gy + 4800 + a)) / 4 + (367 * (gm - 2 - 12 * a)) / 12
            - (3 * ((gy + 4900 + a) / 100)) / 4
            + gd
            - 32075
    } else {
        367 * gy - (7 * (gy + 5001 + (gm - 9) / 7)) / 4 + (275 * gm) / 9 + gd + 1729777
    }
}

/// Convert a JDN to a Gregorian date (Julian for days up to [`JULIAN_LAST_JDN`]).
///
/// A year beyond the `i32` range saturates, the month and day are then meaningless.
pub const fn jdn_to_gregorian(jdn: Jdn) -> (i32, u8, u8) {
    let (year, month, day);

    if jdn > JULIAN_LAST_JDN {
        let mut l = jdn + 68569;
        let n = 4 * l / 146097;
        l -= (146097 * n + 3) / 4;
        let i = 4000 * (l + 1) / 1461001;
        l = l - 1461 * i / 4 + 31;
        let j = 80 * l / 2447;
        day = l - 2447 * j / 80;
        l = j / 11;
        month = j + 2 - 12 * l;
        year = 100 * (n - 49) + i + l;
    } else {
        let j = jdn + 1402;
        let k = (j - 1) / 1461;
        let l = j - 1461 * k;
        let n = (l - 1) / 365 - l / 1461;
        let mut i = l - 365 * n + 30;
        let j = 80 * i / 2447;
        day = i - 2447 * j / 80;
        i = j / 11;
        month = j + 2 - 12 * i;
        year = 4 * k + n + i - 4716;
    }

    (saturate_year(year), month as u8, day as u8)
}

/// Days before the first of the given Persian month in the same year.
pub const fn days_before_month(month: i64) -> i64 {
    if month <= 7 {
        (month - 1) * 31
    } else {
        (month - 1) * 30 + 6
    }
}

/// Convert a Persian date to a JDN (2820-year grand cycle arithmetic).
///
/// There is no year zero, year 0 lands on the same days as year -1.
pub const fn persian_to_jdn(year: i32, month: i32, day: i32) -> Jdn {
    let mut base = year as i64 - (CYCLE_EPOCH_YEAR as i64 - 2);
    if year >= 0 {
        base -= 1;
    }

    // floor arithmetic, the truncating one breaks for years before the cycle epoch
    let epy = (CYCLE_EPOCH_YEAR as i64 - 1) + base.rem_euclid(GRAND_CYCLE_YEARS);

    day as i64
        + days_before_month(month as i64)
        + (epy * 682 - 110).div_euclid(2816)
        + (epy - 1) * 365
        + base.div_euclid(GRAND_CYCLE_YEARS) * GRAND_CYCLE_DAYS
        + PERSIAN_EPOCH_OFFSET
}

/// Convert a JDN to a Persian date (inverse of [`persian_to_jdn`]).
///
/// The JDN saturates into [`PERSIAN_MIN_JDN`]..=[`PERSIAN_MAX_JDN`] so the year fits in an `i32`.
pub const fn jdn_to_persian(jdn: Jdn) -> (i32, u8, u8) {
    let jdn = if jdn < PERSIAN_MIN_JDN {
        PERSIAN_MIN_JDN
    } else if jdn > PERSIAN_MAX_JDN {
        PERSIAN_MAX_JDN
    } else {
        jdn
    };
    let dep = jdn - persian_to_jdn(CYCLE_EPOCH_YEAR, 1, 1);
    let cycle = dep.div_euclid(GRAND_CYCLE_DAYS);
    let rem = dep.rem_euclid(GRAND_CYCLE_DAYS);

    // the last day of a cycle would make the approximation below overshoot
    let cycle_year = if rem == GRAND_CYCLE_DAYS - 1 {
        GRAND_CYCLE_YEARS
    } else {
        let a = rem / 366;
        (2134 * a + 2816 * (rem % 366) + 2815) / 1028522 + a + 1
    };

    let mut year = cycle_year + GRAND_CYCLE_YEARS * cycle + (CYCLE_EPOCH_YEAR as i64 - 1);
    if year <= 0 {
        year -= 1;
    }
    let year = saturate_year(year);

    let doy = jdn - persian_to_jdn(year, 1, 1) + 1;
    let month = if doy <= FIRST_HALF_MAX_DOY {
        (doy + 30) / 31
    } else {
        (doy - 6 + 29) / 30
    };
    let day = jdn - persian_to_jdn(year, month as i32, 1) + 1;

    (year, month as u8, day as u8)
}

/// The weekday of a JDN counted from Saturday (0) to Friday (6).
pub const fn weekday(jdn: Jdn) -> u8 {
    (jdn + 2).rem_euclid(7) as u8
}
