//! Persian (Solar Hijri) calendar conversion and formatting.
//!
//! Every conversion goes through a Julian Day Number (see [`jdn`]), [`moment::Moment`] keeps a
//! Persian date and time with its host time zone and [`strftime`] renders it.
pub mod clap_helper;
pub mod date;
pub mod error;
pub mod jdn;
pub mod moment;
pub mod parser;
pub mod strftime;
pub mod zone;

pub use date::{AmPm, Month, Weekday};
pub use error::{Error, Result};
pub use moment::Moment;

/// Persian months in Persian (Farvardin first).
pub const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Persian months by their Dari (Afghan) names (Hamal first).
pub const DARI_MONTHS: [&str; 12] = [
    "حمل",
    "ثور",
    "جوزا",
    "سرطان",
    "اسد",
    "سنبله",
    "میزان",
    "عقرب",
    "قوس",
    "جدی",
    "دلو",
    "حوت",
];

/// Persian months transliterated in English.
// Note to future self: these are popular, known and accepted, officially and non-officially.
// do NOT change!
pub const LATIN_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Saturday based weekdays in Persian.
pub const WEEKDAYS: [&str; 7] = [
    "شنبه",
    "یک‌شنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنج‌شنبه",
    "جمعه",
];

/// [`WEEKDAYS`] by their one letter abbreviations.
pub const WEEKDAYS_SHORT: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// Before noon and after noon in Persian.
pub const AM_PM: [&str; 2] = ["قبل از ظهر", "بعد از ظهر"];

/// [`AM_PM`] abbreviations.
pub const AM_PM_SHORT: [&str; 2] = ["ق.ظ", "ب.ظ"];
