//! Holds a `date` like program printing the Persian (Solar Hijri) calendar.
//!
//! Differences with `date`:
//! - the output pattern is the token language of [`shamsi::strftime`] (`+yyyy/MM/dd`) unless
//!   `--gregorian` is set which prints the Gregorian equivalent with `strftime` directives
//! - dates can be given in Persian with `--persian yyyy/MM/dd`
//! - does not warn if multiple flags are set for one value and the last one is used only
//! - no support for POSIX `MMDDhhmm` inputs, `--rfc-*` formats or `--set`
//! - parsing datetime is done with the `parse_datetime` crate so its limitations apply

use std::{
    error::Error,
    io::{BufRead, BufReader, Write},
};

use jiff::{Timestamp, Zoned};
use shamsi::{Moment, clap_helper::Parse, parser::parse_datetime};

mod arg_parser;
mod logging;

use arg_parser::{Args, Reader, When};

fn main() -> Result<(), Box<dyn Error>> {
    let config = Args::parse();
    logging::init(config.verbose);

    let zoned = match config.when {
        When::Reader(reader) => {
            let input: Box<dyn BufRead> = match reader {
                Reader::Stdin => Box::new(std::io::stdin().lock()),
                Reader::File(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
            };
            let now = Zoned::now().with_time_zone(config.timezone);
            let stdout = std::io::stdout().lock();
            if file_apply(input, stdout, &config.format, &now, config.gregorian)? {
                return Ok(());
            } else {
                return Err("failed to parse all lines".into());
            }
        }
        When::Given(v) => v,
        When::Now => Zoned::now().with_time_zone(config.timezone),
        When::Reference(path_buf) => {
            let time = std::fs::File::open(path_buf)?.metadata()?.modified()?;
            Timestamp::try_from(time)?.to_zoned(config.timezone)
        }
    };

    tracing::debug!(format = %config.format, basis = %zoned, "printing");
    println!("{}", render(&config.format, &zoned, config.gregorian)?);

    Ok(())
}

/// Format the time in the chosen calendar.
fn render(format: &str, tm: &Zoned, gregorian: bool) -> Result<String, Box<dyn Error>> {
    if gregorian {
        Ok(jiff::fmt::strtime::format(format, tm)?)
    } else {
        Ok(Moment::from(tm).format(format))
    }
}

/// Parse each line in a stream as with --date and write each resulting time and date.
///
/// Blank lines are skipped and lines that fail to parse are reported on STDERR.
///
/// Returns false if any parsing failed.
fn file_apply(
    input: impl BufRead,
    mut output: impl Write,
    format: &str,
    now: &Zoned,
    gregorian: bool,
) -> Result<bool, Box<dyn Error>> {
    let mut ok = true;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_datetime(&line, now) {
            Ok(tm) => writeln!(output, "{}", render(format, &tm, gregorian)?)?,
            Err(e) => {
                eprintln!("invalid date {}", e);
                ok = false;
            }
        }
    }
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};

    use super::*;

    fn utc_noon() -> Zoned {
        date(2016, 3, 20).at(12, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    #[test]
    fn test_render() {
        let tm = utc_noon();
        assert_eq!(render("yyyy-MM-dd", &tm, false).unwrap(), "1395-01-01");
        assert_eq!(render("%Y-%m-%d", &tm, true).unwrap(), "2016-03-20");
        assert_eq!(
            render(Args::DEFAULT_FORMAT, &tm, false).unwrap(),
            "یک‌شنبه 1 فروردین 1395 12:00:00 UTC"
        );
    }

    #[test]
    fn test_file_apply() {
        let input = "TZ=\"UTC\" 2016-03-20 10:00\n\nnot a date at all\nTZ=\"UTC\" 2024-03-20 10:00\n";
        let mut output = Vec::new();
        let ok = file_apply(input.as_bytes(), &mut output, "yyyy/MM/dd", &utc_noon(), false);
        assert!(!ok.unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), "1395/01/01\n1403/01/01\n");
    }

    #[test]
    fn test_file_apply_all_valid() {
        let input = "TZ=\"UTC\" 2016-03-20 10:00\n";
        let mut output = Vec::new();
        let ok = file_apply(input.as_bytes(), &mut output, "%F", &utc_noon(), true);
        assert!(ok.unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), "2016-03-20\n");
    }
}
