use std::{convert::Infallible, path::PathBuf, str::FromStr};

use clap::{
    Arg, ArgAction, ArgGroup, ArgMatches, Command, CommandFactory, FromArgMatches, command,
    error::ErrorKind, value_parser,
};
use jiff::{Zoned, tz::TimeZone};

use shamsi::{
    clap_helper::*,
    parser::{parse_datetime, parse_persian_date},
    zone,
};

/// Provides lines each having a date to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Reader {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, PartialEq)]
pub enum When {
    /// Delay the value as far as possible.
    Now,
    /// The content of a file formatted with a string.
    Reader(Reader),
    /// The edit time of a file as set in `reference` flag
    Reference(PathBuf),
    /// The given time.
    Given(Zoned),
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub format: String,
    pub timezone: TimeZone,
    pub when: When,
    pub verbose: u8,
    pub gregorian: bool,
}

impl Args {
    pub const VERBOSE_LONG: &str = "verbose";
    pub const UTC_LONG: &str = "utc";
    pub const ZONE_LONG: &str = "zone";
    pub const ZONE_PRESETS: StaticMap<fn() -> TimeZone> = StaticMap(&[
        ("iran", zone::iran as fn() -> TimeZone),
        ("afghanistan", zone::afghanistan as fn() -> TimeZone),
    ]);
    pub const DATE_LONG: &str = "date";
    pub const PERSIAN_LONG: &str = "persian";
    pub const FILE_LONG: &str = "file";
    pub const REFERENCE_LONG: &str = "reference";
    pub const GREGORIAN_LONG: &str = "gregorian";
    pub const ISO_8601_LONG: &str = "iso-8601";
    pub const ISO_8601_DEFAULT: &str = "date";
    pub const ISO_8601_PAIRS: StaticMap<&'static str> = StaticMap(&[
        (Self::ISO_8601_DEFAULT, "yyyy-MM-dd"),
        ("hours", "yyyy-MM-ddTHHZ"),
        ("minutes", "yyyy-MM-ddTHH:mmZ"),
        ("seconds", "yyyy-MM-ddTHH:mm:ssZ"),
        ("ns", "yyyy-MM-ddTHH:mm:ss,nsZ"),
    ]);
    pub const POSITIONAL_ID: &str = "pattern";

    pub const DATE_SETTERS_GROUP: &str = "whens";
    pub const DATE_SETTERS_ARGS: &[&str] = &[
        Self::REFERENCE_LONG,
        Self::FILE_LONG,
        Self::DATE_LONG,
        Self::PERSIAN_LONG,
    ];

    pub const ZONE_SETTERS_GROUP: &str = "zones";
    pub const ZONE_SETTERS_ARGS: &[&str] = &[Self::UTC_LONG, Self::ZONE_LONG];

    pub const DEFAULT_FORMAT: &str = "E d MMM yyyy HH:mm:ss z";
    pub const GREGORIAN_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

    pub fn groups() -> [ArgGroup; 2] {
        [
            ArgGroup::new(Self::DATE_SETTERS_GROUP)
                .multiple(false)
                .args(Self::DATE_SETTERS_ARGS),
            ArgGroup::new(Self::ZONE_SETTERS_GROUP)
                .multiple(false)
                .args(Self::ZONE_SETTERS_ARGS),
        ]
    }

    pub fn args() -> [Arg; 10] {
        [
            Arg::new(Self::VERBOSE_LONG)
                .long(Self::VERBOSE_LONG)
                .short('v')
                .help("log more to STDERR (repeat for more, RUST_LOG overrides)")
                .action(ArgAction::Count),
            Arg::new(Self::GREGORIAN_LONG)
                .long(Self::GREGORIAN_LONG)
                .short('g')
                .help("print the Gregorian equivalent (+FORMAT is then a `strftime` format)")
                .conflicts_with(Self::ISO_8601_LONG)
                .action(ArgAction::SetTrue),
            // zone
            Arg::new(Self::UTC_LONG)
                .long(Self::UTC_LONG)
                .short('u')
                .visible_alias("universal")
                .help("as if timezone is Coordinated Universal Time (UTC)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::ZONE_LONG)
                .long(Self::ZONE_LONG)
                .short('z')
                .value_name("NAME")
                .help("as if timezone is the given IANA name, `iran` (+03:30) or `afghanistan` (+04:30)")
                .value_parser(|s: &str| -> Result<TimeZone, shamsi::Error> {
                    match Self::ZONE_PRESETS.get_ignore_case(s) {
                        Some(preset) => Ok(preset()),
                        None => zone::lookup(s),
                    }
                }),
            // dates
            Arg::new(Self::DATE_LONG)
                .long(Self::DATE_LONG)
                .short('d')
                .value_name("STRING")
                .overrides_with(Self::DATE_LONG)
                .help("as if `now` is the given (only the last of multiple values takes effect)"),
            Arg::new(Self::PERSIAN_LONG)
                .long(Self::PERSIAN_LONG)
                .short('p')
                .value_name("yyyy/MM/dd")
                .help("as if `now` is the midnight of the given Persian date"),
            Arg::new(Self::FILE_LONG)
                .long(Self::FILE_LONG)
                .short('f')
                .value_name("PATH")
                .help("read a file or STDIN for dates (use '-' for STDIN)")
                .value_parser(|s: &str| -> Result<Reader, Infallible> {
                    Ok(if s == "-" {
                        Reader::Stdin
                    } else {
                        Reader::File(PathBuf::from_str(s)?)
                    })
                }),
            Arg::new(Self::REFERENCE_LONG)
                .long(Self::REFERENCE_LONG)
                .short('r')
                .value_name("PATH")
                .help("as if `now` is the modification time of the given file")
                .value_parser(value_parser!(PathBuf)),
            // formatters
            Arg::new(Self::ISO_8601_LONG)
                .long(Self::ISO_8601_LONG)
                .short('I')
                .value_name("SPEC")
                .num_args(0..=1) // if not given don't push the default
                .default_missing_value(Self::ISO_8601_DEFAULT)
                .overrides_with(Self::ISO_8601_LONG)
                .help(format!(
                    "output in an ISO 8601 like shape [default SPEC: {}]",
                    Self::ISO_8601_DEFAULT,
                ))
                .value_parser(Self::ISO_8601_PAIRS),
            // positionals
            Arg::new(Self::POSITIONAL_ID)
                .value_name("+FORMAT")
                .help("the output pattern after a '+' (see below)"),
        ]
    }
}

impl CommandFactory for Args {
    fn command() -> Command {
        command!(/* with version, about and author */)
            .after_help(
                "FORMAT tokens (the longest match wins, anything else is printed as is):\n  \
                 yyyy yy MMM MMI MM M dd d E e A a HH H kk k hh h KK K mm m ss s ns S z Z\n  \
                 w rw (weeks of year passed/left) W RW (of month) D RD (days of year) rd\n\
                 With --gregorian, FORMAT follows `strftime` instead.",
            )
            .args(Self::args())
            .groups(Self::groups())
    }

    fn command_for_update() -> Command {
        Self::command()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            format: Self::DEFAULT_FORMAT.to_owned(),
            timezone: TimeZone::system(),
            when: When::Now,
            verbose: 0,
            gregorian: false,
        }
    }
}

impl FromArgMatches for Args {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut v = Self::default();
        v.update_from_arg_matches(matches)?;
        Ok(v)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        if matches.get_flag(Self::UTC_LONG) {
            self.timezone = TimeZone::UTC;
        } else if let Some(v) = matches.get_one::<TimeZone>(Self::ZONE_LONG) {
            self.timezone = v.clone();
        }

        self.verbose = self.verbose.max(matches.get_count(Self::VERBOSE_LONG));

        if matches.get_flag(Self::GREGORIAN_LONG) {
            self.gregorian = true;
            self.format = Self::GREGORIAN_FORMAT.to_owned();
        }

        if let Some(v) = matches.get_one::<&'static str>(Self::ISO_8601_LONG) {
            self.format = v.to_string();
        }

        // try date, then persian, then file, then reference
        if let Some(v) = matches.get_one::<String>(Self::DATE_LONG) {
            let now = Zoned::now().with_time_zone(self.timezone.clone());
            self.when = match parse_datetime(v, &now) {
                Ok(v) => When::Given(v),
                Err(e) => return Err(Self::error(ErrorKind::InvalidValue, e)),
            };
        } else if let Some(v) = matches.get_one::<String>(Self::PERSIAN_LONG) {
            self.when = match parse_persian_date(v, &self.timezone).and_then(|m| m.to_zoned()) {
                Ok(v) => When::Given(v),
                Err(e) => return Err(Self::error(ErrorKind::InvalidValue, e)),
            };
        } else if let Some(v) = matches.get_one::<Reader>(Self::FILE_LONG) {
            self.when = When::Reader(v.clone());
        } else if let Some(v) = matches.get_one::<PathBuf>(Self::REFERENCE_LONG) {
            self.when = When::Reference(v.clone());
        }

        if let Some(input) = matches.get_one::<String>(Self::POSITIONAL_ID) {
            let Some(format) = input.strip_prefix('+') else {
                return Err(Self::error(
                    ErrorKind::InvalidValue,
                    format!("expected a +FORMAT, found {:?}", input),
                ));
            };

            if matches.is_explicit(Self::ISO_8601_LONG) {
                return Err(Self::error(
                    ErrorKind::ArgumentConflict,
                    "unexpected +FORMAT when other options set the format",
                ));
            }

            self.format = format.to_owned();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn call(no_0_args: &[&str]) -> Args {
        let matches = Args::command()
            .no_binary_name(true)
            .get_matches_from(no_0_args);
        Args::from_arg_matches(&matches).unwrap()
    }

    fn try_call(no_0_args: &[&str]) -> Result<Args, clap::Error> {
        let matches = Args::command()
            .no_binary_name(true)
            .try_get_matches_from(no_0_args)?;
        Args::from_arg_matches(&matches)
    }

    #[test]
    fn test_cli_default() {
        assert_eq!(call(&[]), Args::default());
    }

    #[test]
    fn test_cli_verbose() {
        assert_eq!(call(&["-v"]).verbose, 1);
        assert_eq!(call(&["-vvv"]).verbose, 3);
        assert_eq!(call(&["--verbose", "-v"]).verbose, 2);
    }

    #[test]
    fn test_cli_format_iso_8601() {
        assert_eq!(
            call(&["--iso-8601", "seconds"]),
            Args {
                format: Args::ISO_8601_PAIRS.get("seconds").unwrap().to_string(),
                ..Default::default()
            }
        );
        assert_eq!(call(&["-I"]).format, "yyyy-MM-dd");
        assert_eq!(call(&["-I", "-I", "ns"]).format, "yyyy-MM-ddTHH:mm:ss,nsZ");
        assert!(try_call(&["-I", "weeks"]).is_err());
    }

    #[test]
    fn test_cli_positional_format() {
        assert_eq!(call(&["+yyyy/MM/dd"]).format, "yyyy/MM/dd");
        assert_eq!(call(&["+"]).format, "");
        assert!(try_call(&["yyyy"]).is_err());
        assert!(try_call(&["-I", "+yyyy"]).is_err());
    }

    #[test]
    fn test_cli_zones() {
        assert_eq!(call(&["-u"]).timezone, TimeZone::UTC);
        assert_eq!(call(&["--zone", "iran"]).timezone, zone::iran());
        assert_eq!(call(&["-z", "Afghanistan"]).timezone, zone::afghanistan());
        assert!(try_call(&["-z", "Nowhere/Atlantis"]).is_err());
        assert!(try_call(&["-u", "-z", "iran"]).is_err());
    }

    #[test]
    fn test_cli_persian_date() {
        assert_eq!(
            call(&["-u", "-p", "1395/01/01"]),
            Args {
                timezone: TimeZone::UTC,
                when: When::Given(
                    date(2016, 3, 20)
                        .at(0, 0, 0, 0)
                        .to_zoned(TimeZone::UTC)
                        .unwrap()
                ),
                ..Default::default()
            }
        );
        assert!(try_call(&["-p", "1395-01-01"]).is_err());
    }

    #[test]
    fn test_cli_gregorian() {
        assert_eq!(
            call(&["-g"]),
            Args {
                format: Args::GREGORIAN_FORMAT.to_owned(),
                gregorian: true,
                ..Default::default()
            }
        );
        assert_eq!(call(&["-g", "+%Y"]).format, "%Y");
        assert!(try_call(&["-g", "-I"]).is_err());
    }

    #[test]
    fn test_cli_date_sources() {
        assert_eq!(call(&["-f", "-"]).when, When::Reader(Reader::Stdin));
        assert_eq!(
            call(&["--file", "dates.txt"]).when,
            When::Reader(Reader::File(PathBuf::from("dates.txt")))
        );
        assert_eq!(
            call(&["-r", "Cargo.toml"]).when,
            When::Reference(PathBuf::from("Cargo.toml"))
        );
        assert!(try_call(&["-f", "-", "-r", "Cargo.toml"]).is_err());
        assert!(try_call(&["-d", "not a date at all"]).is_err());
    }
}
