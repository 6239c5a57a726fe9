//! A collection of clap helpers for the builder API (no derive).

use clap::{
    ArgMatches, CommandFactory, FromArgMatches,
    builder::{PossibleValue, PossibleValuesParser, TypedValueParser},
    error::ErrorKind,
};

/// Pairs of names and values so a flag can pick one by name without `ValueEnum`.
#[derive(Clone, Debug)]
pub struct StaticMap<T>(pub &'static [(&'static str, T)])
where
    T: 'static;

impl<T> StaticMap<T> {
    /// All the names in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|(k, _)| *k)
    }

    /// The value for this name.
    pub fn get(&self, key: &str) -> Option<&'static T> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// The value for this name regardless of ASCII casing.
    pub fn get_ignore_case(&self, key: &str) -> Option<&'static T> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl<T> TypedValueParser for StaticMap<T>
where
    T: Sync + Send + Clone + 'static,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let key = PossibleValuesParser::new(self.keys()).parse_ref(cmd, arg, value)?;
        let found = if arg.is_some_and(|i| i.is_ignore_case_set()) {
            self.get_ignore_case(&key)
        } else {
            self.get(&key)
        };
        // PossibleValuesParser already rejected unknown keys
        found
            .cloned()
            .ok_or_else(|| cmd.clone().error(ErrorKind::InvalidValue, key))
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(self.keys().map(PossibleValue::new)))
    }
}

/// Extension helper functions for [`CommandFactory`].
pub trait CommandFactoryExt: CommandFactory {
    /// A styled error of this command.
    fn error(kind: ErrorKind, message: impl std::fmt::Display) -> clap::Error {
        Self::command().error(kind, message)
    }
}

impl<T> CommandFactoryExt for T where T: CommandFactory {}

/// Extension helper functions for [`ArgMatches`].
pub trait ArgMatchesExt {
    /// Was the argument (or any argument of the group) given by the user.
    fn is_explicit(&self, id: &str) -> bool;
}

impl ArgMatchesExt for ArgMatches {
    fn is_explicit(&self, id: &str) -> bool {
        !matches!(
            self.value_source(id),
            None | Some(clap::parser::ValueSource::DefaultValue)
        )
    }
}

/// Replace the clap parse function in no derive environment.
pub trait Parse: CommandFactory + FromArgMatches {
    /// Just like parse in derive feature.
    fn parse() -> Self {
        match Self::from_arg_matches(&Self::command().get_matches()) {
            Ok(v) => v,
            Err(e) => e.exit(),
        }
    }
}

impl<T> Parse for T where T: CommandFactory + FromArgMatches {}

#[cfg(test)]
mod tests {
    use clap::{Arg, Command};

    use super::*;

    const PRESETS: StaticMap<i32> = StaticMap(&[("one", 1), ("Two", 2)]);

    #[test]
    fn test_static_map_lookup() {
        assert_eq!(PRESETS.keys().collect::<Vec<_>>(), ["one", "Two"]);
        assert_eq!(PRESETS.get("one"), Some(&1));
        assert_eq!(PRESETS.get("two"), None);
        assert_eq!(PRESETS.get_ignore_case("two"), Some(&2));
    }

    #[test]
    fn test_static_map_parser() {
        let cmd = || {
            Command::new("test")
                .no_binary_name(true)
                .arg(Arg::new("n").long("n").value_parser(PRESETS))
        };
        let matches = cmd().get_matches_from(["--n", "Two"]);
        assert_eq!(matches.get_one::<i32>("n"), Some(&2));
        assert!(matches.is_explicit("n"));
        assert!(cmd().try_get_matches_from(["--n", "three"]).is_err());

        let matches = cmd().get_matches_from(Vec::<&str>::new());
        assert!(!matches.is_explicit("n"));
    }
}
