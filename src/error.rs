//! Holds the error type of this crate.
//!
//! Out of range date and time fields are never an error, they are saturated into their valid
//! range instead (see [`crate::moment::Moment`]). What remains is the boundary with the host: zone
//! references that cannot be resolved, instants the host cannot represent and text that cannot be
//! read back.

/// The default result of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors given by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The zone reference is absent (empty) or unknown to the host time zone database.
    #[error("invalid time zone {name:?}")]
    InvalidZone {
        /// The zone reference as given.
        name: String,
    },

    /// The host time type cannot hold this moment (or the arithmetic on it overflowed).
    #[error("moment is out of the supported range: {0}")]
    OutOfRange(#[from] jiff::Error),

    /// Text is not in the expected shape.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The text that failed.
        input: String,
        /// What was expected.
        reason: String,
    },

    /// The pattern has a token that only makes sense one way (formatting).
    #[error("token {token:?} cannot be parsed back")]
    UnsupportedToken {
        /// The offending token.
        token: &'static str,
    },
}

impl Error {
    /// Shorthand for [`Self::Parse`].
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_zone_message() {
        let e = Error::InvalidZone {
            name: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "invalid time zone \"Mars/Olympus\"");
    }

    #[test]
    fn test_parse_message() {
        let e = Error::parse("1404/13", "month is from 1 to 12");
        assert_eq!(e.to_string(), "cannot parse \"1404/13\": month is from 1 to 12");
    }

    #[test]
    fn test_unsupported_token_message() {
        let e = Error::UnsupportedToken { token: "rw" };
        assert_eq!(e.to_string(), "token \"rw\" cannot be parsed back");
    }

    #[test]
    fn test_is_std_error_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
