//! Error kinds returned by [`crate::parse`] and friends.

use core::fmt;

#[cfg(feature = "std")]
use std::error::Error;

/// Everything that can make a cron expression fail to compile.
///
/// Every variant is a static-described failure: callers get a stable kind
/// to match on plus enough payload (field index, offending text) to build a
/// useful message, but the error never borrows from the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Raw expression text exceeded the 256 byte limit.
    InputTooLong,
    /// The expression did not split into exactly six whitespace-separated
    /// fields.
    MalformedFieldCount { found: usize },
    /// A literal integer fell outside the field's valid range.
    OutOfRange { field: &'static str, value: i64 },
    /// An `a-b` range was empty or inverted.
    BadRange { field: &'static str },
    /// A `/n` step was missing, zero, or too large.
    BadStep { field: &'static str },
    /// Misuse of the `H` hash token.
    BadHash { field: &'static str },
    /// Misuse of `L`/`L-n`/`dL`.
    BadL { field: &'static str },
    /// Misuse of `W`/`LW`.
    BadW { field: &'static str },
    /// Both day-of-month and day-of-week were specific.
    ConflictingDaySpec,
    /// The calendar oracle rejected a broken-down time that should have
    /// been representable.
    InternalError,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTooLong => write!(f, "cron expression exceeds 256 bytes"),
            Self::MalformedFieldCount { found } => {
                write!(f, "expected 6 fields, found {found}")
            }
            Self::OutOfRange { field, value } => {
                write!(f, "value {value} out of range for field {field}")
            }
            Self::BadRange { field } => write!(f, "invalid range in field {field}"),
            Self::BadStep { field } => write!(f, "invalid step in field {field}"),
            Self::BadHash { field } => write!(f, "invalid H token in field {field}"),
            Self::BadL { field } => write!(f, "invalid L token in field {field}"),
            Self::BadW { field } => write!(f, "invalid W token in field {field}"),
            Self::ConflictingDaySpec => {
                write!(f, "day-of-month and day-of-week cannot both be specific")
            }
            Self::InternalError => write!(f, "calendar oracle rejected a valid broken-down time"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for ParseError {}
