//! crates/pkglog/src/level.rs
//! Verbosity levels and their textual forms.

use ::core::fmt;
use ::core::str::FromStr;

use thiserror::Error;

/// Verbosity of a log message or the threshold of a package logger.
///
/// Variants are ordered from the least verbose ([`Level::Critical`]) to the
/// most verbose ([`Level::Trace`]). A package logger configured at a given
/// level emits every message whose level compares less than or equal to it.
/// The numeric values match the raw representation stored inside
/// [`PackageLogger`](crate::PackageLogger).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(i8)]
pub enum Level {
    /// Only errors that will end the program.
    Critical = -1,
    /// Errors that are not fatal but lead to troubling behaviour.
    Error = 0,
    /// Unusual conditions, often caused by misconfiguration.
    Warning = 1,
    /// Normal but significant conditions.
    Notice = 2,
    /// Common, everyday updates. New package loggers start here.
    #[default]
    Info = 3,
    /// Verbose detail about internal processes.
    Debug = 4,
    /// Call-by-call tracing.
    Trace = 5,
}

/// Error returned when a string does not name a [`Level`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("couldn't parse log level \"{input}\"")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Creates a parse error that records the rejected input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Error returned when a raw integer lies outside the seven known levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("unhandled log level value {0}")]
pub struct InvalidLevelError(pub i8);

impl Level {
    /// Every level, from least to most verbose.
    pub const ALL: [Self; 7] = [
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Returns the raw value used for atomic storage.
    #[must_use]
    #[inline]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Decodes a raw value, returning `None` when it is not a known level.
    #[must_use]
    pub const fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Self::Critical),
            0 => Some(Self::Error),
            1 => Some(Self::Warning),
            2 => Some(Self::Notice),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Returns the canonical uppercase name, e.g. `"WARNING"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Returns the single-character representation used in compact log prefixes.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Critical => 'C',
            Self::Error => 'E',
            Self::Warning => 'W',
            Self::Notice => 'N',
            Self::Info => 'I',
            Self::Debug => 'D',
            Self::Trace => 'T',
        }
    }

    /// Returns the digit alias accepted by [`parse_level`].
    ///
    /// [`Level::Critical`] has no digit alias.
    #[must_use]
    pub const fn digit(self) -> Option<char> {
        match self {
            Self::Critical => None,
            Self::Error => Some('0'),
            Self::Warning => Some('1'),
            Self::Notice => Some('2'),
            Self::Info => Some('3'),
            Self::Debug => Some('4'),
            Self::Trace => Some('5'),
        }
    }
}

/// Parses a level from its name, its single character, or its digit alias.
///
/// Matching is case-sensitive. `"CRITICAL"` and `"C"` are accepted for
/// [`Level::Critical`]; every other level also accepts its digit (`"0"` for
/// [`Level::Error`] through `"5"` for [`Level::Trace`]).
///
/// # Examples
///
/// ```
/// use pkglog::{Level, parse_level};
///
/// assert_eq!(parse_level("DEBUG"), Ok(Level::Debug));
/// assert_eq!(parse_level("W"), Ok(Level::Warning));
/// assert_eq!(parse_level("0"), Ok(Level::Error));
/// assert!(parse_level("debug").is_err());
/// ```
pub fn parse_level(s: &str) -> Result<Level, ParseLevelError> {
    match s {
        "CRITICAL" | "C" => Ok(Level::Critical),
        "ERROR" | "0" | "E" => Ok(Level::Error),
        "WARNING" | "1" | "W" => Ok(Level::Warning),
        "NOTICE" | "2" | "N" => Ok(Level::Notice),
        "INFO" | "3" | "I" => Ok(Level::Info),
        "DEBUG" | "4" | "D" => Ok(Level::Debug),
        "TRACE" | "5" | "T" => Ok(Level::Trace),
        other => Err(ParseLevelError::new(other)),
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(s)
    }
}

impl TryFrom<i8> for Level {
    type Error = InvalidLevelError;

    fn try_from(value: i8) -> Result<Self, InvalidLevelError> {
        Self::from_i8(value).ok_or(InvalidLevelError(value))
    }
}

impl From<Level> for i8 {
    fn from(value: Level) -> Self {
        value.as_i8()
    }
}
