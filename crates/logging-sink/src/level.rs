//! crates/logging-sink/src/level.rs
//! Severity levels and their textual names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Severity attached to every emitted record.
///
/// Levels are totally ordered by their numeric value. The named levels run
/// from [`Level::TRACE`] (most verbose) to [`Level::PANIC`], followed by the
/// two sentinels [`Level::NO_LEVEL`] and [`Level::DISABLED`]. Values below
/// [`Level::TRACE`] form an open range of finer-grained trace levels that can
/// be created with [`Level::custom`].
///
/// # Examples
///
/// ```
/// use logging_sink::Level;
///
/// assert!(Level::DEBUG < Level::INFO);
/// assert!(Level::WARN.passes(Level::INFO));
/// assert!(!Level::INFO.passes(Level::WARN));
/// assert!(!Level::PANIC.passes(Level::DISABLED));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i8);

impl Level {
    /// Trace level; the most verbose named level.
    pub const TRACE: Self = Self(-1);
    /// Debug level.
    pub const DEBUG: Self = Self(0);
    /// Info level.
    pub const INFO: Self = Self(1);
    /// Warn level.
    pub const WARN: Self = Self(2);
    /// Error level.
    pub const ERROR: Self = Self(3);
    /// Fatal level.
    pub const FATAL: Self = Self(4);
    /// Panic level.
    pub const PANIC: Self = Self(5);
    /// Absent level. As a threshold it admits unlevelled records only.
    pub const NO_LEVEL: Self = Self(6);
    /// Suppresses every record, both as a threshold and as a record level.
    pub const DISABLED: Self = Self(7);

    /// Creates a level from its raw numeric value.
    ///
    /// Values below `-1` are the finer-grained trace levels; the remaining
    /// values coincide with the named constants.
    #[must_use]
    pub const fn custom(value: i8) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self.0
    }

    /// Reports whether a record at `self` passes the minimum `threshold`.
    ///
    /// Nothing passes a disabled threshold, and a record at
    /// [`Level::DISABLED`] never passes anything.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        threshold.0 != Self::DISABLED.0 && self.0 != Self::DISABLED.0 && self.0 >= threshold.0
    }

    /// Returns the lowercase name, or `None` for unnamed trace levels.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            -1 => Some("trace"),
            0 => Some("debug"),
            1 => Some("info"),
            2 => Some("warn"),
            3 => Some("error"),
            4 => Some("fatal"),
            5 => Some("panic"),
            6 => Some(""),
            7 => Some("disabled"),
            _ => None,
        }
    }

    /// Returns a three letter tag for console rendering.
    #[must_use]
    pub const fn short_tag(self) -> &'static str {
        match self.0 {
            -1 => "TRC",
            0 => "DBG",
            1 => "INF",
            2 => "WRN",
            3 => "ERR",
            4 => "FTL",
            5 => "PNC",
            6 => "???",
            7 => "OFF",
            _ => "TRC",
        }
    }

    /// Parses a level name.
    ///
    /// Matching is case-insensitive and ignores surrounding ASCII whitespace.
    /// The empty string selects [`Level::NO_LEVEL`] and decimal integers select
    /// [`Level::custom`] values.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Level;
    ///
    /// assert_eq!(Level::parse("WARN").unwrap(), Level::WARN);
    /// assert_eq!(Level::parse("-3").unwrap(), Level::custom(-3));
    /// assert!(Level::parse("verbose").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseLevelError> {
        let trimmed = input.trim_matches(|c: char| c.is_ascii_whitespace());
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "trace" => Self::TRACE,
            "debug" => Self::DEBUG,
            "info" => Self::INFO,
            "warn" => Self::WARN,
            "error" => Self::ERROR,
            "fatal" => Self::FATAL,
            "panic" => Self::PANIC,
            "disabled" => Self::DISABLED,
            "" => Self::NO_LEVEL,
            other => match other.parse::<i8>() {
                Ok(value) => Self(value),
                Err(_) => return Err(ParseLevelError::new(input)),
            },
        };
        Ok(level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Classification of a [`ParseLevelError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseLevelErrorKind {
    /// The input matched no level name and was not a numeric level.
    InvalidLevel,
}

/// Error returned when a string names no known [`Level`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid log level {input:?}")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the classification describing why parsing failed.
    #[must_use]
    pub const fn kind(&self) -> ParseLevelErrorKind {
        ParseLevelErrorKind::InvalidLevel
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
