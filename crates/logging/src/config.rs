//! crates/logging/src/config.rs
//! Default-logger configuration read from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use logging_sink::{ConsoleSink, JsonSink, Level, ParseLevelError, Sink};
use thiserror::Error;

use crate::logger::{Logger, set_default};

/// Environment variable holding the minimum level.
pub const LEVEL_ENV: &str = "CTXLOG_LEVEL";
/// Environment variable selecting [`LogFormat`].
pub const FORMAT_ENV: &str = "CTXLOG_FORMAT";
/// Environment variable selecting [`LogTarget`].
pub const TARGET_ENV: &str = "CTXLOG_TARGET";

/// Failure to read a [`LogConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The level name was not recognised.
    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),
    /// The format name was not `json` or `console`.
    #[error("unknown log format {0:?}")]
    UnknownFormat(String),
    /// The target name was not `stdout` or `stderr`.
    #[error("unknown log target {0:?}")]
    UnknownTarget(String),
}

/// Rendering used by the configured sink.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable single lines.
    Console,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "console" | "text" => Ok(Self::Console),
            _ => Err(ConfigError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Console => "console",
        })
    }
}

/// Stream the configured sink writes to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl FromStr for LogTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            _ => Err(ConfigError::UnknownTarget(s.to_owned())),
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        })
    }
}

/// Level, format and destination for a default logger.
///
/// The default is info-level JSON on standard output.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use logging::{Level, LogConfig, LogFormat};
///
/// let env = HashMap::from([("CTXLOG_LEVEL", "warn"), ("CTXLOG_FORMAT", "console")]);
/// let config = LogConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))?;
///
/// assert_eq!(config.level, Level::WARN);
/// assert_eq!(config.format, LogFormat::Console);
/// assert_eq!(config.build().level(), Level::WARN);
/// # Ok::<(), logging::ConfigError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Minimum level emitted.
    pub level: Level,
    /// Output rendering.
    pub format: LogFormat,
    /// Output stream.
    pub target: LogTarget,
}

impl LogConfig {
    /// Reads `CTXLOG_LEVEL`, `CTXLOG_FORMAT` and `CTXLOG_TARGET`.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unknown name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unknown name.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = read(LEVEL_ENV) {
            config.level = Level::parse(&value)?;
        }
        if let Some(value) = read(FORMAT_ENV) {
            config.format = value.parse()?;
        }
        if let Some(value) = read(TARGET_ENV) {
            config.target = value.parse()?;
        }
        Ok(config)
    }

    /// Builds a logger for this configuration.
    #[must_use]
    pub fn build(&self) -> Logger {
        let sink: Arc<dyn Sink> = match (self.format, self.target) {
            (LogFormat::Json, LogTarget::Stdout) => Arc::new(JsonSink::stdout()),
            (LogFormat::Json, LogTarget::Stderr) => Arc::new(JsonSink::stderr()),
            (LogFormat::Console, LogTarget::Stdout) => Arc::new(ConsoleSink::stdout()),
            (LogFormat::Console, LogTarget::Stderr) => Arc::new(ConsoleSink::stderr()),
        };
        Logger::new(sink, self.level)
    }
}

/// Installs the logger described by `config` as the process default.
///
/// Returns the logger that was the default before.
pub fn init(config: &LogConfig) -> Arc<Logger> {
    set_default(config.build())
}
