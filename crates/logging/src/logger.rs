//! crates/logging/src/logger.rs
//! Sink plus threshold, and the process-wide fallback logger.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use logging_sink::{Field, JsonSink, Level, Record, Sink};

/// A sink paired with the minimum level it accepts.
///
/// Loggers are immutable; changing the level produces a new logger that
/// shares the same sink.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{CaptureSink, Level, Logger};
///
/// let sink = Arc::new(CaptureSink::new());
/// let logger = Logger::new(sink.clone(), Level::WARN);
///
/// assert!(logger.enabled(Level::ERROR));
/// assert!(!logger.enabled(Level::INFO));
/// assert_eq!(logger.with_level(Level::DEBUG).level(), Level::DEBUG);
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    level: Level,
}

impl Logger {
    /// Creates a logger writing to `sink` at or above `level`.
    pub fn new(sink: Arc<dyn Sink>, level: Level) -> Self {
        Self { sink, level }
    }

    /// Creates a logger writing JSON lines to standard output.
    #[must_use]
    pub fn stdout(level: Level) -> Self {
        Self::new(Arc::new(JsonSink::stdout()), level)
    }

    /// Returns the minimum level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns a logger sharing this sink with a different minimum level.
    #[must_use]
    pub fn with_level(&self, level: Level) -> Self {
        Self::new(Arc::clone(&self.sink), level)
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Reports whether records at `level` reach the sink.
    #[must_use]
    pub const fn enabled(&self, level: Level) -> bool {
        level.passes(self.level)
    }

    /// Writes a record if `level` passes the threshold.
    ///
    /// Sink failures are dropped here; logging never fails the caller.
    pub fn write(
        &self,
        level: Level,
        fields: &[Field],
        message: &str,
        location: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let _ = self.sink.emit(&Record::new(level, fields, message, location));
    }

    /// Flushes the sink, ignoring failures.
    pub fn flush(&self) {
        let _ = self.sink.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

fn default_cell() -> &'static RwLock<Arc<Logger>> {
    static DEFAULT: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Arc::new(Logger::stdout(Level::INFO))))
}

/// Returns the process-wide default logger.
///
/// Until [`setup`] or [`set_default`] runs this is an info-level JSON logger
/// on standard output. Contexts with no bound logger emit through it.
#[must_use]
pub fn default_logger() -> Arc<Logger> {
    let guard = default_cell()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

/// Replaces the process-wide default logger and returns the previous one.
///
/// Contexts that already carry a bound logger keep it. No ordering is
/// promised against emissions racing on other threads, so configure the
/// default before concurrent logging starts.
pub fn set_default(logger: Logger) -> Arc<Logger> {
    let mut guard = default_cell()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, Arc::new(logger))
}

/// Resets the default logger to JSON on standard output at `level`.
pub fn setup(level: Level) {
    setup_with(Arc::new(JsonSink::stdout()), level);
}

/// Resets the default logger to `sink` at `level`.
pub fn setup_with(sink: Arc<dyn Sink>, level: Level) {
    set_default(Logger::new(sink, level));
}

/// Changes the default logger's minimum level, keeping its sink.
pub fn set_level(level: Level) {
    let mut guard = default_cell()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let adjusted = guard.with_level(level);
    *guard = Arc::new(adjusted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging_sink::CaptureSink;
    use std::io;

    struct FailingSink;

    impl Sink for FailingSink {
        fn emit(&self, _record: &Record<'_>) -> io::Result<()> {
            Err(io::Error::other("sink unavailable"))
        }

        fn flush(&self) -> io::Result<()> {
            Err(io::Error::other("sink unavailable"))
        }
    }

    #[test]
    fn write_respects_threshold() {
        let sink = Arc::new(CaptureSink::new());
        let logger = Logger::new(sink.clone(), Level::WARN);

        logger.write(Level::INFO, &[], "dropped", Location::caller());
        logger.write(Level::WARN, &[], "kept", Location::caller());
        logger.write(Level::ERROR, &[], "kept too", Location::caller());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(Level::INFO), 0);
    }

    #[test]
    fn disabled_logger_drops_everything() {
        let sink = Arc::new(CaptureSink::new());
        let logger = Logger::new(sink.clone(), Level::DISABLED);
        logger.write(Level::PANIC, &[], "nothing", Location::caller());
        assert!(sink.is_empty());
    }

    #[test]
    fn with_level_shares_the_sink() {
        let sink = Arc::new(CaptureSink::new());
        let quiet = Logger::new(sink.clone(), Level::ERROR);
        let verbose = quiet.with_level(Level::DEBUG);

        verbose.write(Level::DEBUG, &[], "seen", Location::caller());
        quiet.write(Level::DEBUG, &[], "unseen", Location::caller());

        assert_eq!(sink.len(), 1);
        assert_eq!(quiet.level(), Level::ERROR);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let logger = Logger::new(Arc::new(FailingSink), Level::TRACE);
        logger.write(Level::ERROR, &[], "lost", Location::caller());
        logger.flush();
    }

    #[test]
    fn debug_shows_level() {
        let logger = Logger::new(Arc::new(CaptureSink::new()), Level::WARN);
        assert_eq!(format!("{logger:?}"), "Logger { level: Level(2), .. }");
    }
}
