//! crates/logging/src/test_support.rs
//! Serialised capture of the process-wide default logger for tests.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use logging_sink::{CaptureSink, CapturedRecord, Level};

use crate::logger::{Logger, set_default};

fn session_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Holds the default logger pointed at an in-memory sink.
///
/// Only one session exists at a time; other tests that touch the default
/// block in [`capture_default`] until this one is dropped. Dropping the
/// session reinstalls whatever logger was the default before it started.
#[must_use = "the previous default logger is restored when the session is dropped"]
pub struct DefaultLoggerSession {
    sink: Arc<CaptureSink>,
    previous: Option<Arc<Logger>>,
    _lock: MutexGuard<'static, ()>,
}

/// Installs a capturing default logger at `level` for the current test.
pub fn capture_default(level: Level) -> DefaultLoggerSession {
    let lock = session_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let sink = Arc::new(CaptureSink::new());
    let previous = set_default(Logger::new(sink.clone(), level));
    DefaultLoggerSession {
        sink,
        previous: Some(previous),
        _lock: lock,
    }
}

impl DefaultLoggerSession {
    /// Returns the sink behind the default logger.
    #[must_use]
    pub fn sink(&self) -> &Arc<CaptureSink> {
        &self.sink
    }

    /// Returns copies of everything captured so far.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.sink.records()
    }

    /// Removes and returns everything captured so far.
    pub fn drain(&self) -> Vec<CapturedRecord> {
        self.sink.drain()
    }
}

impl Drop for DefaultLoggerSession {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            set_default(Logger::clone(&previous));
        }
    }
}
