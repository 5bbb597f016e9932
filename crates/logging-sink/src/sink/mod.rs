use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::record::Record;

mod capture;
mod console;
mod json;

pub use capture::{CaptureSink, CapturedRecord};
pub use console::ConsoleSink;
pub use json::{JsonSink, render_json};

/// Destination for rendered records.
///
/// Loggers hand every record that passes their threshold to
/// [`emit`](Self::emit). Implementations own their rendering and I/O; the
/// caller discards the returned error, so a sink that wants failures noticed
/// must report them itself. Sinks are shared across threads and must
/// serialise access to any writer they own.
pub trait Sink: Send + Sync {
    /// Renders and writes one record.
    fn emit(&self, record: &Record<'_>) -> io::Result<()>;

    /// Flushes buffered output.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<S> Sink for Arc<S>
where
    S: Sink + ?Sized,
{
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        (**self).emit(record)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S> Sink for Box<S>
where
    S: Sink + ?Sized,
{
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        (**self).emit(record)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Locks a sink's mutex, recovering the guard if a writer panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}
