use std::io;
use std::mem;
use std::sync::Mutex;
use std::time::SystemTime;

use super::{Sink, lock};
use crate::field::FieldSet;
use crate::level::Level;
use crate::record::Record;

/// Owned copy of a [`Record`] retained by a [`CaptureSink`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    /// The record's severity.
    pub level: Level,
    /// The record's fields in emission order.
    pub fields: FieldSet,
    /// The formatted message.
    pub message: String,
    /// The shortened call site.
    pub caller: String,
    /// The emission time.
    pub timestamp: SystemTime,
}

impl CapturedRecord {
    /// Returns the value of the last field named `key` rendered as text.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        self.fields.last_value(key).map(ToString::to_string)
    }

    /// Returns every key in emission order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.key()).collect()
    }
}

/// In-memory sink that keeps every record it receives.
///
/// Useful wherever emitted records need to be inspected rather than written,
/// most commonly in tests.
///
/// # Examples
///
/// ```
/// use std::panic::Location;
/// use logging_sink::{CaptureSink, Level, Record, Sink};
///
/// let sink = CaptureSink::new();
/// sink.emit(&Record::new(Level::WARN, &[], "low disk", Location::caller()))?;
///
/// assert_eq!(sink.count(Level::WARN), 1);
/// assert_eq!(sink.drain()[0].message, "low disk");
/// assert!(sink.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CaptureSink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl CaptureSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every captured record.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        lock(&self.records).clone()
    }

    /// Removes and returns every captured record.
    pub fn drain(&self) -> Vec<CapturedRecord> {
        mem::take(&mut *lock(&self.records))
    }

    /// Returns the number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    /// Reports whether no records have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.records).is_empty()
    }

    /// Returns the number of captured records at `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        lock(&self.records)
            .iter()
            .filter(|record| record.level == level)
            .count()
    }
}

impl Sink for CaptureSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let captured = CapturedRecord {
            level: record.level(),
            fields: record.fields().iter().cloned().collect(),
            message: record.message().to_owned(),
            caller: record.caller(),
            timestamp: record.timestamp(),
        };
        lock(&self.records).push(captured);
        Ok(())
    }
}
