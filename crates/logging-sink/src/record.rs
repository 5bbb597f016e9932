//! crates/logging-sink/src/record.rs
//! The unit handed from loggers to sinks.

use std::panic::Location;
use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::field::Field;
use crate::level::Level;

/// A single emission: severity, fields, message, timestamp and call site.
///
/// Records borrow their fields and message from the emitting logger, so a
/// sink that needs to keep them must copy what it retains.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    level: Level,
    fields: &'a [Field],
    message: &'a str,
    timestamp: SystemTime,
    location: &'static Location<'static>,
}

impl<'a> Record<'a> {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(
        level: Level,
        fields: &'a [Field],
        message: &'a str,
        location: &'static Location<'static>,
    ) -> Self {
        Self::with_timestamp(level, fields, message, location, SystemTime::now())
    }

    /// Creates a record with an explicit timestamp.
    #[must_use]
    pub const fn with_timestamp(
        level: Level,
        fields: &'a [Field],
        message: &'a str,
        location: &'static Location<'static>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            level,
            fields,
            message,
            timestamp,
            location,
        }
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the fields in emission order.
    #[must_use]
    pub const fn fields(&self) -> &'a [Field] {
        self.fields
    }

    /// Returns the formatted message.
    #[must_use]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Returns the emission time.
    #[must_use]
    pub const fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Returns the call site that produced the record.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Returns the call site as `dir/file.rs:line`.
    #[must_use]
    pub fn caller(&self) -> String {
        short_caller(self.location)
    }

    /// Returns the timestamp formatted as RFC 3339 in UTC.
    #[must_use]
    pub fn rfc3339(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Shortens a source location to its last directory, file name and line.
///
/// # Examples
///
/// ```
/// use logging_sink::short_caller_path;
///
/// assert_eq!(short_caller_path("crates/app/src/handler.rs", 12), "src/handler.rs:12");
/// assert_eq!(short_caller_path("main.rs", 3), "main.rs:3");
/// ```
#[must_use]
pub fn short_caller_path(file: &str, line: u32) -> String {
    let mut separators = file.rmatch_indices(['/', '\\']).map(|(index, _)| index);
    let start = match (separators.next(), separators.next()) {
        (Some(_), Some(second)) => second + 1,
        _ => 0,
    };
    format!("{}:{line}", &file[start..])
}

/// Shortens a [`Location`] with [`short_caller_path`].
#[must_use]
pub fn short_caller(location: &Location<'_>) -> String {
    short_caller_path(location.file(), location.line())
}

/// Formats a timestamp as RFC 3339 in UTC.
///
/// Years that RFC 3339 cannot express render as the Unix epoch.
#[must_use]
pub fn format_timestamp(timestamp: SystemTime) -> String {
    let datetime = OffsetDateTime::from(timestamp);
    datetime
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn short_caller_keeps_last_directory() {
        assert_eq!(short_caller_path("/a/b/c/file.rs", 7), "c/file.rs:7");
        assert_eq!(short_caller_path("dir/file.rs", 1), "dir/file.rs:1");
        assert_eq!(short_caller_path("/file.rs", 1), "/file.rs:1");
        assert_eq!(short_caller_path("file.rs", 9), "file.rs:9");
        assert_eq!(short_caller_path(r"src\win\mod.rs", 2), r"win\mod.rs:2");
    }

    #[test]
    fn record_exposes_its_parts() {
        let fields = [Field::new("k", 1)];
        let location = Location::caller();
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        let record = Record::with_timestamp(Level::WARN, &fields, "hello", location, at);

        assert_eq!(record.level(), Level::WARN);
        assert_eq!(record.fields().len(), 1);
        assert_eq!(record.message(), "hello");
        assert_eq!(record.timestamp(), at);
        assert_eq!(record.rfc3339(), "1970-01-02T00:00:00Z");
        assert!(record.caller().ends_with(&format!(":{}", location.line())));
        assert!(record.caller().contains("record.rs"));
    }
}
