use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use super::{Sink, lock};
use crate::line_mode::LineMode;
use crate::record::Record;

/// Sink that writes one JSON object per record.
///
/// The object starts with `level`, continues with the record's fields in
/// order (duplicate keys included), and ends with `time`, `caller` and
/// `message`:
///
/// ```text
/// {"level":"info","request_id":"req-42","user":"u1","time":"2024-05-01T10:00:00Z","caller":"src/handler.rs:17","message":"done"}
/// ```
///
/// Records are rendered into a scratch buffer before the writer is locked, so
/// concurrent emitters never interleave partial lines.
///
/// # Examples
///
/// ```
/// use std::panic::Location;
/// use logging_sink::{Field, JsonSink, Level, Record, Sink};
///
/// let sink = JsonSink::new(Vec::new());
/// let fields = [Field::new("user", "u1")];
/// sink.emit(&Record::new(Level::INFO, &fields, "signed in", Location::caller()))?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.starts_with(r#"{"level":"info","user":"u1","time":"#));
/// assert!(output.ends_with("\"message\":\"signed in\"}\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct JsonSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl JsonSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonSink<io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> JsonSink<W> {
    /// Creates a sink that appends a newline after each record.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W> fmt::Debug for JsonSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

impl<W> Sink for JsonSink<W>
where
    W: Write + Send,
{
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let mut buffer = Vec::with_capacity(256);
        render_json(record, &mut buffer)?;
        self.line_mode.terminate(&mut buffer);
        lock(&self.writer).write_all(&buffer)
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.writer).flush()
    }
}

/// Renders `record` as a single JSON object without a trailing newline.
pub fn render_json(record: &Record<'_>, out: &mut Vec<u8>) -> io::Result<()> {
    out.push(b'{');
    let mut first = true;

    // Unlevelled records carry no level key.
    let level = record.level().to_string();
    if !level.is_empty() {
        write_key(out, "level", &mut first)?;
        serde_json::to_writer(&mut *out, &level)?;
    }

    for field in record.fields() {
        write_key(out, field.key(), &mut first)?;
        serde_json::to_writer(&mut *out, field.value())?;
    }

    write_key(out, "time", &mut first)?;
    serde_json::to_writer(&mut *out, &record.rfc3339())?;
    write_key(out, "caller", &mut first)?;
    serde_json::to_writer(&mut *out, &record.caller())?;
    write_key(out, "message", &mut first)?;
    serde_json::to_writer(&mut *out, record.message())?;

    out.push(b'}');
    Ok(())
}

fn write_key(out: &mut Vec<u8>, key: &str, first: &mut bool) -> io::Result<()> {
    if !*first {
        out.push(b',');
    }
    *first = false;
    serde_json::to_writer(&mut *out, key)?;
    out.push(b':');
    Ok(())
}
