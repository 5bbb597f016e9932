use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::Mutex;

use super::{Sink, lock};
use crate::line_mode::LineMode;
use crate::record::Record;
use crate::value::Value;

/// Human-readable sink for interactive use.
///
/// Each record renders as
/// `<time> <LVL> <message> key=value ... caller=<dir/file.rs:line>`.
/// String values containing whitespace, `=` or quotes are quoted.
pub struct ConsoleSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl ConsoleSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl ConsoleSink<io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> ConsoleSink<W> {
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

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W> fmt::Debug for ConsoleSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

impl<W> Sink for ConsoleSink<W>
where
    W: Write + Send,
{
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let mut line = render_console(record).into_bytes();
        self.line_mode.terminate(&mut line);
        lock(&self.writer).write_all(&line)
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.writer).flush()
    }
}

fn render_console(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(128);
    let _ = write!(
        line,
        "{} {} {}",
        record.rfc3339(),
        record.level().short_tag(),
        record.message()
    );
    for field in record.fields() {
        let _ = write!(line, " {}=", field.key());
        push_value(&mut line, field.value());
    }
    let _ = write!(line, " caller={}", record.caller());
    line
}

fn push_value(line: &mut String, value: &Value) {
    let rendered = value.to_string();
    let needs_quotes = rendered.is_empty()
        || rendered
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '"');
    if needs_quotes {
        let _ = write!(line, "{rendered:?}");
    } else {
        line.push_str(&rendered);
    }
}
