//! crates/logging-sink/src/line_mode.rs
//! Record framing for writer-backed sinks.

/// How a writer-backed sink ends each rendered record.
///
/// Records are rendered into a scratch buffer first; [`LineMode::terminate`]
/// then finishes that buffer before it is written in one call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// One record per line.
    #[default]
    WithNewline,
    /// No terminator. For writers that frame records themselves.
    WithoutNewline,
}

impl LineMode {
    /// Returns the bytes written after each record.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), b"\n");
    /// assert!(LineMode::WithoutNewline.terminator().is_empty());
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static [u8] {
        match self {
            Self::WithNewline => b"\n",
            Self::WithoutNewline => b"",
        }
    }

    /// Appends the terminator to a rendered record.
    pub fn terminate(self, rendered: &mut Vec<u8>) {
        rendered.extend_from_slice(self.terminator());
    }
}
