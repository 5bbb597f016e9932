#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` defines the vocabulary shared between loggers and the
//! destinations they write to: severity [`Level`]s, printable [`Value`]s,
//! ordered [`Field`]s grouped into immutable [`FieldSet`]s, and the
//! [`Record`] handed to a [`Sink`] for every emission. It also ships the
//! sinks the workspace needs out of the box.
//!
//! # Design
//!
//! [`Sink`] is deliberately narrow: one method that receives a borrowed
//! [`Record`] and may fail with an [`std::io::Error`]. Threshold checks happen
//! before a record is built, so sinks never see filtered records. Writer
//! backed sinks ([`JsonSink`], [`ConsoleSink`]) render each record into a
//! scratch buffer and then write it under a mutex, and honour a [`LineMode`].
//! [`CaptureSink`] keeps owned copies for inspection.
//!
//! # Invariants
//!
//! - Field order is emission order; duplicate keys are rendered as given.
//! - Rendering a [`Value`] never fails; JSON output is always valid JSON.
//! - A record is written with a single `write_all` call.
//!
//! # Errors
//!
//! [`Level::parse`] returns [`ParseLevelError`] for unknown names. Sink
//! operations surface [`std::io::Error`] values from the underlying writer.
//!
//! # Examples
//!
//! ```
//! use std::panic::Location;
//! use logging_sink::{FieldSet, JsonSink, Level, Record, Sink};
//!
//! let sink = JsonSink::new(Vec::new());
//! let fields = FieldSet::from_pairs([("request_id", "req-42")]);
//! sink.emit(&Record::new(Level::INFO, &fields, "accepted", Location::caller()))?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(output.contains(r#""request_id":"req-42""#));
//! # Ok::<(), std::io::Error>(())
//! ```

mod field;
mod level;
mod line_mode;
mod record;
mod sink;
mod value;

pub use field::{Field, FieldSet};
pub use level::{Level, ParseLevelError, ParseLevelErrorKind};
pub use line_mode::LineMode;
pub use record::{Record, format_timestamp, short_caller, short_caller_path};
pub use sink::{CaptureSink, CapturedRecord, ConsoleSink, JsonSink, Sink, render_json};
pub use value::Value;
