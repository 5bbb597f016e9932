#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` attaches structured fields, a request identifier and a logger to
//! an immutable [`Context`] that callers thread through their code. Each
//! emission resolves those from the context and writes one record, filtered by
//! the level threshold of the logger in force.
//!
//! # Design
//!
//! A [`Context`] is a persistent list of typed slots. Binding fields
//! ([`bind_fields`], [`with_context_values`]) derives a child whose slot holds
//! the parent's fields followed by the new ones, together with the parent's
//! [`Logger`]. When nothing is bound yet the child captures the process-wide
//! default ([`default_logger`]) at that moment, so [`setup`] only affects
//! contexts bound afterwards and contexts with nothing bound.
//!
//! Emission goes through [`info`], [`warn`] and friends, or the matching
//! macros, which convert every argument into a [`Value`]. [`KvLog`] adds
//! per-call fields on top of whatever the context carries.
//!
//! The building blocks ([`Level`], [`Value`], [`Field`], [`FieldSet`],
//! [`Sink`] and the bundled sinks) live in `logging-sink` and are re-exported
//! here.
//!
//! # Invariants
//!
//! - Deriving a context never changes its parent or any sibling.
//! - Emitted fields are ordered: context fields, then `request_id` when it is
//!   non-empty, then builder fields. Duplicate keys are kept.
//! - Records below the logger's threshold are neither formatted nor written.
//! - Emission never fails and never panics; sink errors are dropped.
//!
//! # Errors
//!
//! Only configuration can fail: [`parse_level`] returns [`ParseLevelError`],
//! [`KvLog::try_from_flat`] returns [`FieldsError`] and
//! [`LogConfig::from_env`] returns [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{CaptureSink, Context, Level, Logger, kv};
//!
//! let sink = Arc::new(CaptureSink::new());
//! let ctx = Context::background()
//!     .with_logger(Logger::new(sink.clone(), Level::INFO))
//!     .with_request_id("req-42")
//!     .with_values([("user", "u1")]);
//!
//! logging::error!(&ctx, "failed op");
//! kv!("attempt" => 2).warn(&ctx, &["retrying".into()]);
//! logging::debug!(&ctx, "filtered");
//!
//! let records = sink.records();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].keys(), ["user", "request_id"]);
//! assert_eq!(records[1].keys(), ["user", "request_id", "attempt"]);
//! ```

mod config;
mod context;
mod emit;
mod format;
mod kv;
mod logger;
mod macros;
mod request_id;
mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{
    ConfigError, FORMAT_ENV, LEVEL_ENV, LogConfig, LogFormat, LogTarget, TARGET_ENV, init,
};
pub use context::Context;
pub use emit::{debug, error, info, log, trace, warn};
pub use format::format_message;
pub use kv::{FieldsError, KvLog, with_key_values};
pub use logger::{Logger, default_logger, set_default, set_level, setup, setup_with};
pub use logging_sink::{
    CaptureSink, CapturedRecord, ConsoleSink, Field, FieldSet, JsonSink, Level, LineMode,
    ParseLevelError, ParseLevelErrorKind, Record, Sink, Value, render_json, short_caller,
};
pub use request_id::{REQUEST_ID_FIELD, request_id, with_request_id};
pub use store::{bind_fields, logger_for, resolve, with_context_values, with_logger};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{TRACING_TARGET, TracingSink, init_tracing_fmt, tracing_level};

/// Parses a level name such as `"warn"`, ignoring case and surrounding space.
///
/// The empty string parses to [`Level::NO_LEVEL`] and integers to the level
/// with that number.
///
/// # Errors
///
/// Returns [`ParseLevelError`] for any other input.
///
/// ```
/// use logging::{Level, parse_level};
///
/// assert_eq!(parse_level("WARN")?, Level::WARN);
/// assert!(parse_level("loud").is_err());
/// # Ok::<(), logging::ParseLevelError>(())
/// ```
pub fn parse_level(name: &str) -> Result<Level, ParseLevelError> {
    Level::parse(name)
}
