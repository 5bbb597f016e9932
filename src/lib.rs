#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `ctxlog` is the umbrella crate for the workspace. It re-exports the
//! context-scoped logger from `logging` at the top level and the sink
//! vocabulary from `logging-sink` under [`sink`], so applications depend on a
//! single crate.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use ctxlog::{CaptureSink, Context, Level, Logger};
//!
//! let sink = Arc::new(CaptureSink::new());
//! let ctx = Context::background()
//!     .with_logger(Logger::new(sink.clone(), Level::INFO))
//!     .with_request_id("req-42");
//!
//! ctxlog::info!(&ctx, "ready");
//! assert_eq!(sink.records()[0].field("request_id").as_deref(), Some("req-42"));
//! ```

pub use logging::*;

/// Levels, values, records and the bundled sinks.
pub mod sink {
    pub use logging_sink::*;
}
