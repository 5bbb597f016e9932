//! crates/logging/src/macros.rs
//! Variadic front ends for the emission functions.
//!
//! Each argument after the context goes through `Value::from`, so anything
//! with a `From` conversion into [`Value`](crate::Value) can be passed
//! directly.

/// Emit at trace level.
///
/// # Example
/// ```
/// # let ctx = logging::Context::background().with_logger(
/// #     logging::Logger::new(std::sync::Arc::new(logging::CaptureSink::new()), logging::Level::TRACE));
/// logging::trace!(&ctx, "polling", 3, "sources");
/// ```
#[macro_export]
macro_rules! trace {
    ($ctx:expr $(, $arg:expr)* $(,)?) => {
        $crate::trace($ctx, &[$($crate::Value::from($arg)),*])
    };
}

/// Emit at debug level.
#[macro_export]
macro_rules! debug {
    ($ctx:expr $(, $arg:expr)* $(,)?) => {
        $crate::debug($ctx, &[$($crate::Value::from($arg)),*])
    };
}

/// Emit at info level.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use logging::{CaptureSink, Context, Level, Logger};
///
/// let sink = Arc::new(CaptureSink::new());
/// let ctx = Context::background().with_logger(Logger::new(sink.clone(), Level::INFO));
///
/// logging::info!(&ctx, "served", 200, "in", 1.5);
/// assert_eq!(sink.records()[0].message, "served 200 in 1.5");
/// ```
#[macro_export]
macro_rules! info {
    ($ctx:expr $(, $arg:expr)* $(,)?) => {
        $crate::info($ctx, &[$($crate::Value::from($arg)),*])
    };
}

/// Emit at warn level.
#[macro_export]
macro_rules! warn {
    ($ctx:expr $(, $arg:expr)* $(,)?) => {
        $crate::warn($ctx, &[$($crate::Value::from($arg)),*])
    };
}

/// Emit at error level.
#[macro_export]
macro_rules! error {
    ($ctx:expr $(, $arg:expr)* $(,)?) => {
        $crate::error($ctx, &[$($crate::Value::from($arg)),*])
    };
}

/// Build a [`KvLog`](crate::KvLog) from `key => value` pairs.
///
/// # Example
/// ```
/// let kv = logging::kv!("user" => "u1", "attempt" => 2);
/// assert_eq!(kv.fields().len(), 2);
/// assert!(logging::kv!().fields().is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::KvLog::default()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::KvLog::default().with_fields([$($crate::Field::new($key, $value)),+])
    };
}
