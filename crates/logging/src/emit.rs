//! crates/logging/src/emit.rs
//! Leveled emission through the logger bound to a context.

use std::panic::Location;

use logging_sink::{Field, Level, Value};

use crate::context::Context;
use crate::format::format_message;
use crate::request_id::request_id_field;
use crate::store::{logger_for, resolve};

/// Emits one record for `ctx` when `level` passes its logger's threshold.
///
/// Fields are the context's bound fields, then the request id when one is
/// set, then `extra`. Nothing is formatted for filtered records.
pub(crate) fn dispatch(
    ctx: &Context,
    level: Level,
    extra: &[Field],
    args: &[Value],
    location: &'static Location<'static>,
) {
    let logger = logger_for(ctx);
    if !logger.enabled(level) {
        return;
    }

    let bound = resolve(ctx);
    let request = request_id_field(ctx);
    let message = format_message(args);

    if request.is_none() && extra.is_empty() {
        logger.write(level, &bound, &message, location);
        return;
    }

    let mut fields = Vec::with_capacity(bound.len() + 1 + extra.len());
    fields.extend_from_slice(&bound);
    fields.extend(request);
    fields.extend_from_slice(extra);
    logger.write(level, &fields, &message, location);
}

/// Emits `args` at `level`.
#[track_caller]
pub fn log(ctx: &Context, level: Level, args: &[Value]) {
    dispatch(ctx, level, &[], args, Location::caller());
}

/// Emits `args` at [`Level::TRACE`].
#[track_caller]
pub fn trace(ctx: &Context, args: &[Value]) {
    dispatch(ctx, Level::TRACE, &[], args, Location::caller());
}

/// Emits `args` at [`Level::DEBUG`].
#[track_caller]
pub fn debug(ctx: &Context, args: &[Value]) {
    dispatch(ctx, Level::DEBUG, &[], args, Location::caller());
}

/// Emits `args` at [`Level::INFO`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{CaptureSink, Context, Level, Logger, Value, info};
///
/// let sink = Arc::new(CaptureSink::new());
/// let ctx = Context::background()
///     .with_logger(Logger::new(sink.clone(), Level::INFO))
///     .with_request_id("req-42");
///
/// info(&ctx, &[Value::from("accepted"), Value::from(3)]);
///
/// let records = sink.records();
/// assert_eq!(records[0].message, "accepted 3");
/// assert_eq!(records[0].field("request_id").as_deref(), Some("req-42"));
/// ```
#[track_caller]
pub fn info(ctx: &Context, args: &[Value]) {
    dispatch(ctx, Level::INFO, &[], args, Location::caller());
}

/// Emits `args` at [`Level::WARN`].
#[track_caller]
pub fn warn(ctx: &Context, args: &[Value]) {
    dispatch(ctx, Level::WARN, &[], args, Location::caller());
}

/// Emits `args` at [`Level::ERROR`].
#[track_caller]
pub fn error(ctx: &Context, args: &[Value]) {
    dispatch(ctx, Level::ERROR, &[], args, Location::caller());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Logger, set_level};
    use crate::test_support::capture_default;
    use logging_sink::CaptureSink;
    use std::io;
    use std::sync::Arc;

    fn bound(level: Level) -> (Arc<CaptureSink>, Context) {
        let sink = Arc::new(CaptureSink::new());
        let ctx = Context::background().with_logger(Logger::new(sink.clone(), level));
        (sink, ctx)
    }

    #[test]
    fn fields_then_request_id() {
        let (sink, ctx) = bound(Level::INFO);
        let ctx = ctx.with_request_id("req-42").with_values([("user", "u1")]);

        error(
            &ctx,
            &[Value::from("failed op"), Value::error(&io::Error::other("disk full"))],
        );

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.level, Level::ERROR);
        assert_eq!(record.message, "failed op disk full");
        assert_eq!(record.keys(), ["user", "request_id"]);
        assert_eq!(record.field("user").as_deref(), Some("u1"));
        assert_eq!(record.field("request_id").as_deref(), Some("req-42"));
    }

    #[test]
    fn every_level_function_uses_its_level() {
        let (sink, ctx) = bound(Level::TRACE);
        trace(&ctx, &[Value::from("t")]);
        debug(&ctx, &[Value::from("d")]);
        info(&ctx, &[Value::from("i")]);
        warn(&ctx, &[Value::from("w")]);
        error(&ctx, &[Value::from("e")]);
        log(&ctx, Level::FATAL, &[Value::from("f")]);

        let levels: Vec<_> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            [
                Level::TRACE,
                Level::DEBUG,
                Level::INFO,
                Level::WARN,
                Level::ERROR,
                Level::FATAL
            ]
        );
    }

    #[test]
    fn filtered_levels_are_dropped() {
        let (sink, ctx) = bound(Level::WARN);
        debug(&ctx, &[Value::from("quiet")]);
        info(&ctx, &[Value::from("quiet")]);
        warn(&ctx, &[Value::from("loud")]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].message, "loud");
    }

    #[test]
    fn records_at_disabled_are_never_written() {
        let (sink, ctx) = bound(Level::INFO);
        log(&ctx, Level::DISABLED, &[Value::from("suppressed")]);
        crate::kv::with_key_values([("k", 1)]).log(&ctx, Level::DISABLED, &[]);
        assert!(sink.is_empty());

        let (sink, ctx) = bound(Level::NO_LEVEL);
        log(&ctx, Level::DISABLED, &[]);
        log(&ctx, Level::NO_LEVEL, &[Value::from("unlevelled")]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].level, Level::NO_LEVEL);
    }

    #[test]
    fn caller_points_at_the_call_site() {
        let (sink, ctx) = bound(Level::INFO);
        let line = line!() + 1;
        info(&ctx, &[]);
        let record = sink.drain().remove(0);
        assert_eq!(record.caller, format!("src/emit.rs:{line}"));
        assert_eq!(record.message, "");
    }

    #[test]
    fn background_uses_the_default_logger() {
        let session = capture_default(Level::INFO);
        info(&Context::background(), &[Value::from("hello")]);
        debug(&Context::background(), &[Value::from("hidden")]);

        let records = session.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].fields.is_empty());
    }

    #[test]
    fn default_level_change_applies_to_unbound_contexts() {
        let session = capture_default(Level::INFO);
        set_level(Level::WARN);
        let ctx = Context::background().with_request_id("req-7");

        info(&ctx, &[Value::from("dropped")]);
        warn(&ctx, &[Value::from("kept")]);

        let records = session.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "kept");
        assert_eq!(records[0].field("request_id").as_deref(), Some("req-7"));
    }

    #[test]
    fn bound_contexts_keep_their_logger_after_default_changes() {
        let session = capture_default(Level::INFO);
        let ctx = Context::background().with_values([("a", 1)]);
        set_level(Level::ERROR);

        info(&ctx, &[Value::from("still here")]);
        info(&Context::background(), &[Value::from("filtered")]);

        let records = session.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "still here");
    }
}
