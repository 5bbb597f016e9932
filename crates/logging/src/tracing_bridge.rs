//! crates/logging/src/tracing_bridge.rs
//! Forwards records into the `tracing` ecosystem.
//!
//! [`TracingSink`] turns each record into a `tracing` event with target
//! [`TRACING_TARGET`], so programs that already install a subscriber see
//! context-logger output next to their other spans and events. The record's
//! fields are rendered into a single `fields` value and its call site into
//! `caller`; the message becomes the event message.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Context, Level, init_tracing_fmt};
//!
//! init_tracing_fmt(Level::DEBUG)?;
//! logging::info!(&Context::background(), "now routed through tracing");
//! ```

use std::error::Error;
use std::io;
use std::sync::Arc;

use logging_sink::{Level, Record, Sink};
use tracing_subscriber::filter::LevelFilter;

use crate::logger::{Logger, set_default};

/// Target attached to every forwarded event.
pub const TRACING_TARGET: &str = "ctxlog";

/// Sink that re-emits records as `tracing` events.
///
/// The current subscriber decides what to keep; the logger's own threshold
/// still applies first.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Maps a level onto the closest `tracing` level.
///
/// Fatal and panic collapse onto error, custom levels below trace onto trace,
/// and the unnamed level onto info. Disabled maps to nothing; any other
/// level above warn maps to error.
#[must_use]
pub fn tracing_level(level: Level) -> Option<tracing::Level> {
    if level == Level::DISABLED {
        None
    } else if level <= Level::TRACE {
        Some(tracing::Level::TRACE)
    } else if level == Level::DEBUG {
        Some(tracing::Level::DEBUG)
    } else if level == Level::INFO || level == Level::NO_LEVEL {
        Some(tracing::Level::INFO)
    } else if level == Level::WARN {
        Some(tracing::Level::WARN)
    } else {
        Some(tracing::Level::ERROR)
    }
}

fn level_filter(level: Level) -> LevelFilter {
    tracing_level(level).map_or(LevelFilter::OFF, LevelFilter::from_level)
}

fn render_fields(record: &Record<'_>) -> String {
    record
        .fields()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

macro_rules! forward {
    ($level:expr, $record:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            caller = %$record.caller(),
            fields = %render_fields($record),
            "{}",
            $record.message()
        )
    };
}

impl Sink for TracingSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let Some(level) = tracing_level(record.level()) else {
            return Ok(());
        };
        if level == tracing::Level::TRACE {
            forward!(tracing::Level::TRACE, record);
        } else if level == tracing::Level::DEBUG {
            forward!(tracing::Level::DEBUG, record);
        } else if level == tracing::Level::INFO {
            forward!(tracing::Level::INFO, record);
        } else if level == tracing::Level::WARN {
            forward!(tracing::Level::WARN, record);
        } else {
            forward!(tracing::Level::ERROR, record);
        }
        Ok(())
    }
}

/// Installs a `tracing-subscriber` fmt subscriber and routes the default
/// logger into it.
///
/// # Errors
///
/// Fails when a global `tracing` subscriber is already set. The default
/// logger is left untouched in that case.
pub fn init_tracing_fmt(level: Level) -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level_filter(level))
        .try_init()?;
    set_default(Logger::new(Arc::new(TracingSink::new()), level));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use std::fmt;
    use std::sync::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context as LayerContext, Layer, SubscriberExt};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Seen {
        target: String,
        level: Option<tracing::Level>,
        message: String,
        caller: String,
        fields: String,
    }

    #[derive(Default)]
    struct SeenVisitor(Seen);

    impl Visit for SeenVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            let rendered = format!("{value:?}");
            match field.name() {
                "message" => self.0.message = rendered,
                "caller" => self.0.caller = rendered,
                "fields" => self.0.fields = rendered,
                _ => {}
            }
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Seen>>>);

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
            let mut visitor = SeenVisitor::default();
            event.record(&mut visitor);
            visitor.0.target = event.metadata().target().to_owned();
            visitor.0.level = Some(*event.metadata().level());
            self.0
                .lock()
                .unwrap_or_else(|poison| poison.into_inner())
                .push(visitor.0);
        }
    }

    #[test]
    fn level_mapping() {
        assert_eq!(tracing_level(Level::custom(-5)), Some(tracing::Level::TRACE));
        assert_eq!(tracing_level(Level::TRACE), Some(tracing::Level::TRACE));
        assert_eq!(tracing_level(Level::DEBUG), Some(tracing::Level::DEBUG));
        assert_eq!(tracing_level(Level::INFO), Some(tracing::Level::INFO));
        assert_eq!(tracing_level(Level::NO_LEVEL), Some(tracing::Level::INFO));
        assert_eq!(tracing_level(Level::WARN), Some(tracing::Level::WARN));
        assert_eq!(tracing_level(Level::ERROR), Some(tracing::Level::ERROR));
        assert_eq!(tracing_level(Level::FATAL), Some(tracing::Level::ERROR));
        assert_eq!(tracing_level(Level::PANIC), Some(tracing::Level::ERROR));
        assert_eq!(tracing_level(Level::DISABLED), None);
        assert_eq!(level_filter(Level::DISABLED), LevelFilter::OFF);
        assert_eq!(level_filter(Level::WARN), LevelFilter::WARN);
    }

    #[test]
    fn records_become_events() {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());

        tracing::subscriber::with_default(subscriber, || {
            let ctx = Context::background()
                .with_logger(Logger::new(Arc::new(TracingSink::new()), Level::DEBUG))
                .with_values([("user", "u1")])
                .with_request_id("req-42");
            crate::emit::warn(&ctx, &[logging_sink::Value::from("slow"), 250.into()]);
            crate::emit::trace(&ctx, &[logging_sink::Value::from("filtered by logger")]);
        });

        let seen = recorder.0.lock().expect("recorder lock").clone();
        assert_eq!(seen.len(), 1);
        let event = &seen[0];
        assert_eq!(event.target, TRACING_TARGET);
        assert_eq!(event.level, Some(tracing::Level::WARN));
        assert_eq!(event.message, "slow 250");
        assert_eq!(event.fields, "user=u1 request_id=req-42");
        assert!(event.caller.starts_with("src/tracing_bridge.rs:"));
    }
}
