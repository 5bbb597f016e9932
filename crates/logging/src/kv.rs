//! crates/logging/src/kv.rs
//! Fluent builder for per-call fields.

use std::borrow::Cow;
use std::panic::Location;

use logging_sink::{Field, FieldSet, Level, Value};
use thiserror::Error;

use crate::context::Context;
use crate::emit::dispatch;

/// Failure to read a flat key/value sequence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldsError {
    /// The sequence has an odd length, leaving its last key without a value.
    #[error("key {key:?} has no value")]
    UnpairedKey {
        /// The rendered final key.
        key: String,
    },
    /// A key position holds something other than a string.
    #[error("key at index {index} is not a string")]
    NonStringKey {
        /// Position of the offending element in the sequence.
        index: usize,
    },
}

/// Immutable set of fields attached to individual emissions.
///
/// Each call that adds fields returns a new builder; the receiver is left as
/// it was, so one base builder can be extended along separate branches.
/// Emitting combines the context's bound fields, the request id and the
/// builder's fields, in that order.
///
/// # Examples
///
/// ```
/// use logging::with_key_values;
///
/// let base = with_key_values([("k1", "v1")]);
/// let extended = base.with_key_values([("k2", "v2")]);
///
/// assert_eq!(base.fields().len(), 1);
/// let keys: Vec<_> = extended.fields().iter().map(|f| f.key().to_owned()).collect();
/// assert_eq!(keys, ["k1", "k2"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KvLog {
    fields: FieldSet,
}

/// Starts a builder from `(key, value)` pairs.
#[must_use]
pub fn with_key_values<I, K, V>(pairs: I) -> KvLog
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    KvLog::new(pairs)
}

impl KvLog {
    /// Creates a builder from `(key, value)` pairs.
    #[must_use]
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        Self {
            fields: FieldSet::from_pairs(pairs),
        }
    }

    /// Returns a builder holding these fields followed by `pairs`.
    #[must_use]
    pub fn with_key_values<I, K, V>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        self.with_fields(pairs.into_iter().map(Field::from))
    }

    /// Returns a builder holding these fields followed by `fields`.
    #[must_use]
    pub fn with_fields<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Self {
            fields: self.fields.with(fields),
        }
    }

    /// Creates a builder from alternating keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsError::NonStringKey`] when an even position is not a
    /// string and [`FieldsError::UnpairedKey`] when the sequence has odd
    /// length.
    pub fn try_from_flat<I>(values: I) -> Result<Self, FieldsError>
    where
        I: IntoIterator<Item = Value>,
    {
        Self::default().try_with_flat(values)
    }

    /// Extends this builder with alternating keys and values.
    ///
    /// # Errors
    ///
    /// Same as [`try_from_flat`](Self::try_from_flat). The receiver is
    /// unchanged whether or not this succeeds.
    pub fn try_with_flat<I>(&self, values: I) -> Result<Self, FieldsError>
    where
        I: IntoIterator<Item = Value>,
    {
        Ok(self.with_fields(pair_flat(values)?))
    }

    /// Returns the accumulated fields.
    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Emits `args` at `level` with these fields.
    #[track_caller]
    pub fn log(&self, ctx: &Context, level: Level, args: &[Value]) {
        dispatch(ctx, level, &self.fields, args, Location::caller());
    }

    /// Emits at [`Level::TRACE`].
    #[track_caller]
    pub fn trace(&self, ctx: &Context, args: &[Value]) {
        dispatch(ctx, Level::TRACE, &self.fields, args, Location::caller());
    }

    /// Emits at [`Level::DEBUG`].
    #[track_caller]
    pub fn debug(&self, ctx: &Context, args: &[Value]) {
        dispatch(ctx, Level::DEBUG, &self.fields, args, Location::caller());
    }

    /// Emits at [`Level::INFO`].
    #[track_caller]
    pub fn info(&self, ctx: &Context, args: &[Value]) {
        dispatch(ctx, Level::INFO, &self.fields, args, Location::caller());
    }

    /// Emits at [`Level::WARN`].
    #[track_caller]
    pub fn warn(&self, ctx: &Context, args: &[Value]) {
        dispatch(ctx, Level::WARN, &self.fields, args, Location::caller());
    }

    /// Emits at [`Level::ERROR`].
    #[track_caller]
    pub fn error(&self, ctx: &Context, args: &[Value]) {
        dispatch(ctx, Level::ERROR, &self.fields, args, Location::caller());
    }
}

fn pair_flat<I>(values: I) -> Result<Vec<Field>, FieldsError>
where
    I: IntoIterator<Item = Value>,
{
    let mut fields = Vec::new();
    let mut iter = values.into_iter().enumerate();
    while let Some((index, key)) = iter.next() {
        let Value::Str(key) = key else {
            return Err(FieldsError::NonStringKey { index });
        };
        let Some((_, value)) = iter.next() else {
            return Err(FieldsError::UnpairedKey {
                key: key.into_owned(),
            });
        };
        fields.push(Field::new(key, value));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use logging_sink::CaptureSink;
    use std::sync::Arc;

    fn keys(kv: &KvLog) -> Vec<String> {
        kv.fields().iter().map(|f| f.key().to_owned()).collect()
    }

    #[test]
    fn chaining_appends_in_order() {
        let kv = with_key_values([("k1", "v1")]).with_key_values([("k2", "v2")]);
        assert_eq!(keys(&kv), ["k1", "k2"]);
        assert_eq!(
            kv.fields().last_value("k2").and_then(Value::as_str),
            Some("v2")
        );
    }

    #[test]
    fn branches_do_not_share_additions() {
        let base = with_key_values([("k1", "v1")]);
        let left = base.with_key_values([("k2", "v2")]);
        let right = base.with_key_values([("k3", "v3")]);

        assert_eq!(keys(&base), ["k1"]);
        assert_eq!(keys(&left), ["k1", "k2"]);
        assert_eq!(keys(&right), ["k1", "k3"]);
    }

    #[test]
    fn flat_pairs_are_accepted() {
        let kv = KvLog::try_from_flat([
            Value::from("a"),
            Value::from(1),
            Value::from("b"),
            Value::from(true),
        ])
        .expect("well formed");
        assert_eq!(keys(&kv), ["a", "b"]);
    }

    #[test]
    fn odd_flat_length_is_rejected() {
        let base = with_key_values([("k", 0)]);
        let err = base
            .try_with_flat([Value::from("a"), Value::from(1), Value::from("dangling")])
            .expect_err("odd length");
        assert_eq!(
            err,
            FieldsError::UnpairedKey {
                key: "dangling".to_owned()
            }
        );
        assert_eq!(err.to_string(), "key \"dangling\" has no value");
        assert_eq!(keys(&base), ["k"]);
    }

    #[test]
    fn non_string_key_is_rejected() {
        let err = KvLog::try_from_flat([Value::from("a"), Value::from(1), Value::from(2)])
            .expect_err("index 2 is not a key");
        assert_eq!(err, FieldsError::NonStringKey { index: 2 });
    }

    #[test]
    fn empty_flat_input_is_empty() {
        let kv = KvLog::try_from_flat(Vec::<Value>::new()).expect("nothing to pair");
        assert!(kv.fields().is_empty());
    }

    #[test]
    fn emission_orders_context_request_then_builder() {
        let sink = Arc::new(CaptureSink::new());
        let ctx = Context::background()
            .with_logger(Logger::new(sink.clone(), Level::DEBUG))
            .with_values([("ctx", 1)])
            .with_request_id("req-3");

        let kv = with_key_values([("call", 2)]);
        kv.debug(&ctx, &[Value::from("built")]);
        kv.trace(&ctx, &[Value::from("filtered")]);
        kv.log(&ctx, Level::PANIC, &[Value::from("custom")]);

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keys(), ["ctx", "request_id", "call"]);
        assert_eq!(records[1].level, Level::PANIC);
    }

    #[test]
    fn emitting_leaves_the_context_untouched() {
        let sink = Arc::new(CaptureSink::new());
        let ctx = Context::background()
            .with_logger(Logger::new(sink.clone(), Level::INFO))
            .with_values([("ctx", 1)]);

        with_key_values([("once", 1)]).info(&ctx, &[]);
        crate::emit::info(&ctx, &[]);

        let records = sink.records();
        assert_eq!(records[1].keys(), ["ctx"]);
    }
}
