//! crates/logging/src/store.rs
//! Binds fields and loggers to contexts.

use std::borrow::Cow;
use std::sync::Arc;

use logging_sink::{Field, FieldSet, Value};

use crate::context::Context;
use crate::logger::{Logger, default_logger};

/// Logger and accumulated fields bound to a context.
///
/// The type is private to the crate, so no caller can read or shadow the
/// slot through [`Context::with_value`].
#[derive(Clone, Debug)]
pub(crate) struct Binding {
    pub(crate) logger: Arc<Logger>,
    pub(crate) fields: FieldSet,
}

impl Binding {
    fn nearest(ctx: &Context) -> Option<&Self> {
        ctx.value::<Self>()
    }
}

/// Returns a child of `ctx` whose bound fields are the parent's followed by
/// `fields`.
///
/// The child keeps the parent's bound logger. When nothing is bound yet it
/// captures the default logger as it is now, so a later [`setup`] does not
/// reach it.
///
/// [`setup`]: crate::setup
///
/// # Examples
///
/// ```
/// use logging::{Context, Field, bind_fields, resolve};
///
/// let ctx = bind_fields(&Context::background(), [Field::new("user", "u1")]);
/// let ctx = bind_fields(&ctx, [Field::new("shard", 3)]);
///
/// let keys: Vec<_> = resolve(&ctx).iter().map(|f| f.key().to_owned()).collect();
/// assert_eq!(keys, ["user", "shard"]);
/// ```
#[must_use]
pub fn bind_fields<I>(ctx: &Context, fields: I) -> Context
where
    I: IntoIterator<Item = Field>,
{
    let binding = match Binding::nearest(ctx) {
        Some(parent) => Binding {
            logger: Arc::clone(&parent.logger),
            fields: parent.fields.with(fields),
        },
        None => Binding {
            logger: default_logger(),
            fields: fields.into_iter().collect(),
        },
    };
    ctx.with_value(binding)
}

/// Binds `(key, value)` pairs to a child of `ctx`.
#[must_use]
pub fn with_context_values<I, K, V>(ctx: &Context, pairs: I) -> Context
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    bind_fields(ctx, pairs.into_iter().map(Field::from))
}

/// Returns the fields bound nearest to `ctx`, or the empty set.
#[must_use]
pub fn resolve(ctx: &Context) -> FieldSet {
    Binding::nearest(ctx)
        .map(|binding| binding.fields.clone())
        .unwrap_or_default()
}

/// Returns a child of `ctx` that emits through `logger`.
///
/// Fields already bound on `ctx` carry over unchanged.
#[must_use]
pub fn with_logger(ctx: &Context, logger: impl Into<Arc<Logger>>) -> Context {
    ctx.with_value(Binding {
        logger: logger.into(),
        fields: resolve(ctx),
    })
}

/// Returns the logger bound nearest to `ctx`, or the current default.
#[must_use]
pub fn logger_for(ctx: &Context) -> Arc<Logger> {
    Binding::nearest(ctx).map_or_else(default_logger, |binding| {
        Arc::clone(&binding.logger)
    })
}

impl Context {
    /// Method form of [`bind_fields`].
    #[must_use]
    pub fn with_fields<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        bind_fields(self, fields)
    }

    /// Method form of [`with_context_values`].
    #[must_use]
    pub fn with_values<I, K, V>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        with_context_values(self, pairs)
    }

    /// Method form of [`with_logger`].
    #[must_use]
    pub fn with_logger(&self, logger: impl Into<Arc<Logger>>) -> Self {
        with_logger(self, logger)
    }

    /// Method form of [`resolve`].
    #[must_use]
    pub fn fields(&self) -> FieldSet {
        resolve(self)
    }

    /// Method form of [`logger_for`].
    #[must_use]
    pub fn logger(&self) -> Arc<Logger> {
        logger_for(self)
    }
}
