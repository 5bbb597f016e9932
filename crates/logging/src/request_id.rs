//! crates/logging/src/request_id.rs
//! Request identifier slot.

use std::sync::Arc;

use logging_sink::Field;

use crate::context::Context;

/// Field name under which a bound request id is emitted.
pub const REQUEST_ID_FIELD: &str = "request_id";

#[derive(Debug)]
struct RequestId(Arc<str>);

/// Returns a child of `ctx` carrying `id` as its request identifier.
///
/// An empty id is stored like any other, so it shadows an ancestor's id, but
/// it is not emitted.
///
/// # Examples
///
/// ```
/// use logging::{Context, request_id, with_request_id};
///
/// let ctx = with_request_id(&Context::background(), "req-42");
/// assert_eq!(request_id(&ctx), "req-42");
/// assert_eq!(request_id(&Context::background()), "");
/// ```
#[must_use]
pub fn with_request_id(ctx: &Context, id: impl Into<Arc<str>>) -> Context {
    ctx.with_value(RequestId(id.into()))
}

/// Returns the request identifier bound to `ctx`, or the empty string.
#[must_use]
pub fn request_id(ctx: &Context) -> String {
    ctx.request_id().to_owned()
}

/// Returns the `request_id` field to emit for `ctx`, if any.
pub(crate) fn request_id_field(ctx: &Context) -> Option<Field> {
    let id = ctx.request_id();
    (!id.is_empty()).then(|| Field::new(REQUEST_ID_FIELD, id.to_owned()))
}

impl Context {
    /// Method form of [`with_request_id`].
    #[must_use]
    pub fn with_request_id(&self, id: impl Into<Arc<str>>) -> Self {
        with_request_id(self, id)
    }

    /// Returns the bound request identifier without copying it.
    #[must_use]
    pub fn request_id(&self) -> &str {
        self.value::<RequestId>().map_or("", |id| &*id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_id_is_empty() {
        assert_eq!(request_id(&Context::background()), "");
        assert!(request_id_field(&Context::background()).is_none());
    }

    #[test]
    fn nearest_id_wins() {
        let outer = Context::background().with_request_id("outer");
        let inner = outer.with_request_id(String::from("inner"));
        assert_eq!(outer.request_id(), "outer");
        assert_eq!(inner.request_id(), "inner");
    }

    #[test]
    fn empty_id_shadows_but_is_not_emitted() {
        let ctx = Context::background()
            .with_request_id("req-1")
            .with_request_id("");
        assert_eq!(request_id(&ctx), "");
        assert!(request_id_field(&ctx).is_none());
    }

    #[test]
    fn field_uses_the_fixed_name() {
        let ctx = Context::background().with_request_id("req-42");
        let field = request_id_field(&ctx).expect("id is bound");
        assert_eq!(field.key(), REQUEST_ID_FIELD);
        assert_eq!(field.value().as_str(), Some("req-42"));
    }

    #[test]
    fn request_id_does_not_touch_fields() {
        let ctx = Context::background()
            .with_values([("user", "u1")])
            .with_request_id("req-9");
        assert_eq!(ctx.fields().len(), 1);
    }
}
