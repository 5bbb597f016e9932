//! crates/logging/src/context.rs
//! Immutable execution context with parent-delegated lookup.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Immutable carrier of request-scoped values.
///
/// A context is a persistent linked list: every derivation allocates a new
/// node holding one slot and a pointer to its parent, and lookups walk from
/// the newest node towards the root. Deriving never mutates the parent, so a
/// context can be shared across threads and branched freely. Cloning is a
/// reference count bump.
///
/// Slots are keyed by the stored value's type. The logging slots use private
/// types, so they cannot be read or shadowed through
/// [`with_value`](Self::with_value).
///
/// # Examples
///
/// ```
/// use logging::Context;
///
/// #[derive(Debug, PartialEq)]
/// struct Tenant(&'static str);
///
/// let root = Context::background();
/// let child = root.with_value(Tenant("acme"));
///
/// assert_eq!(child.value::<Tenant>(), Some(&Tenant("acme")));
/// assert_eq!(root.value::<Tenant>(), None);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

struct Node {
    parent: Option<Arc<Node>>,
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
}

impl Context {
    /// Returns the empty root context.
    ///
    /// The root carries nothing, so loggers resolve it to no fields, no request
    /// id and the process default logger.
    #[must_use]
    pub const fn background() -> Self {
        Self { head: None }
    }

    /// Returns a child context whose slot for `T` holds `value`.
    ///
    /// A slot already bound for `T` on an ancestor is shadowed, not replaced.
    #[must_use]
    pub fn with_value<T>(&self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key: TypeId::of::<T>(),
                value: Arc::new(value),
            })),
        }
    }

    /// Returns the nearest value bound for `T`.
    #[must_use]
    pub fn value<T>(&self) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        let key = TypeId::of::<T>();
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.key == key {
                return node.value.downcast_ref::<T>();
            }
            cursor = node.parent.as_deref();
        }
        None
    }

    /// Reports whether this is the root context.
    #[must_use]
    pub const fn is_background(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of derivations between this context and the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            depth += 1;
            cursor = node.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

// Unlink iteratively so dropping a long chain cannot overflow the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut owned) => next = owned.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.is_background());
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.value::<Marker>(), None);
        assert!(Context::default().is_background());
    }

    #[test]
    fn child_shadows_parent_without_mutating_it() {
        let parent = Context::background().with_value(Marker(1));
        let child = parent.with_value(Marker(2));

        assert_eq!(parent.value::<Marker>(), Some(&Marker(1)));
        assert_eq!(child.value::<Marker>(), Some(&Marker(2)));
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn lookup_delegates_to_ancestors() {
        let ctx = Context::background()
            .with_value(Marker(7))
            .with_value(String::from("other"));
        assert_eq!(ctx.value::<Marker>(), Some(&Marker(7)));
        assert_eq!(ctx.value::<String>().map(String::as_str), Some("other"));
        assert_eq!(ctx.value::<u64>(), None);
    }

    #[test]
    fn siblings_are_independent() {
        let parent = Context::background().with_value(Marker(0));
        let left = parent.with_value(Marker(1));
        let right = parent.with_value(Marker(2));
        assert_eq!(left.value::<Marker>(), Some(&Marker(1)));
        assert_eq!(right.value::<Marker>(), Some(&Marker(2)));
        assert_eq!(parent.value::<Marker>(), Some(&Marker(0)));
    }

    #[test]
    fn concurrent_derivation_from_shared_parent() {
        let parent = Context::background().with_value(Marker(0));
        let handles: Vec<_> = (1..=8)
            .map(|n| {
                let parent = parent.clone();
                thread::spawn(move || {
                    let child = parent.with_value(Marker(n));
                    child.value::<Marker>().map(|m| m.0)
                })
            })
            .collect();

        for (n, handle) in (1..=8).zip(handles) {
            assert_eq!(handle.join().expect("thread completes"), Some(n));
        }
        assert_eq!(parent.value::<Marker>(), Some(&Marker(0)));
    }

    #[test]
    fn dropping_a_deep_chain_does_not_overflow() {
        let mut ctx = Context::background();
        for n in 0..200_000 {
            ctx = ctx.with_value(Marker(n));
        }
        assert_eq!(ctx.depth(), 200_000);
        drop(ctx);
    }
}
