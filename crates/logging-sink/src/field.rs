//! crates/logging-sink/src/field.rs
//! Ordered key/value fields attached to records.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::value::Value;

/// A single key/value pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    /// Creates a field.
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Field
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Immutable, ordered sequence of [`Field`]s.
///
/// Insertion order is preserved and duplicate keys are kept; deduplication,
/// if any, is left to the sink. Cloning is a reference count bump, and
/// combining sets always allocates a new set so existing holders never
/// observe a change.
///
/// # Examples
///
/// ```
/// use logging_sink::FieldSet;
///
/// let base = FieldSet::from_pairs([("user", "u1")]);
/// let extended = base.concat(&FieldSet::from_pairs([("user", "u2")]));
///
/// assert_eq!(base.len(), 1);
/// assert_eq!(extended.len(), 2);
/// assert_eq!(extended.last_value("user").unwrap().as_str(), Some("u2"));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Option<Arc<[Field]>>,
}

impl FieldSet {
    /// Returns the empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: None }
    }

    /// Builds a set from `(key, value)` pairs, preserving their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        pairs.into_iter().map(Field::from).collect()
    }

    /// Returns the fields as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or(&[])
    }

    /// Returns a new set holding `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Returns a new set holding `self` followed by `extra`.
    #[must_use]
    pub fn with<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let extra: Self = extra.into_iter().collect();
        self.concat(&extra)
    }

    /// Returns the value of the last field named `key`.
    #[must_use]
    pub fn last_value(&self, key: &str) -> Option<&Value> {
        self.iter()
            .rev()
            .find(|field| field.key() == key)
            .map(Field::value)
    }
}

impl Deref for FieldSet {
    type Target = [Field];

    fn deref(&self) -> &[Field] {
        self.as_slice()
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let fields: Vec<Field> = iter.into_iter().collect();
        if fields.is_empty() {
            Self::new()
        } else {
            Self {
                fields: Some(fields.into()),
            }
        }
    }
}

impl From<Vec<Field>> for FieldSet {
    fn from(fields: Vec<Field>) -> Self {
        fields.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
