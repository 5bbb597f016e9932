//! crates/logging-sink/src/value.rs
//! Printable values carried by fields and message arguments.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A printable value.
///
/// Message arguments and field values are both expressed as [`Value`] so the
/// formatter and the sinks can handle heterogeneous inputs uniformly. Every
/// variant has a total [`Display`](fmt::Display) rendering, and serialising a
/// value never fails.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Floating point number.
    F64(f64),
    /// Text.
    Str(Cow<'static, str>),
    /// Ordered sequence.
    Seq(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(String, Value)>),
    /// Rendered error chain, outermost error first.
    Error(String),
}

impl Value {
    /// Captures an error and every `source()` beneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Value;
    ///
    /// let err = std::io::Error::other("disk full");
    /// assert_eq!(Value::error(&err).to_string(), "disk full");
    /// ```
    pub fn error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut rendered = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Error(rendered)
    }

    /// Renders any [`Display`](fmt::Display) value into text.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Str(Cow::Owned(value.to_string()))
    }

    /// Renders any [`Debug`](fmt::Debug) value into text.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Str(Cow::Owned(format!("{value:?}")))
    }

    /// Returns the text when the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::I64(value) => write!(f, "{value}"),
            Self::U64(value) => write!(f, "{value}"),
            Self::F64(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::Error(value) => f.write_str(value),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("map[")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::I64(value) => serializer.serialize_i64(*value),
            Self::U64(value) => serializer.serialize_u64(*value),
            // JSON has no NaN or infinities; fall back to the textual form.
            Self::F64(value) if !value.is_finite() => serializer.collect_str(value),
            Self::F64(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::Error(value) => serializer.serialize_str(value),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! value_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::I64(i64::from(value))
            }
        })*
    };
}

macro_rules! value_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::U64(u64::from(value))
            }
        })*
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::I64(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::U64(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::F64(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(Cow::Owned(value.to_string()))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(Cow::Owned(value.clone()))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Into<Value>,
{
    fn from(values: [T; N]) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<&[T]> for Value
where
    T: Clone + Into<Value>,
{
    fn from(values: &[T]) -> Self {
        Self::Seq(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<&(dyn StdError + 'static)> for Value {
    fn from(error: &(dyn StdError + 'static)) -> Self {
        Self::error(error)
    }
}

impl From<&(dyn StdError + Send + Sync + 'static)> for Value {
    fn from(error: &(dyn StdError + Send + Sync + 'static)) -> Self {
        Self::error(error)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Value {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        Self::error(error.as_ref())
    }
}

impl From<io::Error> for Value {
    fn from(error: io::Error) -> Self {
        Self::error(&error)
    }
}

impl From<&io::Error> for Value {
    fn from(error: &io::Error) -> Self {
        Self::error(error)
    }
}

impl From<fmt::Arguments<'_>> for Value {
    fn from(arguments: fmt::Arguments<'_>) -> Self {
        Self::Str(Cow::Owned(arguments.to_string()))
    }
}
