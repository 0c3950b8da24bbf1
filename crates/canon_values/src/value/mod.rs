//! Construction values and opaque identity tokens.
//!
//! `Value` is the closed set of argument shapes an identity key can be
//! derived from. Scalars and composites are compared by content; object and
//! resource references are compared by identity only.

mod args;

pub use args::Args;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ValueError;

static NEXT_OBJECT: AtomicU64 = AtomicU64::new(1);
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identity of an object argument.
///
/// Tokens are process-unique and never reused, so two distinct objects
/// never share a token even after one of them is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef(u64);

impl ObjectRef {
    /// Allocate a fresh identity.
    pub fn fresh() -> Self {
        ObjectRef(NEXT_OBJECT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw token.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of an opaque host handle (an open file, a socket, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleRef(u64);

impl HandleRef {
    /// Allocate a fresh handle identity.
    pub fn fresh() -> Self {
        HandleRef(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw token.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A single construction argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Reference to an object, compared by identity.
    Object(ObjectRef),
    /// Reference to an opaque handle, compared by identity.
    Handle(HandleRef),
    /// Positional list; equivalent to a record keyed `"0"`, `"1"`, ...
    List(Vec<Value>),
    /// Ordered key/value record, compared by content.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Runtime type name used in identity keys and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Handle(_) => "resource",
            Value::List(_) | Value::Record(_) => "array",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to JSON for serialization.
    ///
    /// `type_name` names the owning value object in the error raised for
    /// object/resource references, which have no portable representation.
    pub fn to_json(&self, type_name: &'static str) -> Result<serde_json::Value, ValueError> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .ok_or_else(|| ValueError::Malformed {
                    reason: format!("{type_name} holds non-finite float {x}"),
                })?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Object(_) | Value::Handle(_) => return Err(ValueError::Opaque { type_name }),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json(type_name))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Record(members) => {
                let mut map = serde_json::Map::with_capacity(members.len());
                for (key, member) in members {
                    map.insert(key.clone(), member.to_json(type_name)?);
                }
                serde_json::Value::Object(map)
            }
        })
    }

    /// Convert from JSON.
    ///
    /// Integral numbers that fit in `i64` become `Int`; every other number
    /// becomes `Float`. Objects become records in document order.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.into_iter()
                    .map(|(key, member)| (key, Value::from_json(member)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Object(obj) => write!(f, "object#{}", obj.raw()),
            Value::Handle(handle) => write!(f, "resource#{}", handle.raw()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(members) => {
                f.write_str("{")?;
                for (i, (key, member)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {member}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<HandleRef> for Value {
    fn from(handle: HandleRef) -> Self {
        Value::Handle(handle)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
