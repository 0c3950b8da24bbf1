//! Value objects: types whose instances are canonical per argument list.
//!
//! A value object describes itself as an ordered list of named fields.
//! [`ValueObject::of_values`] checks the argument count, then looks the
//! arguments up in the type's repository and only constructs on a miss, so
//! two calls with key-equal arguments return the same [`Interned`] instance.

use std::fmt;

use crate::canon::Canon;
use crate::error::ValueError;
use crate::interned::Interned;
use crate::value::Value;

/// A type interned by its construction arguments.
///
/// ```
/// use canon_values::{Args, Canon, Value, ValueError, ValueObject};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl ValueObject for Point {
///     const NAME: &'static str = "Point";
///     const FIELDS: &'static [&'static str] = &["x", "y"];
///
///     fn from_values(values: &[Value]) -> Result<Self, ValueError> {
///         let mut args = Args::new(Self::NAME, values);
///         let point = Point { x: args.int()?, y: args.int()? };
///         args.finish()?;
///         Ok(point)
///     }
///
///     fn to_values(&self) -> Vec<Value> {
///         vec![self.x.into(), self.y.into()]
///     }
/// }
///
/// let cx = Canon::new();
/// let a = Point::of_values(&cx, &[1.into(), 2.into()])?;
/// let b = Point::of_values(&cx, &[1.into(), 2.into()])?;
/// assert!(Point::equals(&a, &b));
/// assert_eq!(a.y, 2);
/// # Ok::<(), ValueError>(())
/// ```
pub trait ValueObject: Sized + Send + Sync + 'static {
    const NAME: &'static str;

    /// Field names, in construction-argument order.
    const FIELDS: &'static [&'static str];

    /// Build a fresh instance. Called only on a repository miss.
    fn from_values(values: &[Value]) -> Result<Self, ValueError>;

    /// The construction arguments that rebuild this instance.
    fn to_values(&self) -> Vec<Value>;

    /// Get the canonical instance for `values`.
    fn of_values(cx: &Canon, values: &[Value]) -> Result<Interned<Self>, ValueError> {
        if values.len() != Self::FIELDS.len() {
            return Err(ValueError::Arity {
                type_name: Self::NAME,
                expected: Self::FIELDS.len(),
                given: values.len(),
            });
        }
        cx.repository::<Self>()
            .try_get_or_create(values, Self::from_values)
    }

    /// Field names paired with their current values.
    fn components(&self) -> Vec<(&'static str, Value)> {
        Self::FIELDS.iter().copied().zip(self.to_values()).collect()
    }

    /// Canonical instances are equal iff they are the same instance.
    fn equals(this: &Interned<Self>, other: &Interned<Self>) -> bool {
        Interned::ptr_eq(this, other)
    }
}

/// Render `value` as `Name(field=value, ...)`.
///
/// Intended for `Display` impls of value objects.
pub fn display_value_object<T: ValueObject>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", T::NAME)?;
    for (i, (field, component)) in value.components().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{field}={component}")?;
    }
    f.write_str(")")
}
