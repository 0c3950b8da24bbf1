//! Value objects wrapping exactly one value.

use std::fmt;
use std::marker::PhantomData;

use crate::canon::Canon;
use crate::error::ValueError;
use crate::interned::Interned;
use crate::value::{Args, Value};
use crate::value_object::ValueObject;

/// Validation and normalization rules for a [`Single`] value object.
pub trait ValuePolicy: Send + Sync + 'static {
    const NAME: &'static str;

    /// Reject values that do not belong to this type.
    fn validate(_value: &Value) -> Result<(), ValueError> {
        Ok(())
    }

    /// Map a valid value to its canonical form. Must be idempotent.
    fn normalize(value: Value) -> Value {
        value
    }
}

/// A value object holding one validated, normalized value.
///
/// Instances are interned by the normalized value, so raw inputs that
/// normalize equally share one instance.
///
/// ```
/// use canon_values::{Canon, Single, Value, ValuePolicy};
///
/// struct Lowercase;
///
/// impl ValuePolicy for Lowercase {
///     const NAME: &'static str = "Lowercase";
///
///     fn normalize(value: Value) -> Value {
///         match value {
///             Value::Str(s) => Value::Str(s.to_lowercase()),
///             other => other,
///         }
///     }
/// }
///
/// let cx = Canon::new();
/// let a = Single::<Lowercase>::of(&cx, "Hello")?;
/// let b = Single::<Lowercase>::of(&cx, "HELLO")?;
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "hello");
/// # Ok::<(), canon_values::ValueError>(())
/// ```
pub struct Single<P> {
    value: Value,
    policy: PhantomData<fn() -> P>,
}

impl<P: ValuePolicy> Single<P> {
    /// Get the canonical instance for `raw`.
    pub fn of(cx: &Canon, raw: impl Into<Value>) -> Result<Interned<Self>, ValueError> {
        Self::of_values(cx, &[raw.into()])
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn new(value: Value) -> Self {
        Single {
            value,
            policy: PhantomData,
        }
    }

    /// Validate the single argument and bring it to canonical form.
    fn canonical(values: &[Value]) -> Result<Value, ValueError> {
        let mut args = Args::new(P::NAME, values);
        let raw = args.value()?;
        args.finish()?;
        P::validate(raw)?;
        Ok(P::normalize(raw.clone()))
    }
}

impl<P: ValuePolicy> ValueObject for Single<P> {
    const NAME: &'static str = P::NAME;
    const FIELDS: &'static [&'static str] = &["value"];

    fn from_values(values: &[Value]) -> Result<Self, ValueError> {
        Self::canonical(values).map(Self::new)
    }

    /// Keyed by the normalized value, whichever entry point is used.
    fn of_values(cx: &Canon, values: &[Value]) -> Result<Interned<Self>, ValueError> {
        if values.len() != Self::FIELDS.len() {
            return Err(ValueError::Arity {
                type_name: Self::NAME,
                expected: Self::FIELDS.len(),
                given: values.len(),
            });
        }
        let value = Self::canonical(values)?;
        let instance = cx
            .repository::<Self>()
            .get_or_create(std::slice::from_ref(&value), |_| Self::new(value.clone()));
        Ok(instance)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![self.value.clone()]
    }
}

impl<P> fmt::Display for Single<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Str(s) => f.write_str(s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl<P: ValuePolicy> fmt::Debug for Single<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(P::NAME).field(&self.value).finish()
    }
}
