//! String serialization of value objects.
//!
//! The format is the type name, a colon, and the construction arguments as a
//! JSON array: `Point:[1,2]`. Deserializing goes back through the type's
//! repository, so a round trip yields the canonical instance.

use crate::canon::Canon;
use crate::error::ValueError;
use crate::interned::Interned;
use crate::value::Value;
use crate::value_object::ValueObject;

/// Serialization for every [`ValueObject`].
///
/// Value objects holding object or resource references cannot be
/// serialized; their identity does not survive the process.
pub trait Serializable: ValueObject {
    fn serialize(&self) -> Result<String, ValueError>;

    fn from_serialized(cx: &Canon, serialized: &str) -> Result<Interned<Self>, ValueError>;
}

impl<T: ValueObject> Serializable for T {
    fn serialize(&self) -> Result<String, ValueError> {
        let values = self
            .to_values()
            .iter()
            .map(|value| value.to_json(T::NAME))
            .collect::<Result<Vec<_>, _>>()?;
        let payload = serde_json::to_string(&values)?;
        Ok(format!("{}:{payload}", T::NAME))
    }

    fn from_serialized(cx: &Canon, serialized: &str) -> Result<Interned<Self>, ValueError> {
        let Some(payload) = serialized
            .strip_prefix(T::NAME)
            .and_then(|rest| rest.strip_prefix(':'))
        else {
            return Err(ValueError::SerializedType {
                expected: T::NAME,
                found: serialized_type(serialized).to_owned(),
            });
        };

        let serde_json::Value::Array(items) = serde_json::from_str::<serde_json::Value>(payload)? else {
            return Err(ValueError::Malformed {
                reason: format!("{} arguments must be a JSON array", T::NAME),
            });
        };
        let values: Vec<Value> = items.into_iter().map(Value::from_json).collect();
        T::of_values(cx, &values)
    }
}

/// The type name a serialized string claims, for error reporting.
fn serialized_type(serialized: &str) -> &str {
    // Type names may themselves contain `::`, so split where the payload starts
    match serialized.find(":[") {
        Some(end) => &serialized[..end],
        None => serialized.split_once(':').map_or(serialized, |(name, _)| name),
    }
}
