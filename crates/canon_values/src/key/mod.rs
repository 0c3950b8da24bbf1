//! Identity key derivation.
//!
//! Converts an ordered list of construction values into a deterministic
//! string. Two value lists are the same identity iff they encode to equal
//! keys.
//!
//! # Encoding
//!
//! | input                    | key                                   |
//! |--------------------------|---------------------------------------|
//! | empty list               | `()`                                  |
//! | null                     | `null`                                |
//! | scalar                   | `scalar<{type}>:{literal}`            |
//! | object reference         | `object:#{token}`                     |
//! | handle reference         | `resource:#{token}`                   |
//! | list / record            | `array:{member}={key}&...`            |
//! | several values           | per-value keys joined with `\|`       |
//!
//! The reserved characters `%`, `|`, `&` and `=` are percent-escaped inside
//! string literals, member names and nested member keys, so no delimiter
//! can be forged by a value's content.

use std::fmt;
use std::fmt::Write as _;

use crate::value::Value;

/// Key for a value list with no elements.
const EMPTY_KEY: &str = "()";

/// Separator between the keys of a multi-element value list.
const LIST_SEPARATOR: char = '|';

/// Separator between record members.
const MEMBER_SEPARATOR: char = '&';

/// Separator between a member name and its key.
const MEMBER_ASSIGN: char = '=';

/// Deterministic identity key for a construction argument list.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey(Box<str>);

impl IdentityKey {
    /// Encode an ordered list of values.
    ///
    /// Pure function of its input: no hidden state takes part in the
    /// encoding, except the identity tokens carried by object and handle
    /// references.
    pub fn encode(values: &[Value]) -> Self {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = encode_list(values, &mut out);
        IdentityKey(out.into_boxed_str())
    }

    /// Encode a single value.
    pub fn of_value(value: &Value) -> Self {
        Self::encode(std::slice::from_ref(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({:?})", self.0)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn encode_list(values: &[Value], out: &mut String) -> fmt::Result {
    match values {
        [] => out.push_str(EMPTY_KEY),
        [single] => encode_value(single, out)?,
        many => {
            for (i, value) in many.iter().enumerate() {
                if i > 0 {
                    out.push(LIST_SEPARATOR);
                }
                encode_value(value, out)?;
            }
        }
    }
    Ok(())
}

fn encode_value(value: &Value, out: &mut String) -> fmt::Result {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => write!(out, "scalar<bool>:{b}")?,
        Value::Int(n) => write!(out, "scalar<int>:{n}")?,
        // Debug formatting is the shortest round-trip form and always keeps
        // a fractional part or exponent, so `1.0` never reads as `1`.
        Value::Float(x) => write!(out, "scalar<float>:{x:?}")?,
        Value::Str(s) => {
            out.push_str("scalar<string>:");
            escape_into(s, out);
        }
        Value::Object(obj) => write!(out, "object:#{}", obj.raw())?,
        Value::Handle(handle) => write!(out, "resource:#{}", handle.raw())?,
        Value::List(items) => {
            out.push_str("array:");
            for (i, item) in items.iter().enumerate() {
                encode_member(i, &i.to_string(), item, out)?;
            }
        }
        Value::Record(members) => {
            out.push_str("array:");
            for (i, (name, member)) in members.iter().enumerate() {
                encode_member(i, name, member, out)?;
            }
        }
    }
    Ok(())
}

fn encode_member(position: usize, name: &str, member: &Value, out: &mut String) -> fmt::Result {
    if position > 0 {
        out.push(MEMBER_SEPARATOR);
    }
    escape_into(name, out);
    out.push(MEMBER_ASSIGN);
    let mut nested = String::new();
    encode_value(member, &mut nested)?;
    escape_into(&nested, out);
    Ok(())
}

/// Percent-escape the reserved delimiter characters.
fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '|' => out.push_str("%7C"),
            _ => out.push(c),
        }
    }
}
