//! Positional reader over construction arguments.

use super::Value;
use crate::error::ValueError;

/// Reads construction arguments in order, reporting type and arity errors
/// against the owning type's name.
///
/// ```
/// use canon_values::{Args, Value, ValueError};
///
/// fn point(values: &[Value]) -> Result<(i64, i64), ValueError> {
///     let mut args = Args::new("Point", values);
///     let x = args.int()?;
///     let y = args.int()?;
///     args.finish()?;
///     Ok((x, y))
/// }
///
/// assert_eq!(point(&[Value::Int(1), Value::Int(2)]).ok(), Some((1, 2)));
/// assert!(point(&[Value::Int(1)]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Args<'a> {
    type_name: &'static str,
    values: &'a [Value],
    next: usize,
}

impl<'a> Args<'a> {
    pub fn new(type_name: &'static str, values: &'a [Value]) -> Self {
        Args {
            type_name,
            values,
            next: 0,
        }
    }

    /// Number of arguments not yet read.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.next
    }

    /// Read the next argument as-is.
    pub fn value(&mut self) -> Result<&'a Value, ValueError> {
        let Some(value) = self.values.get(self.next) else {
            return Err(ValueError::Arity {
                type_name: self.type_name,
                expected: self.next + 1,
                given: self.values.len(),
            });
        };
        self.next += 1;
        Ok(value)
    }

    pub fn bool(&mut self) -> Result<bool, ValueError> {
        self.typed("bool", Value::as_bool)
    }

    pub fn int(&mut self) -> Result<i64, ValueError> {
        self.typed("int", Value::as_int)
    }

    pub fn float(&mut self) -> Result<f64, ValueError> {
        self.typed("float", Value::as_float)
    }

    pub fn str(&mut self) -> Result<&'a str, ValueError> {
        self.typed("string", Value::as_str)
    }

    /// Fail if any argument was left unread.
    pub fn finish(self) -> Result<(), ValueError> {
        if self.next == self.values.len() {
            Ok(())
        } else {
            Err(ValueError::Arity {
                type_name: self.type_name,
                expected: self.next,
                given: self.values.len(),
            })
        }
    }

    fn typed<T>(
        &mut self,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, ValueError> {
        let index = self.next;
        let value = self.value()?;
        extract(value).ok_or(ValueError::Argument {
            type_name: self.type_name,
            index,
            expected,
            found: value.type_name(),
        })
    }
}
