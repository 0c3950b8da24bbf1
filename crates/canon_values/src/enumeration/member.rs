//! Enumeration members.

use std::fmt;
use std::ops::Deref;

use super::Enumeration;
use crate::interned::Interned;

/// A canonical enumeration member.
pub type Variant<E> = Interned<Member<E>>;

/// An enumeration payload together with the id it was defined under.
///
/// The id is stored explicitly at definition time, so it is authoritative
/// even when two members carry equal-looking payloads.
pub struct Member<E> {
    id: Box<str>,
    value: E,
}

impl<E> Member<E> {
    pub(crate) fn new(id: &str, value: E) -> Self {
        Member {
            id: id.into(),
            value,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn value(&self) -> &E {
        &self.value
    }
}

impl<E> Deref for Member<E> {
    type Target = E;

    #[inline]
    fn deref(&self) -> &E {
        &self.value
    }
}

impl<E: Enumeration> fmt::Display for Member<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", E::NAME, self.id)
    }
}

impl<E: fmt::Debug> fmt::Debug for Member<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
