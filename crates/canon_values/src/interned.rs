//! Shared handle to a canonical instance.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, Weak};

use crate::value::{ObjectRef, Value};

/// Storage for a canonical instance together with its identity token.
pub(crate) struct Shared<T> {
    identity: ObjectRef,
    value: T,
}

/// A canonical instance.
///
/// Cloning is cheap (one reference count increment). Equality and hashing
/// are by identity: two `Interned` values are equal iff they point at the
/// same instance. Repositories guarantee that key-equal construction
/// arguments yield the same instance, so identity equality stands in for
/// value equality.
pub struct Interned<T>(Arc<Shared<T>>);

impl<T> Interned<T> {
    pub(crate) fn new(value: T) -> Self {
        Interned(Arc::new(Shared {
            identity: ObjectRef::fresh(),
            value,
        }))
    }

    /// Process-unique identity of this instance.
    ///
    /// Passing a canonical instance as a construction argument of another
    /// value object keys it by this identity.
    #[inline]
    pub fn identity(&self) -> ObjectRef {
        self.0.identity
    }

    /// Check whether two handles point at the same instance.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    /// Number of strong handles currently alive (repository included).
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }

    pub(crate) fn downgrade(this: &Self) -> Weak<Shared<T>> {
        Arc::downgrade(&this.0)
    }

    pub(crate) fn upgrade(weak: &Weak<Shared<T>>) -> Option<Self> {
        weak.upgrade().map(Interned)
    }
}

impl<T> Clone for Interned<T> {
    fn clone(&self) -> Self {
        Interned(Arc::clone(&self.0))
    }
}

impl<T> Deref for Interned<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0.value
    }
}

impl<T> AsRef<T> for Interned<T> {
    fn as_ref(&self) -> &T {
        &self.0.value
    }
}

impl<T> PartialEq for Interned<T> {
    fn eq(&self, other: &Self) -> bool {
        Interned::ptr_eq(self, other)
    }
}

impl<T> Eq for Interned<T> {}

impl<T> Hash for Interned<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.identity.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Interned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ", self.0.identity.raw())?;
        self.0.value.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Interned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.value.fmt(f)
    }
}

impl<T> From<&Interned<T>> for Value {
    fn from(instance: &Interned<T>) -> Self {
        Value::Object(instance.identity())
    }
}

impl<T> From<Interned<T>> for Value {
    fn from(instance: Interned<T>) -> Self {
        Value::Object(instance.identity())
    }
}
