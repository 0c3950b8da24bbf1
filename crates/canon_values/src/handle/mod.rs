//! Strong and weak retention of canonical instances.
//!
//! A repository keeps one handle per identity key. With strong retention
//! the instance lives as long as the repository; with weak retention it
//! lives as long as some caller holds an [`Interned`] to it, after which the
//! handle reports `has() == false` and the repository transparently creates
//! a fresh canonical instance on the next request.

use std::fmt;
use std::str::FromStr;
use std::sync::Weak;

use crate::error::ParseRetentionError;
use crate::interned::{Interned, Shared};

/// A slot holding at most one canonical instance.
pub trait InstanceRef<T>: Send + Sync {
    /// Get the instance if it is still alive.
    fn get(&self) -> Option<Interned<T>>;

    /// Bind the slot to an instance, replacing any previous binding.
    fn set(&mut self, instance: &Interned<T>);

    /// Check whether the slot currently holds a live instance.
    fn has(&self) -> bool;
}

/// Always retains its instance once set.
pub struct StrongRef<T> {
    instance: Option<Interned<T>>,
}

impl<T> StrongRef<T> {
    pub fn new() -> Self {
        StrongRef { instance: None }
    }
}

impl<T> Default for StrongRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> InstanceRef<T> for StrongRef<T> {
    fn get(&self) -> Option<Interned<T>> {
        self.instance.clone()
    }

    fn set(&mut self, instance: &Interned<T>) {
        self.instance = Some(instance.clone());
    }

    fn has(&self) -> bool {
        self.instance.is_some()
    }
}

/// Retains its instance only while some other strong holder exists.
pub struct WeakRef<T> {
    instance: Option<Weak<Shared<T>>>,
}

impl<T> WeakRef<T> {
    pub fn new() -> Self {
        WeakRef { instance: None }
    }
}

impl<T> Default for WeakRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> InstanceRef<T> for WeakRef<T> {
    fn get(&self) -> Option<Interned<T>> {
        self.instance.as_ref().and_then(Interned::upgrade)
    }

    fn set(&mut self, instance: &Interned<T>) {
        self.instance = Some(Interned::downgrade(instance));
    }

    fn has(&self) -> bool {
        self.instance
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }
}

/// Retention strategy for repository handles.
///
/// Weak retention is the default since Rust has native weak references;
/// strong retention trades unbounded memory for identity stability across
/// the whole lifetime of the owning [`Canon`](crate::Canon).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Retention {
    #[default]
    Weak,
    Strong,
}

impl Retention {
    /// Create a handle bound to `instance`.
    pub fn create<T: Send + Sync + 'static>(self, instance: &Interned<T>) -> Box<dyn InstanceRef<T>> {
        let mut handle: Box<dyn InstanceRef<T>> = match self {
            Retention::Weak => Box::new(WeakRef::new()),
            Retention::Strong => Box::new(StrongRef::new()),
        };
        handle.set(instance);
        handle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Retention::Weak => "weak",
            Retention::Strong => "strong",
        }
    }
}

impl FromStr for Retention {
    type Err = ParseRetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weak" => Ok(Retention::Weak),
            "strong" => Ok(Retention::Strong),
            _ => Err(ParseRetentionError(s.to_owned())),
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
