//! Per-type identity map from identity keys to canonical instances.
//!
//! # Thread Safety
//! The key map sits behind a `RwLock`. Lookups take the read lock only.
//! Construction runs with no lock held, so a constructor may re-enter the
//! same repository; the write lock is taken afterwards and the map is
//! checked again, so a racing thread's live instance wins and the
//! duplicate is dropped.
//!
//! # Growth
//! Entries are never removed. A handle whose instance was reclaimed is
//! re-bound in place on the next request for its key, so the key space
//! grows with the number of distinct keys ever requested even though the
//! instances themselves can be reclaimed.

use std::collections::hash_map::Entry;
use std::convert::Infallible;
use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::handle::{InstanceRef, Retention};
use crate::interned::Interned;
use crate::key::IdentityKey;
use crate::value::Value;

/// Canonical instances of one type, keyed by construction arguments.
pub struct InstanceRepository<T> {
    type_name: &'static str,
    retention: Retention,
    slots: RwLock<FxHashMap<IdentityKey, Box<dyn InstanceRef<T>>>>,
}

impl<T: Send + Sync + 'static> InstanceRepository<T> {
    pub fn new(type_name: &'static str, retention: Retention) -> Self {
        InstanceRepository {
            type_name,
            retention,
            slots: RwLock::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Look up the live instance for `values` without creating one.
    pub fn get(&self, values: &[Value]) -> Option<Interned<T>> {
        self.lookup(&IdentityKey::encode(values))
    }

    /// Get the canonical instance for `values`, constructing it on a miss.
    pub fn get_or_create(&self, values: &[Value], construct: impl FnOnce(&[Value]) -> T) -> Interned<T> {
        match self.try_get_or_create(values, |values| Ok::<T, Infallible>(construct(values))) {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }

    /// Get the canonical instance for `values`, constructing it on a miss.
    ///
    /// A construction error propagates unchanged and leaves the repository
    /// untouched.
    pub fn try_get_or_create<E>(
        &self,
        values: &[Value],
        construct: impl FnOnce(&[Value]) -> Result<T, E>,
    ) -> Result<Interned<T>, E> {
        let key = IdentityKey::encode(values);

        // Fast path: live instance already registered
        if let Some(existing) = self.lookup(&key) {
            tracing::trace!(type_name = self.type_name, %key, "canonical instance hit");
            return Ok(existing);
        }

        // Slow path: construct without holding the lock
        let candidate = Interned::new(construct(values)?);

        let mut slots = self.slots.write();
        match slots.entry(key) {
            Entry::Occupied(mut occupied) => {
                // Double-check: another caller may have registered one meanwhile
                if let Some(existing) = occupied.get().get() {
                    tracing::trace!(
                        type_name = self.type_name,
                        key = %occupied.key(),
                        "lost construction race, using registered instance"
                    );
                    return Ok(existing);
                }
                tracing::debug!(
                    type_name = self.type_name,
                    key = %occupied.key(),
                    "re-binding reclaimed canonical instance"
                );
                occupied.get_mut().set(&candidate);
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(
                    type_name = self.type_name,
                    key = %vacant.key(),
                    retention = %self.retention,
                    "registered canonical instance"
                );
                vacant.insert(self.retention.create(&candidate));
            }
        }

        Ok(candidate)
    }

    /// Number of identity keys ever requested (live or reclaimed).
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Number of keys whose instance is currently alive.
    pub fn live_count(&self) -> usize {
        self.slots.read().values().filter(|slot| slot.has()).count()
    }

    fn lookup(&self, key: &IdentityKey) -> Option<Interned<T>> {
        self.slots.read().get(key).and_then(|slot| slot.get())
    }
}

impl<T> fmt::Debug for InstanceRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRepository")
            .field("type_name", &self.type_name)
            .field("retention", &self.retention)
            .field("keys", &self.slots.read().len())
            .finish()
    }
}
