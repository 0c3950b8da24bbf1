//! Per-enumeration member registry with one-time discovery.
//!
//! # Discovery
//! The first lookup or listing runs [`Enumeration::discover`] per context.
//! The registry tracks which threads are currently running a pass, but holds
//! no lock while a pass runs:
//!
//! - A factory that calls back into its own enumeration on the same thread
//!   sees its own pass in progress and returns the members defined so far.
//! - A thread that is not inside any discovery pass waits for the running
//!   pass to finish.
//! - A thread that is itself discovering another enumeration does not wait.
//!   It runs its own pass instead; factories are idempotent through
//!   get-or-create. Mutually dependent enumerations discovered from
//!   different threads therefore cannot deadlock.
//!
//! A pass that fails or panics leaves the registry uninitialized, so the
//! next access retries.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

use indexmap::IndexSet;
use parking_lot::{Condvar, Mutex, RwLock};
use rustc_hash::{FxBuildHasher, FxHashSet};

use super::{Enumeration, Member, Variant};
use crate::canon::Canon;
use crate::error::EnumError;
use crate::handle::Retention;
use crate::repository::InstanceRepository;
use crate::value::Value;

thread_local! {
    /// Discovery passes running on this thread, across all registries.
    static PASS_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Members of enumeration `E` within one [`Canon`] context.
///
/// Members are retained strongly for the lifetime of the context.
pub struct EnumRegistry<E> {
    members: InstanceRepository<Member<E>>,
    /// Member ids in listing order.
    order: RwLock<IndexSet<Box<str>, FxBuildHasher>>,
    /// Threads currently running a discovery pass.
    passes: Mutex<FxHashSet<ThreadId>>,
    finished: Condvar,
    initialized: AtomicBool,
}

impl<E: Enumeration> EnumRegistry<E> {
    pub fn new() -> Self {
        EnumRegistry {
            members: InstanceRepository::new(E::NAME, Retention::Strong),
            order: RwLock::new(IndexSet::with_hasher(FxBuildHasher)),
            passes: Mutex::new(FxHashSet::default()),
            finished: Condvar::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Get or create the member `id`.
    ///
    /// Does not trigger discovery. `init` runs only when the member does not
    /// exist yet.
    pub fn define(&self, id: &str, init: impl FnOnce() -> E) -> Variant<E> {
        let variant = self
            .members
            .get_or_create(&[Value::from(id)], |_| Member::new(id, init()));
        self.record(id);
        variant
    }

    /// Fallible [`define`](Self::define). A failed `init` defines nothing.
    pub fn try_define<Err>(&self, id: &str, init: impl FnOnce() -> Result<E, Err>) -> Result<Variant<E>, Err> {
        let variant = self
            .members
            .try_get_or_create(&[Value::from(id)], |_| Ok(Member::new(id, init()?)))?;
        self.record(id);
        Ok(variant)
    }

    /// Look up an already-defined member without triggering discovery.
    pub fn lookup(&self, id: &str) -> Option<Variant<E>> {
        self.members.get(&[Value::from(id)])
    }

    /// Look up a member by id, running discovery first if needed.
    pub fn instance(&self, cx: &Canon, id: &str) -> Result<Option<Variant<E>>, EnumError> {
        self.ensure_initialized(cx)?;
        Ok(self.lookup(id))
    }

    /// Like [`instance`](Self::instance), but a missing id is an error.
    pub fn try_instance(&self, cx: &Canon, id: &str) -> Result<Variant<E>, EnumError> {
        self.instance(cx, id)?.ok_or_else(|| EnumError::NotFound {
            enum_name: E::NAME,
            id: id.to_owned(),
        })
    }

    /// All members in listing order, running discovery first if needed.
    ///
    /// Members produced by the factory manifest come first, in declaration
    /// order, followed by any other members in the order they were defined.
    pub fn instances(&self, cx: &Canon) -> Result<Vec<Variant<E>>, EnumError> {
        self.ensure_initialized(cx)?;
        Ok(self.defined())
    }

    /// Members defined so far, without triggering discovery.
    pub fn defined(&self) -> Vec<Variant<E>> {
        let ids: Vec<Box<str>> = self.order.read().iter().cloned().collect();
        ids.iter().filter_map(|id| self.lookup(id)).collect()
    }

    /// Number of members defined so far.
    pub fn len(&self) -> usize {
        self.order.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.read().is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Run discovery unless it already completed.
    ///
    /// Re-entrant calls from the same thread during discovery return
    /// immediately.
    pub fn ensure_initialized(&self, cx: &Canon) -> Result<(), EnumError> {
        if self.is_initialized() {
            return Ok(());
        }

        let me = thread::current().id();
        let mut passes = self.passes.lock();
        loop {
            if self.is_initialized() {
                return Ok(());
            }
            if passes.contains(&me) {
                tracing::debug!(enum_name = E::NAME, "re-entrant access during discovery");
                return Ok(());
            }
            if passes.is_empty() {
                break;
            }
            if PASS_DEPTH.get() > 0 {
                tracing::debug!(enum_name = E::NAME, "discovery in progress elsewhere, running a nested pass");
                break;
            }
            self.finished.wait(&mut passes);
        }
        passes.insert(me);
        drop(passes);

        let _pass = DiscoveryPass::begin(self, me);
        match self.discover(cx) {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(enum_name = E::NAME, %err, "discovery failed");
                Err(err)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(enum_name = E::NAME))]
    fn discover(&self, cx: &Canon) -> Result<(), EnumError> {
        E::discover(cx)?;
        tracing::debug!(members = self.len(), "discovery complete");
        Ok(())
    }

    fn record(&self, id: &str) {
        if self.order.read().contains(id) {
            return;
        }
        self.order.write().insert(id.into());
    }

    /// Move the ids of `produced` to the front, in the given order.
    pub(crate) fn rank(&self, produced: &[Variant<E>]) {
        let mut order = self.order.write();
        let mut ranked = IndexSet::with_capacity_and_hasher(order.len(), FxBuildHasher);
        for variant in produced {
            ranked.insert(Box::<str>::from(variant.id()));
        }
        ranked.extend(order.drain(..));
        *order = ranked;
    }
}

impl<E: Enumeration> Default for EnumRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Enumeration> fmt::Debug for EnumRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumRegistry")
            .field("enum_name", &self.members.type_name())
            .field("members", &self.order.read().len())
            .field("initialized", &self.initialized.load(Ordering::Relaxed))
            .finish()
    }
}

/// Marks one thread's pass as running; ending it, including on unwind,
/// wakes the threads waiting for it.
struct DiscoveryPass<'a, E> {
    registry: &'a EnumRegistry<E>,
    thread: ThreadId,
}

impl<'a, E> DiscoveryPass<'a, E> {
    fn begin(registry: &'a EnumRegistry<E>, thread: ThreadId) -> Self {
        PASS_DEPTH.set(PASS_DEPTH.get() + 1);
        DiscoveryPass { registry, thread }
    }
}

impl<E> Drop for DiscoveryPass<'_, E> {
    fn drop(&mut self) {
        PASS_DEPTH.set(PASS_DEPTH.get() - 1);
        self.registry.passes.lock().remove(&self.thread);
        self.registry.finished.notify_all();
    }
}
