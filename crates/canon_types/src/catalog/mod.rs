//! Registry of host type descriptors.
//!
//! The catalog answers the questions the descriptor layer cannot answer by
//! itself: which type names exist, what kind each one is, and which types
//! each one directly extends or implements.
//!
//! # Design
//!
//! - `BTreeMap` keyed by name for deterministic iteration
//! - Supertype edges are stored by name; unknown supertype names are kept
//!   and simply never match a registered type
//!
//! Kinds are members of the [`Canon`] they were obtained from. Use a catalog
//! with that same context.

use std::any::type_name;
use std::collections::{BTreeMap, VecDeque};

use canon_values::{Canon, Variant};
use rustc_hash::FxHashSet;

use crate::kind::Kind;

#[derive(Clone, Debug)]
struct TypeEntry {
    kind: Variant<Kind>,
    supertypes: Vec<Box<str>>,
}

/// Known host types with their kinds and direct supertypes.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: BTreeMap<Box<str>, TypeEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as a type of `kind`, replacing any earlier entry.
    pub fn register(&mut self, name: &str, kind: Variant<Kind>, supertypes: &[&str]) -> &mut Self {
        let entry = TypeEntry {
            kind,
            supertypes: supertypes.iter().map(|&sup| Box::from(sup)).collect(),
        };
        if let Some(previous) = self.types.insert(name.into(), entry) {
            tracing::debug!(name, previous = previous.kind.id(), "replaced type descriptor");
        }
        self
    }

    pub fn register_class(&mut self, cx: &Canon, name: &str, supertypes: &[&str]) -> &mut Self {
        self.register(name, Kind::CLASS(cx), supertypes)
    }

    pub fn register_interface(&mut self, cx: &Canon, name: &str, supertypes: &[&str]) -> &mut Self {
        self.register(name, Kind::INTERFACE(cx), supertypes)
    }

    pub fn register_trait(&mut self, cx: &Canon, name: &str, supertypes: &[&str]) -> &mut Self {
        self.register(name, Kind::TRAIT(cx), supertypes)
    }

    /// Register the Rust type `T` as a class named by [`type_name`].
    pub fn register_rust<T: ?Sized + 'static>(&mut self, cx: &Canon, supertypes: &[&str]) -> &mut Self {
        self.register_class(cx, type_name::<T>(), supertypes)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<&Variant<Kind>> {
        self.types.get(name).map(|entry| &entry.kind)
    }

    /// Direct supertypes of `name`, in registration order.
    pub fn supertypes(&self, name: &str) -> impl Iterator<Item = &str> {
        self.types
            .get(name)
            .into_iter()
            .flat_map(|entry| entry.supertypes.iter().map(AsRef::as_ref))
    }

    /// Registered type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(AsRef::as_ref)
    }

    /// Check whether `sub` is `sup` or reaches it through supertype edges.
    ///
    /// Both names must be registered.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if !self.contains(sub) || !self.contains(sup) {
            return false;
        }

        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([sub]);
        while let Some(current) = queue.pop_front() {
            if current == sup {
                return true;
            }
            if seen.insert(current) {
                queue.extend(self.supertypes(current));
            }
        }
        false
    }

    /// Check whether a value of runtime type `type_name` is an instance of
    /// the type named `of`.
    pub fn is_instance(&self, type_name: &str, of: &str) -> bool {
        self.is_subtype(type_name, of)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
