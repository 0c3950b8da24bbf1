//! The canonicalization context.
//!
//! `Canon` owns one repository per value type and one registry per
//! enumeration type. Canonical identity is scoped to a `Canon`: two contexts
//! never share instances.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::config::CanonConfig;
use crate::enumeration::{EnumRegistry, Enumeration};
use crate::repository::InstanceRepository;

type AnyRegistry = Arc<dyn Any + Send + Sync>;

/// Owner of all per-type repositories and enumeration registries.
///
/// Registries are created lazily on first access. `Canon` is `Send + Sync`
/// and is typically created once and shared by reference.
pub struct Canon {
    config: CanonConfig,
    registries: DashMap<TypeId, AnyRegistry, FxBuildHasher>,
}

impl Canon {
    /// Create a context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanonConfig::default())
    }

    pub fn with_config(config: CanonConfig) -> Self {
        Canon {
            config,
            registries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Create a context configured from the environment.
    pub fn from_env() -> Self {
        Self::with_config(CanonConfig::from_env())
    }

    #[inline]
    pub fn config(&self) -> &CanonConfig {
        &self.config
    }

    /// The repository of canonical `T` instances.
    pub fn repository<T: Send + Sync + 'static>(&self) -> Arc<InstanceRepository<T>> {
        self.registry(|| InstanceRepository::new(std::any::type_name::<T>(), self.config.retention))
    }

    /// The registry of members of enumeration `E`.
    pub fn enumeration<E: Enumeration>(&self) -> Arc<EnumRegistry<E>> {
        self.registry(EnumRegistry::new)
    }

    /// Number of registries created so far.
    pub fn registry_count(&self) -> usize {
        self.registries.len()
    }

    fn registry<R: Any + Send + Sync>(&self, init: impl FnOnce() -> R) -> Arc<R> {
        let slot = Arc::clone(
            &self
                .registries
                .entry(TypeId::of::<R>())
                .or_insert_with(|| Arc::new(init()) as AnyRegistry),
        );
        match slot.downcast::<R>() {
            Ok(registry) => registry,
            Err(_) => unreachable!(
                "registry slot for {} holds another type",
                std::any::type_name::<R>()
            ),
        }
    }
}

impl Default for Canon {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Canon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canon")
            .field("config", &self.config)
            .field("registries", &self.registries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Retention;
    use crate::value::Value;

    #[derive(Debug)]
    struct Meters(i64);
    #[derive(Debug)]
    struct Seconds(i64);

    #[test]
    fn one_repository_per_type() {
        let cx = Canon::new();
        let a = cx.repository::<Meters>();
        let b = cx.repository::<Meters>();
        assert!(Arc::ptr_eq(&a, &b));

        let _seconds = cx.repository::<Seconds>();
        assert_eq!(cx.registry_count(), 2);
    }

    #[test]
    fn repositories_are_scoped_to_their_context() {
        let first = Canon::new();
        let second = Canon::new();
        let a = first
            .repository::<Meters>()
            .get_or_create(&[Value::Int(3)], |_| Meters(3));
        let b = second
            .repository::<Meters>()
            .get_or_create(&[Value::Int(3)], |_| Meters(3));
        assert_ne!(a, b);
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn same_key_in_different_types_is_independent() {
        let cx = Canon::new();
        let m = cx.repository::<Meters>().get_or_create(&[Value::Int(1)], |_| Meters(1));
        let s = cx.repository::<Seconds>().get_or_create(&[Value::Int(1)], |_| Seconds(1));
        assert_ne!(m.identity(), s.identity());
        assert_eq!(m.0, s.0);
    }

    #[test]
    fn repositories_use_configured_retention() {
        let cx = Canon::with_config(CanonConfig::new(Retention::Strong));
        assert_eq!(cx.repository::<Meters>().retention(), Retention::Strong);
        assert_eq!(Canon::new().repository::<Meters>().retention(), Retention::Weak);
    }
}
