//! Enumerations: fixed, ordered sets of canonical members.
//!
//! An enumeration type declares its members through nullary factories
//! (factories that only take the [`Canon`] context). The declaration-ordered
//! list of factories is a compile-time manifest, usually generated by the
//! [`enumeration`](macro@crate::enumeration) attribute. The first call that needs
//! the full member set runs a one-time discovery pass invoking every
//! factory, after which lookups by id and listing are complete.
//!
//! ```
//! use canon_values::{enumeration, Canon, Enumeration, Variant};
//!
//! #[derive(Debug)]
//! pub struct Color {
//!     hex: u32,
//! }
//!
//! #[enumeration]
//! #[allow(non_snake_case)]
//! impl Color {
//!     pub fn RED(cx: &Canon) -> Variant<Self> {
//!         Self::define(cx, "RED", || Color { hex: 0xff0000 })
//!     }
//!
//!     pub fn GREEN(cx: &Canon) -> Variant<Self> {
//!         Self::define(cx, "GREEN", || Color { hex: 0x00ff00 })
//!     }
//! }
//!
//! let cx = Canon::new();
//! let all = Color::instances(&cx).unwrap_or_default();
//! assert_eq!(all, vec![Color::RED(&cx), Color::GREEN(&cx)]);
//! assert_eq!(Color::RED(&cx).hex, 0xff0000);
//! assert_eq!(Color::RED(&cx).to_string(), "Color::RED");
//! ```

mod member;
mod registry;

pub use member::{Member, Variant};
pub use registry::EnumRegistry;

use std::fmt;

use rustc_hash::FxHashSet;

use crate::canon::Canon;
use crate::error::EnumError;

/// One entry of an enumeration's factory manifest.
pub struct Factory<E: 'static> {
    name: &'static str,
    produce: fn(&Canon) -> Variant<E>,
}

impl<E> Factory<E> {
    pub const fn new(name: &'static str, produce: fn(&Canon) -> Variant<E>) -> Self {
        Factory { name, produce }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the factory.
    pub fn produce(&self, cx: &Canon) -> Variant<E> {
        (self.produce)(cx)
    }
}

impl<E> Clone for Factory<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Factory<E> {}

impl<E> fmt::Debug for Factory<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Factory").field(&self.name).finish()
    }
}

/// A type whose instances form a fixed, discoverable set.
pub trait Enumeration: Sized + Send + Sync + 'static {
    /// Name used in member `Display` output and error messages.
    const NAME: &'static str;

    /// Nullary factories in declaration order.
    const FACTORIES: &'static [Factory<Self>];

    /// Populate the member set.
    ///
    /// Runs once per context, on the first lookup or listing. The default
    /// invokes every factory in `FACTORIES`. Override it to define members
    /// some other way; members defined here appear in `instances()` in the
    /// order they were defined.
    fn discover(cx: &Canon) -> Result<(), EnumError> {
        discover_factories::<Self>(cx)
    }

    /// Get or create the member `id`, initializing its payload on first
    /// definition. Later calls with the same id ignore `init`.
    fn define(cx: &Canon, id: &str, init: impl FnOnce() -> Self) -> Variant<Self> {
        cx.enumeration::<Self>().define(id, init)
    }

    /// Look up a member by id; `Ok(None)` when there is none.
    fn instance(cx: &Canon, id: &str) -> Result<Option<Variant<Self>>, EnumError> {
        cx.enumeration::<Self>().instance(cx, id)
    }

    /// Look up a member by id; [`EnumError::NotFound`] when there is none.
    fn try_instance(cx: &Canon, id: &str) -> Result<Variant<Self>, EnumError> {
        cx.enumeration::<Self>().try_instance(cx, id)
    }

    /// Look up a member that must exist.
    ///
    /// # Panics
    ///
    /// Panics if discovery fails or there is no member `id`.
    fn require(cx: &Canon, id: &str) -> Variant<Self> {
        Self::try_instance(cx, id).unwrap_or_else(|err| panic!("{err}"))
    }

    /// All members, in declaration order.
    fn instances(cx: &Canon) -> Result<Vec<Variant<Self>>, EnumError> {
        cx.enumeration::<Self>().instances(cx)
    }
}

/// Invoke every factory of `E` in declaration order.
///
/// Factories producing the same member are aliases; the member is listed at
/// the first one's position.
///
/// This is the default discovery pass. Custom [`Enumeration::discover`]
/// hooks may call it and then define additional members.
pub fn discover_factories<E: Enumeration>(cx: &Canon) -> Result<(), EnumError> {
    check_manifest::<E>()?;

    let produced: Vec<Variant<E>> = E::FACTORIES
        .iter()
        .map(|factory| {
            tracing::trace!(enum_name = E::NAME, factory = factory.name(), "invoking factory");
            factory.produce(cx)
        })
        .collect();

    cx.enumeration::<E>().rank(&produced);
    Ok(())
}

/// A manifest naming the same factory twice is malformed.
fn check_manifest<E: Enumeration>() -> Result<(), EnumError> {
    let mut seen = FxHashSet::default();
    for factory in E::FACTORIES {
        if !seen.insert(factory.name()) {
            return Err(EnumError::Discovery {
                enum_name: E::NAME,
                reason: format!("factory `{}` is declared more than once", factory.name()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
