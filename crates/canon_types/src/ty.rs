//! Type descriptors.

use std::any::type_name;
use std::fmt;
use std::ops::Deref;

use canon_values::{Canon, Interned, Value, Variant};

use crate::catalog::TypeCatalog;
use crate::error::TypeError;
use crate::kind::Kind;

/// A named host type of a given kind.
///
/// Descriptors are canonical: one instance per (name, kind) within a
/// [`Canon`] context.
#[derive(Debug)]
pub struct Type {
    name: Box<str>,
    kind: Variant<Kind>,
}

impl Type {
    /// The descriptor of the registered type `name`, whatever its kind.
    pub fn named(cx: &Canon, catalog: &TypeCatalog, name: &str) -> Result<Interned<Type>, TypeError> {
        let kind = catalog.kind_of(name).ok_or_else(|| TypeError::Unknown {
            kind: "a registered type",
            name: name.to_owned(),
        })?;
        Ok(Self::intern(cx, name, kind))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &Variant<Kind> {
        &self.kind
    }

    /// Check whether this type is `other` or one of its subtypes.
    pub fn is_subtype_of(&self, catalog: &TypeCatalog, other: &Type) -> bool {
        catalog.is_subtype(&self.name, &other.name)
    }

    fn intern(cx: &Canon, name: &str, kind: &Variant<Kind>) -> Interned<Type> {
        cx.repository::<Type>()
            .get_or_create(&[Value::from(name), Value::from(kind)], |_| Type {
                name: name.into(),
                kind: kind.clone(),
            })
    }

    /// Resolve `name` as a type of the kind `expected` produces.
    fn of_kind(
        cx: &Canon,
        catalog: &TypeCatalog,
        name: &str,
        expected: fn(&Canon) -> Variant<Kind>,
    ) -> Result<Interned<Type>, TypeError> {
        let expected = expected(cx);
        match catalog.kind_of(name) {
            Some(kind) if *kind == expected => Ok(Self::intern(cx, name, kind)),
            _ => Err(TypeError::Unknown {
                kind: expected.noun(),
                name: name.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.id(), self.name)
    }
}

macro_rules! kinded_type {
    ($(#[$meta:meta])* $name:ident => $factory:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(Interned<Type>);

        impl $name {
            /// Resolve a registered type of this kind by name.
            pub fn from_name(cx: &Canon, catalog: &TypeCatalog, name: &str) -> Result<Self, TypeError> {
                Type::of_kind(cx, catalog, name, Kind::$factory).map($name)
            }

            /// The underlying canonical descriptor.
            pub fn as_type(&self) -> &Interned<Type> {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = Type;

            fn deref(&self) -> &Type {
                &self.0
            }
        }

        impl From<$name> for Interned<Type> {
            fn from(ty: $name) -> Self {
                ty.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&*self.0, f)
            }
        }
    };
}

kinded_type! {
    /// A type of kind `CLASS`.
    ClassType => CLASS
}

kinded_type! {
    /// A type of kind `INTERFACE`.
    InterfaceType => INTERFACE
}

kinded_type! {
    /// A type of kind `TRAIT`.
    TraitType => TRAIT
}

impl ClassType {
    /// The class descriptor of the Rust type `T`.
    ///
    /// `T` must have been registered with [`TypeCatalog::register_rust`].
    pub fn of<T: ?Sized + 'static>(cx: &Canon, catalog: &TypeCatalog) -> Result<Self, TypeError> {
        Self::from_name(cx, catalog, type_name::<T>())
    }
}
