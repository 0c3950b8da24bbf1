//! Kinds of host types.

use canon_values::{enumeration, Canon, Enumeration, Variant};

/// The kind of a host type.
#[derive(Debug)]
pub struct Kind {
    noun: &'static str,
}

#[enumeration]
#[allow(non_snake_case)]
impl Kind {
    pub fn CLASS(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "CLASS", || Kind { noun: "a class" })
    }

    pub fn INTERFACE(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "INTERFACE", || Kind {
            noun: "an interface",
        })
    }

    pub fn TRAIT(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "TRAIT", || Kind { noun: "a trait" })
    }

    /// Indefinite noun phrase for messages, e.g. `an interface`.
    pub fn noun(&self) -> &'static str {
        self.noun
    }
}
