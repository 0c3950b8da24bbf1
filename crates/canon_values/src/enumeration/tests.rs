#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::interned::Interned;

#[derive(Debug)]
struct Color {
    hex: u32,
}

#[allow(non_snake_case)]
impl Color {
    fn RED(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "RED", || Color { hex: 0xff_0000 })
    }

    fn GREEN(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "GREEN", || Color { hex: 0x00_ff00 })
    }

    fn BLUE(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "BLUE", || Color { hex: 0x00_00ff })
    }
}

impl Enumeration for Color {
    const NAME: &'static str = "Color";
    const FACTORIES: &'static [Factory<Self>] = &[
        Factory::new("RED", Color::RED),
        Factory::new("GREEN", Color::GREEN),
        Factory::new("BLUE", Color::BLUE),
    ];
}

fn ids<E: Enumeration>(members: &[Variant<E>]) -> Vec<&str> {
    members.iter().map(|member| member.id()).collect()
}

#[test]
fn instances_follow_declaration_order() {
    let cx = Canon::new();
    let all = Color::instances(&cx).unwrap();
    assert_eq!(ids(&all), vec!["RED", "GREEN", "BLUE"]);
    assert_eq!(all[0], Color::RED(&cx));
    assert_eq!(all[2].hex, 0x00_00ff);
}

#[test]
fn factory_called_before_discovery_keeps_declaration_order() {
    let cx = Canon::new();
    let blue = Color::BLUE(&cx);
    assert!(!cx.enumeration::<Color>().is_initialized());

    let all = Color::instances(&cx).unwrap();
    assert_eq!(ids(&all), vec!["RED", "GREEN", "BLUE"]);
    assert_eq!(all[2], blue);
}

#[test]
fn factories_return_the_same_member() {
    let cx = Canon::new();
    let a = Color::GREEN(&cx);
    let b = Color::GREEN(&cx);
    assert!(Interned::ptr_eq(&a, &b));
    assert_eq!(a.id(), "GREEN");
    assert_eq!(a.hex, 0x00_ff00);
}

#[test]
fn lookup_by_id_runs_discovery() {
    let cx = Canon::new();
    let green = Color::instance(&cx, "GREEN").unwrap();
    assert_eq!(green, Some(Color::GREEN(&cx)));
    assert!(cx.enumeration::<Color>().is_initialized());
}

#[test]
fn missing_id_is_none_or_not_found() {
    let cx = Canon::new();
    assert_eq!(Color::instance(&cx, "PURPLE").unwrap(), None);

    let err = Color::try_instance(&cx, "PURPLE").unwrap_err();
    assert_eq!(
        err,
        EnumError::NotFound {
            enum_name: "Color",
            id: "PURPLE".to_owned(),
        }
    );
    assert_eq!(err.to_string(), "enum Color has no instance \"PURPLE\"");
}

#[test]
fn member_display_names_enum_and_id() {
    let cx = Canon::new();
    assert_eq!(Color::RED(&cx).to_string(), "Color::RED");
}

#[test]
fn define_keeps_first_payload() {
    let cx = Canon::new();
    let red = Color::RED(&cx);
    let again = Color::define(&cx, "RED", || Color { hex: 0 });
    assert_eq!(red, again);
    assert_eq!(again.hex, 0xff_0000);
}

#[test]
fn members_are_retained_strongly() {
    let cx = Canon::new();
    let identity = Color::RED(&cx).identity();
    let registry = cx.enumeration::<Color>();
    assert_eq!(registry.lookup("RED").map(|red| red.identity()), Some(identity));
}

#[test]
fn contexts_do_not_share_members() {
    let first = Canon::new();
    let second = Canon::new();
    assert_ne!(Color::RED(&first), Color::RED(&second));
}

// Lists its own enumeration while discovery is still running.
#[derive(Debug)]
struct Shade {
    seen_before: usize,
}

#[allow(non_snake_case)]
impl Shade {
    fn LIGHT(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "LIGHT", || Shade { seen_before: 0 })
    }

    fn DARK(cx: &Canon) -> Variant<Self> {
        let seen = Shade::instances(cx).map(|all| all.len()).unwrap_or_default();
        Self::define(cx, "DARK", || Shade { seen_before: seen })
    }
}

impl Enumeration for Shade {
    const NAME: &'static str = "Shade";
    const FACTORIES: &'static [Factory<Self>] =
        &[Factory::new("LIGHT", Shade::LIGHT), Factory::new("DARK", Shade::DARK)];
}

#[test]
fn reentrant_listing_during_discovery_is_absorbed() {
    let cx = Canon::new();
    let all = Shade::instances(&cx).unwrap();
    assert_eq!(ids(&all), vec!["LIGHT", "DARK"]);
    // DARK saw only LIGHT, which was defined before it
    assert_eq!(all[1].seen_before, 1);
    assert_eq!(all[0].seen_before, 0);
}

// Defines one member beyond its factories.
#[derive(Debug)]
struct Suit(char);

#[allow(non_snake_case)]
impl Suit {
    fn HEARTS(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "HEARTS", || Suit('h'))
    }
}

impl Enumeration for Suit {
    const NAME: &'static str = "Suit";
    const FACTORIES: &'static [Factory<Self>] = &[Factory::new("HEARTS", Suit::HEARTS)];

    fn discover(cx: &Canon) -> Result<(), EnumError> {
        discover_factories::<Self>(cx)?;
        Self::define(cx, "JOKER", || Suit('j'));
        Ok(())
    }
}

#[test]
fn custom_discover_hook_adds_members() {
    let cx = Canon::new();
    let all = Suit::instances(&cx).unwrap();
    assert_eq!(ids(&all), vec!["HEARTS", "JOKER"]);
    assert_eq!(all[1].0, 'j');
    assert_eq!(all[0].0, 'h');
}

// Fails on its first discovery pass only.
#[derive(Debug)]
struct Flaky;

static FLAKY_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

impl Enumeration for Flaky {
    const NAME: &'static str = "Flaky";
    const FACTORIES: &'static [Factory<Self>] = &[];

    fn discover(cx: &Canon) -> Result<(), EnumError> {
        if FLAKY_ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(EnumError::Discovery {
                enum_name: Self::NAME,
                reason: "not ready".to_owned(),
            });
        }
        Self::define(cx, "ONLY", || Flaky);
        Ok(())
    }
}

#[test]
fn failed_discovery_is_surfaced_then_retried() {
    let cx = Canon::new();
    let err = Flaky::instances(&cx).unwrap_err();
    assert!(matches!(err, EnumError::Discovery { enum_name: "Flaky", .. }));
    assert!(!cx.enumeration::<Flaky>().is_initialized());

    let all = Flaky::instances(&cx).unwrap();
    assert_eq!(ids(&all), vec!["ONLY"]);
    assert_eq!(FLAKY_ATTEMPTS.load(Ordering::SeqCst), 2);
}

// Two factories that share a member id.
#[derive(Debug)]
struct Twin;

#[allow(non_snake_case)]
impl Twin {
    fn FIRST(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "SAME", || Twin)
    }

    fn SECOND(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "SAME", || Twin)
    }

    fn OTHER(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "OTHER", || Twin)
    }
}

impl Enumeration for Twin {
    const NAME: &'static str = "Twin";
    const FACTORIES: &'static [Factory<Self>] =
        &[
            Factory::new("FIRST", Twin::FIRST),
            Factory::new("OTHER", Twin::OTHER),
            Factory::new("SECOND", Twin::SECOND),
        ];
}

#[test]
fn aliased_factories_list_their_member_once() {
    let cx = Canon::new();
    let all = Twin::instances(&cx).unwrap();
    assert_eq!(all.iter().map(|m| m.id()).collect::<Vec<_>>(), vec!["SAME", "OTHER"]);
    assert_eq!(Twin::FIRST(&cx), Twin::SECOND(&cx));
}

// Names the same factory twice.
#[derive(Debug)]
struct Echo;

#[allow(non_snake_case)]
impl Echo {
    fn ONE(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "ONE", || Echo)
    }
}

impl Enumeration for Echo {
    const NAME: &'static str = "Echo";
    const FACTORIES: &'static [Factory<Self>] =
        &[Factory::new("ONE", Echo::ONE), Factory::new("ONE", Echo::ONE)];
}

#[test]
fn duplicate_factory_names_are_malformed() {
    let cx = Canon::new();
    let err = Echo::instance(&cx, "ONE").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unable to initialize instances of enum Echo: factory `ONE` is declared more than once"
    );
}

#[test]
fn try_define_failure_defines_nothing() {
    let cx = Canon::new();
    let registry = cx.enumeration::<Color>();
    let failed = registry.try_define("CYAN", || Err::<Color, _>("no cyan"));
    assert_eq!(failed.unwrap_err(), "no cyan");
    assert!(registry.lookup("CYAN").is_none());
    assert!(registry.is_empty());
}
