//! Enumerations declared with the `#[enumeration]` attribute.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, OnceLock};
use std::thread;

use canon_values::{enumeration, Canon, EnumError, Enumeration, Variant};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

#[derive(Debug)]
pub struct Numeral {
    message: &'static str,
}

#[enumeration]
#[allow(non_snake_case)]
impl Numeral {
    pub fn ONE(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "one", || Numeral { message: "eno" })
    }

    pub fn TWO(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "two", || Numeral { message: "owt" })
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

fn ids<E: Enumeration>(members: &[Variant<E>]) -> Vec<String> {
    members.iter().map(|member| member.id().to_owned()).collect()
}

#[test]
fn instances_in_declaration_order() {
    let cx = Canon::new();
    assert_eq!(Numeral::instances(&cx).unwrap(), vec![Numeral::ONE(&cx), Numeral::TWO(&cx)]);
}

#[test]
fn factories_return_one_instance_each() {
    let cx = Canon::new();
    assert_eq!(Numeral::ONE(&cx), Numeral::ONE(&cx));
    assert_eq!(Numeral::TWO(&cx), Numeral::TWO(&cx));
    assert_ne!(Numeral::ONE(&cx), Numeral::TWO(&cx));
}

#[test]
fn lookup_by_id() {
    let cx = Canon::new();
    assert_eq!(Numeral::instance(&cx, "one").unwrap(), Some(Numeral::ONE(&cx)));
    assert_eq!(Numeral::instance(&cx, "two").unwrap(), Some(Numeral::TWO(&cx)));
    assert_eq!(Numeral::instance(&cx, "three").unwrap(), None);
    assert_eq!(
        Numeral::try_instance(&cx, "three"),
        Err(EnumError::NotFound {
            enum_name: "Numeral",
            id: "three".to_owned(),
        })
    );
}

#[test]
#[should_panic(expected = "enum Numeral has no instance \"three\"")]
fn require_panics_on_missing_id() {
    let cx = Canon::new();
    Numeral::require(&cx, "three");
}

#[test]
fn ids_are_stored_with_the_member() {
    let cx = Canon::new();
    assert_eq!(Numeral::require(&cx, "one").id(), "one");
    assert_eq!(Numeral::require(&cx, "two").id(), "two");
}

#[test]
fn payload_is_initialized_once() {
    let cx = Canon::new();
    assert_eq!(Numeral::ONE(&cx).message(), "eno");
    assert_eq!(Numeral::TWO(&cx).message(), "owt");
}

#[test]
fn display_names_the_member() {
    let cx = Canon::new();
    assert_eq!(Numeral::TWO(&cx).to_string(), "Numeral::two");
}

static BUILDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct Signal;

#[enumeration(name = "Traffic")]
#[allow(non_snake_case)]
impl Signal {
    pub fn STOP(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "STOP", || {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Signal
        })
    }

    pub fn GO(cx: &Canon) -> Variant<Signal> {
        Self::define(cx, "GO", || {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Signal
        })
    }
}

#[test]
fn concurrent_first_access_runs_discovery_once() {
    let cx = Canon::new();
    let listings: Vec<Vec<Variant<Signal>>> = (0..32)
        .into_par_iter()
        .map(|_| Signal::instances(&cx).unwrap())
        .collect();

    let expected = vec![Signal::STOP(&cx), Signal::GO(&cx)];
    for listing in &listings {
        assert_eq!(listing, &expected);
    }
    assert_eq!(BUILDS.load(Ordering::SeqCst), 2);
    assert_eq!(ids(&expected), vec!["STOP", "GO"]);
    assert_eq!(Signal::NAME, "Traffic");
}

#[derive(Debug)]
pub struct Tier(u8);

fn all_tiers(cx: &Canon) -> Result<(), EnumError> {
    for level in 1..=3 {
        Tier::define(cx, &format!("T{level}"), || Tier(level));
    }
    Ok(())
}

#[enumeration(discover = all_tiers)]
impl Tier {}

#[test]
fn custom_discovery_without_factories() {
    let cx = Canon::new();
    let tiers = Tier::instances(&cx).unwrap();
    assert_eq!(ids(&tiers), vec!["T1", "T2", "T3"]);
    assert_eq!(tiers.iter().map(|tier| tier.0).sum::<u8>(), 6);
    assert!(Tier::FACTORIES.is_empty());
}

// Each factory lists the other enumeration. Both threads meet inside their
// factories, so the two discovery passes are guaranteed to overlap.
fn rally() -> &'static Barrier {
    static RALLY: OnceLock<Barrier> = OnceLock::new();
    RALLY.get_or_init(|| Barrier::new(2))
}

#[derive(Debug)]
pub struct Ping;

#[enumeration]
#[allow(non_snake_case)]
impl Ping {
    pub fn SERVE(cx: &Canon) -> Variant<Self> {
        rally().wait();
        Pong::instances(cx).unwrap();
        Self::define(cx, "SERVE", || Ping)
    }
}

#[derive(Debug)]
pub struct Pong;

#[enumeration]
#[allow(non_snake_case)]
impl Pong {
    pub fn RETURN(cx: &Canon) -> Variant<Self> {
        rally().wait();
        Ping::instances(cx).unwrap();
        Self::define(cx, "RETURN", || Pong)
    }
}

#[test]
fn mutually_dependent_enumerations_discover_from_two_threads() {
    let cx = Canon::new();
    let (pings, pongs) = thread::scope(|scope| {
        let pings = scope.spawn(|| Ping::instances(&cx));
        let pongs = scope.spawn(|| Pong::instances(&cx));
        (pings.join().unwrap(), pongs.join().unwrap())
    });

    assert_eq!(ids(&pings.unwrap()), vec!["SERVE"]);
    assert_eq!(ids(&pongs.unwrap()), vec!["RETURN"]);
    assert!(cx.enumeration::<Ping>().is_initialized());
    assert!(cx.enumeration::<Pong>().is_initialized());
}
