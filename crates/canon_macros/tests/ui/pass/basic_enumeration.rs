//! Factories become the manifest in declaration order.

use canon_values::{enumeration, Canon, Enumeration, Variant};

pub struct Planet {
    pub mass: f64,
}

#[enumeration]
#[allow(non_snake_case)]
impl Planet {
    pub fn MERCURY(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "MERCURY", || Planet { mass: 3.303e23 })
    }

    pub fn VENUS(cx: &Canon) -> Variant<Planet> {
        Self::define(cx, "VENUS", || Planet { mass: 4.869e24 })
    }

    pub fn heaviest(cx: &Canon) -> f64 {
        Self::instances(cx)
            .unwrap_or_default()
            .iter()
            .map(|planet| planet.mass)
            .fold(0.0, f64::max)
    }
}

fn main() {
    assert_eq!(Planet::NAME, "Planet");
    assert_eq!(Planet::FACTORIES.len(), 2);

    let cx = Canon::new();
    assert!(Planet::heaviest(&cx) > 1e24);
}
