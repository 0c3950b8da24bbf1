//! `name` and `discover` options.

use canon_values::{discover_factories, enumeration, Canon, EnumError, Enumeration, Variant};

pub struct Level(pub u8);

fn populate(cx: &Canon) -> Result<(), EnumError> {
    discover_factories::<Level>(cx)?;
    Level::define(cx, "EXTRA", || Level(99));
    Ok(())
}

#[enumeration(name = "LogLevel", discover = populate)]
#[allow(non_snake_case)]
impl Level {
    pub fn LOW(cx: &Canon) -> Variant<Self> {
        Self::define(cx, "LOW", || Level(1))
    }
}

fn main() {
    let cx = Canon::new();
    assert_eq!(Level::LOW(&cx).to_string(), "LogLevel::LOW");
    assert_eq!(Level::instances(&cx).map(|all| all.len()).ok(), Some(2));
    assert_eq!(Level::LOW(&cx).0, 1);
}
