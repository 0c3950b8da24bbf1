//! Error: the implementing type must be a plain named type.

use canon_values::enumeration;

pub struct Light;

#[enumeration]
impl (Light, Light) {}

fn main() {
    let _ = Light;
}
