//! Error: the attribute only accepts inherent impl blocks.

use canon_values::enumeration;

pub struct Light;

#[enumeration]
impl Default for Light {
    fn default() -> Self {
        Light
    }
}

fn main() {
    let _ = Light;
}
