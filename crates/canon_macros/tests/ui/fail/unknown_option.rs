//! Error: only `name` and `discover` are accepted.

use canon_values::enumeration;

pub struct Light;

#[enumeration(colour = "red")]
impl Light {}

fn main() {
    let _ = Light;
}
