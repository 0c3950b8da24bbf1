//! Error: factories are stored as safe function pointers.

use canon_values::enumeration;

pub struct Light;

#[enumeration]
impl Light {
    pub unsafe fn ON(_cx: &canon_values::Canon) -> canon_values::Variant<Self> {
        unimplemented!()
    }
}

fn main() {
    let _ = Light;
}
