//! Error: enumerations cannot be generic.

use canon_values::enumeration;

pub struct Boxed<T> {
    pub inner: T,
}

#[enumeration]
impl<T> Boxed<T> {}

fn main() {
    let boxed = Boxed { inner: 0_u8 };
    let _ = boxed.inner;
}
