//! Procedural macros for `canon_values`.
//!
//! Generated code refers to the runtime crate by its absolute path
//! (`::canon_values`), so these macros are meant to be used through the
//! re-export `canon_values::enumeration`.

use proc_macro::TokenStream;

mod enumeration;

/// Implement `canon_values::Enumeration` for the type of an inherent impl
/// block.
///
/// Every factory in the block becomes an entry of the generated manifest,
/// in declaration order. A factory is a `pub` associated function without a
/// receiver or generics, taking exactly one parameter (the `&Canon`
/// context) and returning `Variant<Self>` or `Variant<TypeName>`. Other
/// items are left alone.
///
/// # Options
///
/// - `name = "..."`: the enumeration name (defaults to the type name)
/// - `discover = path::to::fn`: a custom population hook with signature
///   `fn(&Canon) -> Result<(), EnumError>`
///
/// # Example
///
/// ```ignore
/// #[enumeration(name = "Suit")]
/// #[allow(non_snake_case)]
/// impl CardSuit {
///     pub fn HEARTS(cx: &Canon) -> Variant<Self> {
///         Self::define(cx, "HEARTS", || CardSuit { red: true })
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn enumeration(attr: TokenStream, item: TokenStream) -> TokenStream {
    match enumeration::expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
