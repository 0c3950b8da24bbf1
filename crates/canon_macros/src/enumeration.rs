//! `#[enumeration]` attribute implementation.
//!
//! Builds the factory manifest of an enumeration from its inherent impl
//! block at compile time.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::Parser;
use syn::{
    FnArg, GenericArgument, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Path, PathArguments,
    ReturnType, Type, Visibility,
};

#[derive(Default)]
struct Options {
    name: Option<LitStr>,
    discover: Option<Path>,
}

/// Expand `#[enumeration(attr)] item`.
pub fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let options = parse_options(attr)?;
    let block: ItemImpl = syn::parse2(item)?;

    if let Some((_, trait_path, _)) = &block.trait_ {
        return Err(syn::Error::new_spanned(
            trait_path,
            "#[enumeration] must be placed on an inherent impl block",
        ));
    }
    if !block.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &block.generics,
            "#[enumeration] does not support generic types",
        ));
    }

    let self_ty = &block.self_ty;
    let type_ident = type_ident(self_ty)?;
    let name = options
        .name
        .unwrap_or_else(|| LitStr::new(&type_ident.unraw().to_string(), type_ident.span()));

    let mut entries = Vec::new();
    for item in &block.items {
        let ImplItem::Fn(func) = item else {
            continue;
        };
        if !is_factory(func, type_ident) {
            continue;
        }
        check_factory(func)?;
        let ident = &func.sig.ident;
        let label = ident.unraw().to_string();
        entries.push(quote! { ::canon_values::Factory::new(#label, Self::#ident) });
    }

    let discover = options.discover.map(|path| {
        quote! {
            fn discover(
                cx: &::canon_values::Canon,
            ) -> ::core::result::Result<(), ::canon_values::EnumError> {
                #path(cx)
            }
        }
    });

    Ok(quote! {
        #block

        impl ::canon_values::Enumeration for #self_ty {
            const NAME: &'static str = #name;
            const FACTORIES: &'static [::canon_values::Factory<Self>] = &[#(#entries),*];
            #discover
        }
    })
}

fn parse_options(attr: TokenStream2) -> syn::Result<Options> {
    let mut options = Options::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            options.name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("discover") {
            options.discover = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported enumeration option, expected `name` or `discover`"))
        }
    });
    parser.parse2(attr)?;
    Ok(options)
}

/// The identifier naming the implementing type.
fn type_ident(self_ty: &Type) -> syn::Result<&Ident> {
    if let Type::Path(type_path) = self_ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.arguments.is_none() {
                return Ok(&segment.ident);
            }
        }
    }
    Err(syn::Error::new_spanned(
        self_ty,
        "#[enumeration] requires a plain named type",
    ))
}

/// Check whether `func` has the shape of an enumeration factory: a public,
/// non-generic `fn(&Canon) -> Variant<Self>`.
fn is_factory(func: &ImplItemFn, type_ident: &Ident) -> bool {
    let sig = &func.sig;
    matches!(func.vis, Visibility::Public(_))
        && sig.generics.params.is_empty()
        && sig.inputs.len() == 1
        && takes_canon(sig.inputs.first())
        && returns_variant_of(&sig.output, type_ident)
}

/// Reject factory-shaped functions that cannot be stored as `fn(&Canon)`.
fn check_factory(func: &ImplItemFn) -> syn::Result<()> {
    let sig = &func.sig;
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            format!("enumeration factory `{}` cannot be `unsafe`", sig.ident.unraw()),
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            format!("enumeration factory `{}` cannot be `async`", sig.ident.unraw()),
        ));
    }
    Ok(())
}

/// Check for a single `&Canon` parameter, through any path ending in `Canon`.
fn takes_canon(input: Option<&FnArg>) -> bool {
    let Some(FnArg::Typed(pat_type)) = input else {
        return false;
    };
    let Type::Reference(reference) = pat_type.ty.as_ref() else {
        return false;
    };
    if reference.mutability.is_some() {
        return false;
    }
    let Type::Path(type_path) = reference.elem.as_ref() else {
        return false;
    };
    type_path.qself.is_none()
        && type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Canon" && segment.arguments.is_none())
}

/// Check for a return type of `Variant<Self>` or `Variant<TypeName>`,
/// through any path ending in `Variant`.
fn returns_variant_of(output: &ReturnType, type_ident: &Ident) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(type_path) = ty.as_ref() else {
        return false;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Variant" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    if args.args.len() != 1 {
        return false;
    }
    match args.args.first() {
        Some(GenericArgument::Type(Type::Path(inner))) => inner
            .path
            .get_ident()
            .is_some_and(|ident| ident == "Self" || ident == type_ident),
        _ => false,
    }
}
