//! Generic type parameter handling and trait bound management.
//!
//! Every type parameter gets a `'static` bound, because `Mutable` requires
//! `Any`. Walked fields whose type mentions a type parameter additionally get
//! a `FieldType: Mutable` where-predicate, so `struct Wrapper<T> { inner: T }`
//! is `Mutable` exactly when `T` is.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics. It is always a leaf,
//! so a marker parameter never needs to implement `Mutable`:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T does not need Mutable
//! }
//! ```

use proc_macro2::TokenStream;
use syn::{Ident, Result, parse_quote};

fn push_if_generic(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if generics.type_params().any(|param| param.ident == *ident)
        && !result.iter().any(|g| g == ident)
    {
        result.push(ident.clone());
    }
}

fn visit_type_param_bound(
    bound: &syn::TypeParamBound,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::TypeParamBound::Trait(trait_bound) = bound {
        visit_path(&trait_bound.path, generics, result);
    }
}

fn visit_path_arguments(
    args: &syn::PathArguments,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match args {
        syn::PathArguments::AngleBracketed(args) => {
            for arg in &args.args {
                match arg {
                    syn::GenericArgument::Type(inner_ty) => {
                        visit_type(inner_ty, generics, result);
                    }
                    syn::GenericArgument::AssocType(assoc) => {
                        visit_type(&assoc.ty, generics, result);
                    }
                    syn::GenericArgument::Constraint(constraint) => {
                        for bound in &constraint.bounds {
                            visit_type_param_bound(bound, generics, result);
                        }
                    }
                    _ => {}
                }
            }
        }
        syn::PathArguments::Parenthesized(args) => {
            for input in &args.inputs {
                visit_type(input, generics, result);
            }
            if let syn::ReturnType::Type(_, output) = &args.output {
                visit_type(output, generics, result);
            }
        }
        syn::PathArguments::None => {}
    }
}

fn visit_path(path: &syn::Path, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "PhantomData")
    {
        return;
    }

    for segment in &path.segments {
        push_if_generic(&segment.ident, generics, result);
        visit_path_arguments(&segment.arguments, generics, result);
    }
}

fn visit_type(ty: &syn::Type, generics: &syn::Generics, result: &mut Vec<Ident>) {
    match ty {
        syn::Type::Path(type_path) => {
            if let Some(qself) = &type_path.qself {
                visit_type(&qself.ty, generics, result);
            }
            visit_path(&type_path.path, generics, result);
        }
        syn::Type::Reference(reference) => visit_type(&reference.elem, generics, result),
        syn::Type::Ptr(pointer) => visit_type(&pointer.elem, generics, result),
        syn::Type::Slice(slice) => visit_type(&slice.elem, generics, result),
        syn::Type::Array(array) => visit_type(&array.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                visit_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => visit_type(&paren.elem, generics, result),
        syn::Type::Group(group) => visit_type(&group.elem, generics, result),
        syn::Type::TraitObject(obj) => {
            for bound in &obj.bounds {
                visit_type_param_bound(bound, generics, result);
            }
        }
        syn::Type::BareFn(bare_fn) => {
            for input in &bare_fn.inputs {
                visit_type(&input.ty, generics, result);
            }
            if let syn::ReturnType::Type(_, output) = &bare_fn.output {
                visit_type(output, generics, result);
            }
        }
        _ => {}
    }
}

/// Returns `true` if `ty` mentions one of the type parameters in `generics`.
pub(crate) fn mentions_generics(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut found = Vec::new();
    visit_type(ty, generics, &mut found);
    !found.is_empty()
}

/// Rejects lifetime parameters: a `Mutable` type must be `'static`.
pub(crate) fn reject_lifetimes(generics: &syn::Generics) -> Result<()> {
    match generics.lifetimes().next() {
        Some(param) => Err(syn::Error::new_spanned(
            &param.lifetime,
            "`Mutable` cannot be derived for types with lifetime parameters",
        )),
        None => Ok(()),
    }
}

/// Adds the `'static` bound to every type parameter and a `Mutable`
/// predicate for every walked field type that mentions one.
pub(crate) fn add_mutable_bounds(
    mut generics: syn::Generics,
    walked_types: &[syn::Type],
    mutable_path: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let bounded: Vec<&syn::Type> = walked_types
        .iter()
        .filter(|ty| mentions_generics(ty, &generics))
        .collect();
    if !bounded.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in bounded {
            where_clause
                .predicates
                .push(parse_quote!(#ty: #mutable_path));
        }
    }
    generics
}
