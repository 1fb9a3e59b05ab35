//! Derive macro for `mutator`.
//!
//! This crate generates the traversal code behind `#[derive(Mutable)]`. It:
//! - reads `#[mutate(...)]` attributes
//! - emits a `mutator::Mutable` implementation that offers every member to
//!   the traversal by name
//!
//! It does **not** define hooks or the registry. Those live in the main
//! `mutator` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Fields, Result, ext::IdentExt, parse_macro_input, spanned::Spanned,
};

mod attrs;
mod derive_enum;
mod derive_struct;
mod generics;

use attrs::{parse_container_options, parse_field_options};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_mutable_bounds, reject_lifetimes};

/// Derives `mutator::Mutable` for structs and enums.
///
/// Every member is offered to the traversal under its name. Named fields use
/// their identifier (`r#type` is offered as `type`), tuple fields their index
/// (`"0"`, `"1"`, ...). For enums, the members of the active variant are
/// offered. Member types must implement `Mutable` themselves.
///
/// # Container Attributes
///
/// - `#[mutate(type_name = "Name")]`: the owner name used for type-qualified
///   keys (`"Name.member"`). Defaults to `core::any::type_name::<Self>()`,
///   which includes the module path and generic arguments.
///
/// # Field Attributes
///
/// - **No annotation**: the field is matched by name; without a match it is
///   walked.
/// - `#[mutate(rename = "name")]`: match the field under a different name.
/// - `#[mutate(skip)]`: the field is neither matched nor walked. Use this for
///   foreign types that do not implement `Mutable`.
///
/// Unions and types with lifetime parameters are rejected at compile time.
#[proc_macro_derive(Mutable, attributes(mutate))]
pub fn derive_mutable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Traversal bodies produced for one struct or enum.
pub(crate) struct DeriveOutput {
    /// Body of `mutate_with`.
    pub(crate) exclusive_body: TokenStream,
    /// Body of `mutate_shared`.
    pub(crate) shared_body: TokenStream,
    /// Types of the walked members, for generic bounds.
    pub(crate) walked_types: Vec<syn::Type>,
}

/// A field that takes part in traversal.
pub(crate) struct Member {
    /// Name offered to the registry.
    pub(crate) name: String,
    /// How the field is accessed: `ident` or tuple index.
    pub(crate) access: syn::Member,
    pub(crate) ty: syn::Type,
}

/// Collects the non-skipped fields of a struct or enum variant.
pub(crate) fn collect_members(fields: &Fields) -> Result<Vec<Member>> {
    let mut members = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let (access, default_name) = match &field.ident {
            Some(ident) => (syn::Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (
                syn::Member::Unnamed(syn::Index {
                    index: u32::try_from(index).map_err(|_| {
                        syn::Error::new(field.span(), "too many fields for `Mutable`")
                    })?,
                    span: field.span(),
                }),
                index.to_string(),
            ),
        };
        members.push(Member {
            name: options
                .rename
                .map_or(default_name, |rename| rename.value()),
            access,
            ty: field.ty.clone(),
        });
    }
    Ok(members)
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_lifetimes(&generics)?;
    let options = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    let type_name = match &options.type_name {
        Some(name) => quote! { #name },
        None => quote! { ::core::any::type_name::<Self>() },
    };

    let output = match data {
        Data::Struct(data) => derive_struct(data, &type_name, &crate_root)?,
        Data::Enum(data) => derive_enum(data, &type_name, &crate_root)?,
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Mutable` cannot be derived for unions",
            ));
        }
    };

    let DeriveOutput {
        exclusive_body,
        shared_body,
        walked_types,
    } = output;

    let mutable_path = quote! { #crate_root::Mutable };
    let generics = add_mutable_bounds(generics, &walked_types, &mutable_path);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #mutable_path for #ident #ty_generics #where_clause {
            #[allow(unreachable_patterns, clippy::match_single_binding)]
            fn mutate_with(&mut self, traversal: &mut #crate_root::Traversal<'_>) {
                #exclusive_body
            }

            #[allow(unreachable_patterns, clippy::match_single_binding)]
            fn mutate_shared(&self, traversal: &mut #crate_root::Traversal<'_>) {
                #shared_body
            }
        }
    })
}

/// Returns the token stream to reference the mutator crate root.
///
/// Handles crate renaming (e.g., `scrub = { package = "mutator", ... }`).
/// Inside the mutator crate itself the `extern crate self as mutator` alias
/// makes the absolute path resolve, which also covers its tests and
/// doctests.
fn crate_root() -> TokenStream {
    match crate_name("mutator") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::mutator },
    }
}
