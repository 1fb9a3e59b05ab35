//! Struct-specific `Mutable` derivation.
//!
//! Each walked field becomes one `Traversal::record_field` call whose
//! projections always succeed. Named, tuple and unit structs share one code
//! path: the field access is either an identifier or an index.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, Result};

use crate::{DeriveOutput, collect_members};

pub(crate) fn derive_struct(
    data: DataStruct,
    type_name: &TokenStream,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let members = collect_members(&data.fields)?;

    let record_fields: Vec<TokenStream> = members
        .iter()
        .map(|member| {
            let name = &member.name;
            let access = &member.access;
            quote! {
                traversal.record_field(
                    self,
                    __type_name,
                    #name,
                    |owner| ::core::option::Option::Some(&owner.#access),
                    |owner| ::core::option::Option::Some(&mut owner.#access),
                );
            }
        })
        .collect();

    let shared_fields: Vec<TokenStream> = members
        .iter()
        .map(|member| {
            let access = &member.access;
            quote! {
                #crate_root::Mutable::mutate_shared(&self.#access, traversal);
            }
        })
        .collect();

    let type_name_binding = if members.is_empty() {
        quote! {}
    } else {
        quote! { let __type_name: &str = #type_name; }
    };

    Ok(DeriveOutput {
        exclusive_body: quote! {
            if !traversal.enter(&*self) {
                return;
            }
            #type_name_binding
            #(#record_fields)*
        },
        shared_body: quote! {
            if !traversal.enter(self) {
                return;
            }
            #(#shared_fields)*
        },
        walked_types: members.into_iter().map(|member| member.ty).collect(),
    })
}
