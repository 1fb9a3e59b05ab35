//! Enum-specific `Mutable` derivation.
//!
//! Only the active variant is walked. `mutate_with` matches on the variant
//! first and then offers its fields through projections that return `None`
//! for every other variant, so a hook that replaces a sibling field can
//! never invalidate the projection.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DataEnum, Result};

use crate::{DeriveOutput, attrs::reject_variant_options, collect_members};

pub(crate) fn derive_enum(
    data: DataEnum,
    type_name: &TokenStream,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    if data.variants.is_empty() {
        return Ok(DeriveOutput {
            exclusive_body: quote! { match *self {} },
            shared_body: quote! { match *self {} },
            walked_types: Vec::new(),
        });
    }

    let mut exclusive_arms = Vec::new();
    let mut shared_arms = Vec::new();
    let mut walked_types = Vec::new();

    for variant in &data.variants {
        reject_variant_options(&variant.attrs)?;
        let variant_ident = &variant.ident;
        let members = collect_members(&variant.fields)?;

        let record_fields = members.iter().map(|member| {
            let name = &member.name;
            let access = &member.access;
            quote! {
                traversal.record_field(
                    self,
                    __type_name,
                    #name,
                    |owner| match owner {
                        Self::#variant_ident { #access: __field, .. } => {
                            ::core::option::Option::Some(__field)
                        }
                        _ => ::core::option::Option::None,
                    },
                    |owner| match owner {
                        Self::#variant_ident { #access: __field, .. } => {
                            ::core::option::Option::Some(__field)
                        }
                        _ => ::core::option::Option::None,
                    },
                );
            }
        });
        exclusive_arms.push(quote! {
            Self::#variant_ident { .. } => {
                #(#record_fields)*
            }
        });

        let bindings: Vec<_> = (0..members.len())
            .map(|index| format_ident!("__field_{}", index))
            .collect();
        let accesses = members.iter().map(|member| &member.access);
        shared_arms.push(quote! {
            Self::#variant_ident { #(#accesses: #bindings,)* .. } => {
                #(#crate_root::Mutable::mutate_shared(#bindings, traversal);)*
            }
        });

        walked_types.extend(members.into_iter().map(|member| member.ty));
    }

    let type_name_binding = if walked_types.is_empty() {
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
            match *self {
                #(#exclusive_arms)*
            }
        },
        shared_body: quote! {
            if !traversal.enter(self) {
                return;
            }
            match self {
                #(#shared_arms)*
            }
        },
        walked_types,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::derive_enum;

    fn expand(tokens: proc_macro2::TokenStream) -> syn::Result<crate::DeriveOutput> {
        let input: DeriveInput = syn::parse2(tokens).unwrap();
        let Data::Enum(data) = input.data else {
            panic!("expected an enum");
        };
        derive_enum(data, &quote!("Name"), &quote!(::mutator))
    }

    #[test]
    fn variant_fields_are_offered_by_name_and_index() {
        let output = expand(quote! {
            enum Secret {
                Basic { user: String, password: String },
                Token(String),
                Anonymous,
            }
        })
        .unwrap();
        let body = output.exclusive_body.to_string();

        assert!(body.contains("\"password\""));
        assert!(body.contains("\"0\""));
        assert!(body.contains("Anonymous"));
        assert_eq!(output.walked_types.len(), 3);
    }

    #[test]
    fn empty_enum_matches_nothing() {
        let output = expand(quote! { enum Never {} }).unwrap();
        assert!(output.walked_types.is_empty());
        assert_eq!(
            output.exclusive_body.to_string(),
            quote!(match *self {}).to_string()
        );
    }

    #[test]
    fn variant_attributes_are_rejected() {
        let result = expand(quote! {
            enum Secret {
                #[mutate(skip)]
                Basic { password: String },
            }
        });
        assert!(result.is_err());
    }
}
