//! Parsing of `#[mutate(...)]` attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.
//!
//! | Position  | Attribute                       | Effect                               |
//! |-----------|---------------------------------|--------------------------------------|
//! | container | `#[mutate(type_name = "Name")]` | Owner name for type-qualified keys   |
//! | field     | `#[mutate(rename = "name")]`    | Member name used for matching        |
//! | field     | `#[mutate(skip)]`               | Neither matched nor walked           |
//! | variant   | none                            | Rejected                             |

use syn::{Attribute, LitStr, Result};

const ATTR: &str = "mutate";

/// Options read from the attributes on the struct or enum itself.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    pub(crate) type_name: Option<LitStr>,
}

/// Options read from the attributes on a single field.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldOptions {
    pub(crate) skip: bool,
    pub(crate) rename: Option<LitStr>,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_name") {
                if options.type_name.is_some() {
                    return Err(meta.error("duplicate `type_name` option"));
                }
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new(value.span(), "`type_name` cannot be empty"));
                }
                options.type_name = Some(value);
                Ok(())
            } else if meta.path.is_ident("skip") || meta.path.is_ident("rename") {
                Err(meta.error("this option is only allowed on fields"))
            } else {
                Err(meta.error("unknown container option, expected `type_name`"))
            }
        })?;
    }
    Ok(options)
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                if options.skip {
                    return Err(meta.error("duplicate `skip` option"));
                }
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                if options.rename.is_some() {
                    return Err(meta.error("duplicate `rename` option"));
                }
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new(value.span(), "`rename` cannot be empty"));
                }
                options.rename = Some(value);
                Ok(())
            } else if meta.path.is_ident("type_name") {
                Err(meta.error("`type_name` is only allowed on the struct or enum"))
            } else {
                Err(meta.error("unknown field option, expected `skip` or `rename`"))
            }
        })?;
    }
    if let (true, Some(rename)) = (options.skip, &options.rename) {
        return Err(syn::Error::new(
            rename.span(),
            "`rename` has no effect on a skipped field",
        ));
    }
    Ok(options)
}

pub(crate) fn reject_variant_options(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident(ATTR)) {
        Some(attr) => Err(syn::Error::new_spanned(
            attr,
            "`#[mutate]` is not supported on enum variants; annotate the fields instead",
        )),
        None => Ok(()),
    }
}
