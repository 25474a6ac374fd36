//! Container-level attribute parsing for `#[derive(Bracketed)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[bracketed(...)]` attributes.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, non-public fields are rendered as well.
    pub(crate) include_private: bool,
}

/// Parses container-level `#[bracketed(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("bracketed") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("include_private") {
                        options.include_private = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `include_private`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for #[bracketed]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.include_private);
    }

    #[test]
    fn bare_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! { #[bracketed] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.include_private);
    }

    #[test]
    fn include_private_is_parsed() {
        let attrs = parse_attrs(quote! { #[bracketed(include_private)] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.include_private);
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[bracketed(skip_debug)] });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("unknown container option `skip_debug`"));
    }

    #[test]
    fn name_value_errors() {
        let attrs = parse_attrs(quote! { #[bracketed = "yes"] });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("name-value syntax"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(rename_all = "camelCase")]
        });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.include_private);
    }
}
