//! Parsing of `#[sensitive]` field attributes.
//!
//! The attribute is turned into a raw [`Annotation`] so the same resolver the
//! engine uses decides the mask.

use bracketed_core::{Annotation, SENSITIVE_MARKER};
use quote::ToTokens;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Result, spanned::Spanned};

/// Sensitivity annotation on a field.
///
/// ## Attribute Mapping
///
/// | Attribute                 | Annotation                    | Mask         |
/// |---------------------------|-------------------------------|--------------|
/// | None                      | `None`                        | value shown  |
/// | `#[sensitive]`            | marker, no argument           | default mask |
/// | `#[sensitive("***")]`     | marker, literal `"***"`       | `***`        |
/// | `#[sensitive(MASK)]`      | marker, expression `MASK`     | default mask |
pub(crate) fn parse_sensitivity(attrs: &[Attribute]) -> Result<Option<Annotation>> {
    let mut annotation: Option<Annotation> = None;
    for attr in attrs {
        if !attr.path().is_ident(SENSITIVE_MARKER) {
            continue;
        }
        if annotation.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[sensitive] attributes on the same field",
            ));
        }

        annotation = Some(match &attr.meta {
            Meta::Path(_) => Annotation::marker(SENSITIVE_MARKER),
            Meta::List(list) => {
                if list.tokens.is_empty() {
                    return Err(syn::Error::new(
                        attr.span(),
                        "empty argument list: use #[sensitive] or #[sensitive(\"mask\")]",
                    ));
                }
                let expr = syn::parse2::<Expr>(list.tokens.clone()).map_err(|_| {
                    syn::Error::new(
                        list.tokens.span(),
                        "expected a single mask argument (e.g., #[sensitive(\"***\")])",
                    )
                })?;
                match expr {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(text),
                        ..
                    }) => Annotation::with_literal(SENSITIVE_MARKER, text.value()),
                    other => Annotation::with_expression(
                        SENSITIVE_MARKER,
                        other.to_token_stream().to_string(),
                    ),
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected #[sensitive] or #[sensitive(\"mask\")] syntax",
                ));
            }
        });
    }

    Ok(annotation)
}

#[cfg(test)]
mod tests {
    use bracketed_core::AnnotationArg;
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
    fn no_attribute_returns_none() {
        let attrs = parse_attrs(quote! {});
        assert!(parse_sensitivity(&attrs).unwrap().is_none());
    }

    #[test]
    fn bare_sensitive_is_a_marker() {
        let attrs = parse_attrs(quote! { #[sensitive] });
        let annotation = parse_sensitivity(&attrs).unwrap().unwrap();
        assert_eq!(annotation.name(), "sensitive");
        assert_eq!(annotation.argument, None);
    }

    #[test]
    fn string_literal_is_the_mask() {
        let attrs = parse_attrs(quote! { #[sensitive("***")] });
        let annotation = parse_sensitivity(&attrs).unwrap().unwrap();
        assert_eq!(
            annotation.argument,
            Some(AnnotationArg::Literal("***".to_string()))
        );
    }

    #[test]
    fn constant_path_is_an_expression() {
        let attrs = parse_attrs(quote! { #[sensitive(masks::CARD)] });
        let annotation = parse_sensitivity(&attrs).unwrap().unwrap();
        assert!(matches!(
            annotation.argument,
            Some(AnnotationArg::Expression(ref text)) if text.contains("CARD")
        ));
    }

    #[test]
    fn non_string_literal_is_an_expression() {
        let attrs = parse_attrs(quote! { #[sensitive(123)] });
        let annotation = parse_sensitivity(&attrs).unwrap().unwrap();
        assert_eq!(
            annotation.argument,
            Some(AnnotationArg::Expression("123".to_string()))
        );
    }

    #[test]
    fn multiple_sensitive_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[sensitive]
            #[sensitive("***")]
        });
        let err = parse_sensitivity(&attrs).unwrap_err();
        assert!(err.to_string().contains("multiple"));
    }

    #[test]
    fn name_value_syntax_error() {
        let attrs = parse_attrs(quote! { #[sensitive = "value"] });
        let err = parse_sensitivity(&attrs).unwrap_err();
        assert!(err.to_string().contains("#[sensitive(\"mask\")]"));
    }

    #[test]
    fn empty_list_errors() {
        let attrs = parse_attrs(quote! { #[sensitive()] });
        let err = parse_sensitivity(&attrs).unwrap_err();
        assert!(err.to_string().contains("empty argument list"));
    }

    #[test]
    fn two_arguments_error() {
        let attrs = parse_attrs(quote! { #[sensitive("a", "b")] });
        let err = parse_sensitivity(&attrs).unwrap_err();
        assert!(err.to_string().contains("single mask argument"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(skip)]
        });
        assert!(parse_sensitivity(&attrs).unwrap().is_none());
    }
}
