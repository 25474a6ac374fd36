//! Generic type parameter handling and trait bound management.
//!
//! Only type parameters that appear in rendered fields get a `Display`
//! bound. Sensitive fields are never formatted, and `PhantomData<T>` carries
//! nothing to format, so neither contributes bounds:
//!
//! ```ignore
//! #[derive(Bracketed)]
//! pub struct Tagged<T, K> {
//!     pub value: T,           // T: Display
//!     #[sensitive]
//!     pub key: K,             // no bound on K
//!     pub _kind: PhantomData<K>,
//! }
//! ```

use syn::{Ident, parse_quote};

use crate::types::is_phantom_data;

fn push_if_generic(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if generics.type_params().any(|param| param.ident == *ident)
        && !result.iter().any(|g| g == ident)
    {
        result.push(ident.clone());
    }
}

fn visit_path_arguments(
    args: &syn::PathArguments,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::PathArguments::AngleBracketed(args) = args {
        for arg in &args.args {
            match arg {
                syn::GenericArgument::Type(inner) => visit_type(inner, generics, result),
                syn::GenericArgument::AssocType(assoc) => {
                    visit_type(&assoc.ty, generics, result);
                }
                _ => {}
            }
        }
    }
}

fn visit_type(ty: &syn::Type, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if is_phantom_data(ty) {
        return;
    }
    match ty {
        syn::Type::Path(type_path) => {
            if let Some(qself) = &type_path.qself {
                visit_type(&qself.ty, generics, result);
            }
            for segment in &type_path.path.segments {
                push_if_generic(&segment.ident, generics, result);
                visit_path_arguments(&segment.arguments, generics, result);
            }
        }
        syn::Type::Reference(reference) => visit_type(&reference.elem, generics, result),
        syn::Type::Slice(slice) => visit_type(&slice.elem, generics, result),
        syn::Type::Array(array) => visit_type(&array.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                visit_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => visit_type(&paren.elem, generics, result),
        syn::Type::Group(group) => visit_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Collects the type parameters of `generics` that occur in `ty`.
pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    visit_type(ty, generics, result);
}

/// Adds `Display` bounds to generic parameters used in rendered fields.
pub(crate) fn add_display_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Display));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::{ToTokens, quote};

    use super::*;

    fn generics(tokens: proc_macro2::TokenStream) -> syn::Generics {
        syn::parse2::<syn::DeriveInput>(quote! { struct Dummy #tokens; })
            .expect("should parse as DeriveInput")
            .generics
    }

    fn collect(ty: proc_macro2::TokenStream, generics: &syn::Generics) -> Vec<String> {
        let ty: syn::Type = syn::parse2(ty).expect("should parse as Type");
        let mut used = Vec::new();
        collect_generics_from_type(&ty, generics, &mut used);
        used.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn bare_parameter_is_collected() {
        let generics = generics(quote! { <T, U> });
        assert_eq!(collect(quote! { T }, &generics), ["T"]);
    }

    #[test]
    fn nested_parameters_are_collected_once() {
        let generics = generics(quote! { <K, V> });
        assert_eq!(
            collect(quote! { HashMap<K, Vec<(V, K)>> }, &generics),
            ["K", "V"]
        );
    }

    #[test]
    fn phantom_data_is_skipped() {
        let generics = generics(quote! { <T> });
        assert!(collect(quote! { PhantomData<T> }, &generics).is_empty());
    }

    #[test]
    fn concrete_types_are_ignored() {
        let generics = generics(quote! { <T> });
        assert!(collect(quote! { Vec<String> }, &generics).is_empty());
    }

    #[test]
    fn display_bound_only_on_used_parameters() {
        let generics = generics(quote! { <T, U> });
        let t: Ident = syn::parse_quote!(T);
        let bounded = add_display_bounds(generics, &[t]);
        let params: Vec<String> = bounded
            .type_params()
            .map(|param| param.to_token_stream().to_string().replace(' ', ""))
            .collect();
        assert_eq!(params, ["T:::core::fmt::Display", "U"]);
    }
}
