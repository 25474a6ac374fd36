//! Derive macro for `bracketed`.
//!
//! `#[derive(Bracketed)]` lowers a struct into the engine's raw metadata,
//! classifies it with `bracketed-core`, and emits:
//! - a `Display` impl whose body comes from the source emitter
//! - an `InstanceAccessor` impl exposing the non-sensitive members
//! - a `Bracketed` impl returning the type descriptor
//!
//! Masks are resolved while expanding, so sensitive values never reach the
//! generated code.

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
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use bracketed_core::{CONFIG_KEY, Classifier, RedactionConfig, SourceEmitter};
use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input};

mod container;
mod derive_struct;
mod generics;
mod strategy;
mod types;
mod warning;
use container::parse_container_options;
use derive_struct::{accessibility_literal, accessor_arm, derive_struct, member_literal};
use generics::{add_display_bounds, collect_generics_from_type};

/// Derives `Display`, `bracketed::InstanceAccessor` and `bracketed::Bracketed`
/// for a struct.
///
/// # Container Attributes
///
/// - `#[bracketed(include_private)]` - render non-public fields as well. By
///   default only `pub` fields are rendered.
///
/// # Field Attributes
///
/// - **No annotation**: the field is rendered with `Display`. `Option<T>`
///   fields render `null` when `None`; collections render as `[a, b]` and maps
///   as `[{k = v}]`.
/// - `#[sensitive]`: the field renders as the default mask.
/// - `#[sensitive("***")]`: the field renders as `***`.
/// - `#[sensitive(EXPR)]`: any other argument falls back to the default mask.
///
/// The default mask is read from the `BRACKETED_REDACTED_VALUE` environment
/// variable when the macro expands, falling back to `[REDACTED]`.
///
/// Fields whose type cannot be classified (type macros) are skipped with a
/// compile-time warning. Enums and unions are rejected at compile time.
#[proc_macro_derive(Bracketed, attributes(bracketed, sensitive))]
pub fn derive_bracketed(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn crate_root() -> TokenStream {
    match crate_name("bracketed") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::bracketed },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        vis,
        generics,
        data,
        attrs,
    } = input;

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Bracketed` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Bracketed` can only be derived for structs",
            ));
        }
    };

    let options = parse_container_options(&attrs)?;
    let shape = derive_struct(&ident, &vis, &data, options)?;
    let described = Classifier::default()
        .describe(&shape.raw)
        .ok_or_else(|| syn::Error::new(Span::call_site(), "struct was not described"))?;
    let descriptor = described.descriptor;
    let warnings = described.diagnostics.iter().map(|diagnostic| {
        let span = shape
            .field(&diagnostic.member)
            .map_or_else(Span::call_site, |field| field.span);
        warning::skipped_member(diagnostic, span)
    });

    // Rustc does not track env reads made by the macro itself; `option_env!`
    // in the output makes the mask variable a rebuild trigger.
    let config = RedactionConfig::from_env();
    let display_body = SourceEmitter
        .emit(&descriptor, &config)
        .map_err(|err| syn::Error::new(ident.span(), err.to_string()))?;

    let crate_root = crate_root();
    let mut used_generics = Vec::new();
    let mut arms = Vec::new();
    for member in descriptor.members().iter().filter(|m| !m.is_sensitive()) {
        let Some(field) = shape.field(member.name()) else {
            continue;
        };
        collect_generics_from_type(&field.ty, &generics, &mut used_generics);
        arms.push(accessor_arm(&crate_root, member, field));
    }
    let members = descriptor
        .members()
        .iter()
        .map(|member| member_literal(&crate_root, member));

    let name = ident.to_string();
    let type_accessibility = accessibility_literal(&crate_root, descriptor.accessibility());
    let bounded = add_display_bounds(generics, &used_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::core::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #display_body
            }
        }

        impl #impl_generics #crate_root::InstanceAccessor for #ident #ty_generics #where_clause {
            #[allow(clippy::match_single_binding)]
            fn read(&self, member: &str) -> ::core::option::Option<#crate_root::Value<'_>> {
                match member {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics #crate_root::Bracketed for #ident #ty_generics #where_clause {
            fn type_descriptor() -> #crate_root::TypeDescriptor {
                #crate_root::TypeDescriptor::new(
                    ::core::concat!(::core::module_path!(), "::", #name),
                    #type_accessibility,
                    [#(#members),*],
                )
            }
        }

        const _: ::core::option::Option<&str> = ::core::option_env!(#CONFIG_KEY);

        #(#warnings)*
    })
}
