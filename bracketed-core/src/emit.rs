//! Ahead-of-time emission of the bracketed layout as Rust source.
//!
//! The emitted code reads `self.<member>` directly. It assumes nullable
//! members are `Option`s and that collections expose `.iter()` (pairs for
//! dictionaries). Masks are baked in as string literals, so sensitive members
//! are never touched by the generated code.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::{
    config::RedactionConfig,
    descriptor::{MemberDescriptor, MemberKind, TypeDescriptor},
    render::{RenderBackend, RenderError},
};

// Strict and reserved keywords that need `r#` to be used as field names.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be raw identifiers at all.
const RESERVED_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// A generated source file for one type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmittedSource {
    pub file_name: String,
    pub source: String,
}

/// Backend that emits the body of `Display::fmt` for a descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceEmitter;

impl SourceEmitter {
    /// Emits the statements of `fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result`.
    pub fn emit(
        self,
        descriptor: &TypeDescriptor,
        config: &RedactionConfig,
    ) -> Result<TokenStream, RenderError> {
        let header = format!("[{}: ", descriptor.name());
        let mut body = quote! { f.write_str(#header)?; };

        for (index, member) in descriptor.members().iter().enumerate() {
            let separator = if index > 0 { ", " } else { "" };
            let label = format!("{separator}{} = ", member.name());
            body.extend(quote! { f.write_str(#label)?; });
            body.extend(emit_member(member, config.default_mask())?);
        }

        body.extend(quote! { f.write_str("]") });
        Ok(body)
    }

    /// Emits a standalone `Display` impl for a non-generic type.
    pub fn emit_source(
        self,
        descriptor: &TypeDescriptor,
        config: &RedactionConfig,
    ) -> Result<EmittedSource, RenderError> {
        let ident = field_ident(descriptor.name()).ok_or_else(|| RenderError::InvalidMemberName {
            member: descriptor.name().to_string(),
        })?;
        let body = self.emit(descriptor, config)?;
        let tokens = quote! {
            impl ::core::fmt::Display for #ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #body
                }
            }
        };
        Ok(EmittedSource {
            file_name: format!("{}.bracketed.rs", descriptor.name()),
            source: tokens.to_string(),
        })
    }
}

impl RenderBackend for SourceEmitter {
    type Output = TokenStream;

    fn render(
        &self,
        descriptor: &TypeDescriptor,
        config: &RedactionConfig,
    ) -> Result<TokenStream, RenderError> {
        self.emit(descriptor, config)
    }
}

fn emit_member(member: &MemberDescriptor, default_mask: &str) -> Result<TokenStream, RenderError> {
    if let Some(mask) = member.redaction_text(default_mask) {
        return Ok(quote! { f.write_str(#mask)?; });
    }

    let access = member_access(member.name()).ok_or_else(|| RenderError::InvalidMemberName {
        member: member.name().to_string(),
    })?;

    if member.is_nullable() {
        let present = emit_value(member.kind(), &quote! { value });
        Ok(quote! {
            match &#access {
                ::core::option::Option::Some(value) => { #present }
                ::core::option::Option::None => f.write_str("null")?,
            }
        })
    } else {
        Ok(emit_value(member.kind(), &access))
    }
}

fn emit_value(kind: MemberKind, target: &TokenStream) -> TokenStream {
    match kind {
        MemberKind::Scalar => quote! { ::core::write!(f, "{}", #target)?; },
        MemberKind::Enumerable => quote! {
            f.write_str("[")?;
            for (index, item) in #target.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                ::core::write!(f, "{}", item)?;
            }
            f.write_str("]")?;
        },
        MemberKind::Dictionary => quote! {
            f.write_str("[")?;
            for (index, (key, value)) in #target.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                ::core::write!(f, "{{{} = {}}}", key, value)?;
            }
            f.write_str("]")?;
        },
    }
}

fn member_access(name: &str) -> Option<TokenStream> {
    if let Ok(index) = name.parse::<usize>() {
        let index = Literal::usize_unsuffixed(index);
        return Some(quote! { self.#index });
    }
    let ident = field_ident(name)?;
    Some(quote! { self.#ident })
}

fn field_ident(name: &str) -> Option<Ident> {
    let bare = name.strip_prefix("r#").unwrap_or(name);
    let mut chars = bare.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '_') || !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    if RESERVED_PATH_KEYWORDS.contains(&bare) {
        return None;
    }
    if RAW_KEYWORDS.contains(&bare) {
        Some(Ident::new_raw(bare, Span::call_site()))
    } else {
        Some(Ident::new(bare, Span::call_site()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{descriptor::Accessibility, redaction::Sensitivity};

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    fn descriptor(members: Vec<MemberDescriptor>) -> TypeDescriptor {
        TypeDescriptor::new("app::TestClass", Accessibility::Public, members)
    }

    #[test]
    fn emits_header_labels_and_scalar_writes() {
        let tokens = SourceEmitter
            .emit(
                &descriptor(vec![
                    MemberDescriptor::new("name", MemberKind::Scalar),
                    MemberDescriptor::new("age", MemberKind::Scalar),
                ]),
                &RedactionConfig::default(),
            )
            .unwrap();
        let code = compact(&tokens);
        assert!(code.contains(r#"f.write_str("[TestClass:")"#));
        assert!(code.contains(r#"f.write_str("name=")"#));
        assert!(code.contains(r#"f.write_str(",age=")"#));
        assert!(code.contains(r#"::core::write!(f,"{}",self.age)"#));
        assert!(code.ends_with(r#"f.write_str("]")"#));
    }

    #[test]
    fn sensitive_member_is_a_literal_and_never_accessed() {
        let tokens = SourceEmitter
            .emit(
                &descriptor(vec![
                    MemberDescriptor::new("password", MemberKind::Scalar)
                        .with_sensitivity(Sensitivity::Sensitive { mask: None }),
                    MemberDescriptor::new("card", MemberKind::Dictionary).with_sensitivity(
                        Sensitivity::Sensitive {
                            mask: Some("***".to_string()),
                        },
                    ),
                ]),
                &RedactionConfig::new("<hidden>"),
            )
            .unwrap();
        let code = compact(&tokens);
        assert!(code.contains(r#"f.write_str("<hidden>")"#));
        assert!(code.contains(r#"f.write_str("***")"#));
        assert!(!code.contains("self.password"));
        assert!(!code.contains("self.card"));
    }

    #[test]
    fn nullable_members_match_on_option() {
        let tokens = SourceEmitter
            .emit(
                &descriptor(vec![
                    MemberDescriptor::new("numbers", MemberKind::Enumerable).with_nullable(true),
                ]),
                &RedactionConfig::default(),
            )
            .unwrap();
        let code = compact(&tokens);
        assert!(code.contains("match&self.numbers"));
        assert!(code.contains(r#"::core::option::Option::None=>f.write_str("null")?"#));
        assert!(code.contains("value.iter().enumerate()"));
    }

    #[test]
    fn tuple_and_keyword_members_get_valid_access() {
        assert_eq!(compact(&member_access("0").unwrap()), "self.0");
        assert_eq!(compact(&member_access("type").unwrap()), "self.r#type");
        assert_eq!(compact(&member_access("r#type").unwrap()), "self.r#type");
        assert!(member_access("self").is_none());
        assert!(member_access("not valid").is_none());
    }

    #[test]
    fn invalid_member_name_is_an_error() {
        let err = SourceEmitter
            .emit(
                &descriptor(vec![MemberDescriptor::new("two words", MemberKind::Scalar)]),
                &RedactionConfig::default(),
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidMemberName { .. }));
    }

    #[test]
    fn emit_source_names_file_after_type() {
        let emitted = SourceEmitter
            .emit_source(
                &descriptor(vec![MemberDescriptor::new("name", MemberKind::Scalar)]),
                &RedactionConfig::default(),
            )
            .unwrap();
        assert_eq!(emitted.file_name, "TestClass.bracketed.rs");
        let compacted: String = emitted.source.split_whitespace().collect();
        assert!(compacted.starts_with("impl::core::fmt::DisplayforTestClass"));
    }
}
