//! Struct-specific `Bracketed` derivation.
//!
//! Struct fields are first lowered into the engine's raw metadata so the
//! derive classifies them exactly like any other metadata provider would.
//! The resulting descriptor then drives the accessor arms and the
//! descriptor literal.

use bracketed_core::{
    Accessibility, GenerateOptions, MemberDescriptor, MemberKind, RawMember, RawType, Sensitivity,
};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{DataStruct, Result, Visibility, ext::IdentExt, spanned::Spanned};

use crate::{container::ContainerOptions, strategy::parse_sensitivity, types::declared_type};

/// A struct field together with the expression that reaches it.
pub(crate) struct FieldAccess {
    pub(crate) name: String,
    pub(crate) access: TokenStream,
    pub(crate) ty: syn::Type,
    pub(crate) span: Span,
}

pub(crate) struct StructShape {
    pub(crate) raw: RawType,
    pub(crate) fields: Vec<FieldAccess>,
}

impl StructShape {
    pub(crate) fn field(&self, name: &str) -> Option<&FieldAccess> {
        self.fields.iter().find(|field| field.name == name)
    }
}

pub(crate) fn derive_struct(
    name: &Ident,
    vis: &Visibility,
    data: &DataStruct,
    options: ContainerOptions,
) -> Result<StructShape> {
    let mut members = Vec::new();
    let mut fields = Vec::new();

    for (index, field) in data.fields.iter().enumerate() {
        let (member_name, access) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), quote! { self.#ident }),
            None => {
                let index = syn::Index::from(index);
                (index.index.to_string(), quote! { self.#index })
            }
        };

        let annotations = parse_sensitivity(&field.attrs)?.into_iter().collect();
        let member = match declared_type(&field.ty) {
            Some(declared) => RawMember::field(member_name.clone(), declared),
            None => RawMember::untyped(member_name.clone()),
        };
        members.push(
            member
                .with_visibility(accessibility(&field.vis))
                .with_annotations(annotations),
        );
        fields.push(FieldAccess {
            name: member_name,
            access,
            ty: field.ty.clone(),
            span: field.ty.span(),
        });
    }

    let raw = RawType::new(name.unraw().to_string(), members)
        .with_accessibility(accessibility(vis))
        .with_options(GenerateOptions {
            include_private: options.include_private,
        });
    Ok(StructShape { raw, fields })
}

pub(crate) fn accessibility(vis: &Visibility) -> Accessibility {
    match vis {
        Visibility::Public(_) => Accessibility::Public,
        Visibility::Restricted(restricted) if restricted.path.is_ident("crate") => {
            Accessibility::Crate
        }
        Visibility::Restricted(_) => Accessibility::Restricted,
        Visibility::Inherited => Accessibility::Private,
    }
}

/// Match arm of `InstanceAccessor::read` for a non-sensitive member.
pub(crate) fn accessor_arm(
    crate_root: &TokenStream,
    member: &MemberDescriptor,
    field: &FieldAccess,
) -> TokenStream {
    let name = member.name();
    let access = &field.access;
    let value = match member.kind() {
        MemberKind::Scalar => quote! { #crate_root::Value::scalar(value) },
        MemberKind::Enumerable => quote! { #crate_root::Value::sequence(value.iter()) },
        MemberKind::Dictionary => quote! { #crate_root::Value::map(value.iter()) },
    };

    if member.is_nullable() {
        quote! {
            #name => ::core::option::Option::Some(match &#access {
                ::core::option::Option::Some(value) => #value,
                ::core::option::Option::None => #crate_root::Value::Null,
            })
        }
    } else {
        quote! {
            #name => {
                let value = &#access;
                ::core::option::Option::Some(#value)
            }
        }
    }
}

/// Expression constructing `member` at runtime.
pub(crate) fn member_literal(crate_root: &TokenStream, member: &MemberDescriptor) -> TokenStream {
    let name = member.name();
    let kind = match member.kind() {
        MemberKind::Scalar => quote! { Scalar },
        MemberKind::Enumerable => quote! { Enumerable },
        MemberKind::Dictionary => quote! { Dictionary },
    };
    let nullable = member.is_nullable();
    let sensitivity = match member.sensitivity() {
        Sensitivity::Plain => quote! { #crate_root::Sensitivity::Plain },
        Sensitivity::Sensitive { mask: Some(mask) } => quote! {
            #crate_root::Sensitivity::Sensitive {
                mask: ::core::option::Option::Some(::std::string::String::from(#mask)),
            }
        },
        Sensitivity::Sensitive { mask: None } => quote! {
            #crate_root::Sensitivity::Sensitive { mask: ::core::option::Option::None }
        },
    };
    quote! {
        #crate_root::MemberDescriptor::new(#name, #crate_root::MemberKind::#kind)
            .with_nullable(#nullable)
            .with_sensitivity(#sensitivity)
    }
}

pub(crate) fn accessibility_literal(
    crate_root: &TokenStream,
    accessibility: Accessibility,
) -> TokenStream {
    let variant = match accessibility {
        Accessibility::Public => quote! { Public },
        Accessibility::Crate => quote! { Crate },
        Accessibility::Restricted => quote! { Restricted },
        Accessibility::Private => quote! { Private },
    };
    quote! { #crate_root::Accessibility::#variant }
}

#[cfg(test)]
mod tests {
    use bracketed_core::{AnnotationArg, Nullability, TypeShape};
    use syn::{Data, DeriveInput};

    use super::*;

    fn shape(tokens: TokenStream) -> StructShape {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        let Data::Struct(data) = &input.data else {
            panic!("expected a struct");
        };
        derive_struct(&input.ident, &input.vis, data, ContainerOptions::default()).unwrap()
    }

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    #[test]
    fn named_fields_become_raw_members() {
        let shape = shape(quote! {
            pub struct User {
                pub name: String,
                #[sensitive("***")]
                pub password: String,
                pub(crate) nickname: Option<String>,
                token: String,
            }
        });

        assert_eq!(shape.raw.qualified_name, "User");
        assert_eq!(shape.raw.accessibility, Accessibility::Public);
        let members = &shape.raw.members;
        assert_eq!(members.len(), 4);
        assert_eq!(
            members[1].annotations[0].argument,
            Some(AnnotationArg::Literal("***".to_string()))
        );
        assert_eq!(members[2].visibility, Accessibility::Crate);
        assert_eq!(
            members[2].declared_type.as_ref().map(|d| d.nullability),
            Some(Nullability::Optional)
        );
        assert_eq!(members[3].visibility, Accessibility::Private);
    }

    #[test]
    fn tuple_fields_are_named_by_index() {
        let shape = shape(quote! {
            pub struct Pair(pub i32, pub Vec<u8>);
        });
        let names: Vec<_> = shape.raw.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["0", "1"]);
        assert_eq!(compact(&shape.fields[1].access), "self.1");
        assert_eq!(
            shape.raw.members[1].declared_type.as_ref().map(|d| d.shape),
            Some(TypeShape::Sequence)
        );
    }

    #[test]
    fn raw_identifiers_are_unraw_names() {
        let shape = shape(quote! {
            struct Token { pub r#type: String }
        });
        assert_eq!(shape.raw.members[0].name, "type");
        assert_eq!(compact(&shape.fields[0].access), "self.r#type");
        assert_eq!(shape.raw.accessibility, Accessibility::Private);
    }

    #[test]
    fn macro_typed_field_is_untyped() {
        let shape = shape(quote! {
            pub struct Odd { pub weird: my_type!() }
        });
        assert!(shape.raw.members[0].declared_type.is_none());
    }

    #[test]
    fn nullable_accessor_matches_on_option() {
        let root = quote! { ::bracketed };
        let member = MemberDescriptor::new("nickname", MemberKind::Scalar).with_nullable(true);
        let field = FieldAccess {
            name: "nickname".to_string(),
            access: quote! { self.nickname },
            ty: syn::parse_quote!(Option<String>),
            span: Span::call_site(),
        };
        let arm = compact(&accessor_arm(&root, &member, &field));
        assert!(arm.starts_with("\"nickname\"=>::core::option::Option::Some(match&self.nickname"));
        assert!(arm.contains("::bracketed::Value::Null"));
    }

    #[test]
    fn member_literal_carries_the_mask() {
        let root = quote! { ::bracketed };
        let member = MemberDescriptor::new("card", MemberKind::Dictionary).with_sensitivity(
            Sensitivity::Sensitive {
                mask: Some("****".to_string()),
            },
        );
        let literal = compact(&member_literal(&root, &member));
        assert!(literal.contains("::bracketed::MemberKind::Dictionary"));
        assert!(literal.contains("String::from(\"****\")"));
        assert!(literal.contains(".with_nullable(false)"));
    }
}
