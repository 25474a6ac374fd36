//! Raw member metadata, as handed over by a metadata provider.
//!
//! The derive macro builds these from `syn` input; other providers may build
//! them by hand or deserialize them from a schema document (with the `serde`
//! feature). Everything here is a plain value: providers must not smuggle
//! handles to their own objects into it.

use crate::descriptor::Accessibility;

/// Structural contract a declared type satisfies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeShape {
    /// The textual scalar type (`String`, `str`, ...).
    Text,
    /// A key-value container.
    KeyValue,
    /// A sequentially iterable container.
    Sequence,
    /// Anything else.
    Opaque,
}

/// How a declared type admits null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Nullability {
    /// A plain value type.
    #[default]
    NotNullable,
    /// A value type wrapped in an explicit optional qualifier (`Option<T>`).
    Optional,
    /// A reference type annotated as nullable.
    Annotated,
    /// A reference type without a nullability annotation.
    Unannotated,
}

impl Nullability {
    /// Unannotated references count as non-null: nullability is opt-in.
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Optional | Self::Annotated)
    }
}

/// Whether a member is a stored field or a computed property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberSlot {
    #[default]
    Field,
    Property,
}

/// The declared type of a member, reduced to what classification needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredType {
    /// Source spelling, kept for diagnostics.
    pub name: String,
    pub shape: TypeShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nullability: Nullability,
}

impl DeclaredType {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            nullability: Nullability::NotNullable,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Text)
    }

    pub fn sequence(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Sequence)
    }

    pub fn key_value(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::KeyValue)
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Opaque)
    }

    #[must_use]
    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }
}

/// Argument carried by an annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationArg {
    /// A string literal, already unescaped.
    Literal(String),
    /// Any other expression, kept as source text.
    Expression(String),
}

/// An attribute attached to a member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Attribute path as written, e.g. `sensitive` or `bracketed::sensitive`.
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub argument: Option<AnnotationArg>,
}

impl Annotation {
    pub fn marker(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            argument: None,
        }
    }

    pub fn with_literal(path: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            argument: Some(AnnotationArg::Literal(literal.into())),
        }
    }

    pub fn with_expression(path: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            argument: Some(AnnotationArg::Expression(expression.into())),
        }
    }

    /// Last segment of the attribute path.
    pub fn name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }
}

/// One member of a type as the provider sees it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawMember {
    pub name: String,
    /// `None` when the provider could not determine the type.
    pub declared_type: Option<DeclaredType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility: Accessibility,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_static: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: MemberSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
}

impl RawMember {
    /// A public instance field.
    pub fn field(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type),
            visibility: Accessibility::Public,
            is_static: false,
            slot: MemberSlot::Field,
            annotations: Vec::new(),
        }
    }

    /// A public instance property.
    pub fn property(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            slot: MemberSlot::Property,
            ..Self::field(name, declared_type)
        }
    }

    /// A public instance member whose type could not be determined.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            declared_type: None,
            ..Self::field(name, DeclaredType::opaque(""))
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Accessibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Options carried by the qualifying annotation on a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerateOptions {
    /// Also render non-public instance members.
    #[cfg_attr(feature = "serde", serde(default))]
    pub include_private: bool,
}

/// A candidate type as the provider sees it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawType {
    pub qualified_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessibility: Accessibility,
    /// `None` when the type is not annotated for rendering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Option<GenerateOptions>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub members: Vec<RawMember>,
}

impl RawType {
    /// An annotated public type with default options.
    pub fn new(qualified_name: impl Into<String>, members: Vec<RawMember>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            accessibility: Accessibility::Public,
            options: Some(GenerateOptions::default()),
            members,
        }
    }

    /// A type without the qualifying annotation.
    pub fn unannotated(qualified_name: impl Into<String>, members: Vec<RawMember>) -> Self {
        Self {
            options: None,
            ..Self::new(qualified_name, members)
        }
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Anything that can list candidate types.
pub trait MetadataProvider {
    fn raw_types(&self) -> Vec<RawType>;
}

impl MetadataProvider for [RawType] {
    fn raw_types(&self) -> Vec<RawType> {
        self.to_vec()
    }
}

impl MetadataProvider for Vec<RawType> {
    fn raw_types(&self) -> Vec<RawType> {
        self.clone()
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn raw_types(&self) -> Vec<RawType> {
        (**self).raw_types()
    }
}
