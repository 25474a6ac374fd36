//! Value snapshots of a type's renderable shape.
//!
//! Descriptors never hold on to the metadata they were extracted from. Two
//! descriptors built from equal inputs compare equal and hash identically, so
//! either can stand in for the other in a cache.

use std::sync::Arc;

use crate::redaction::Sensitivity;

/// Rendering strategy of a single member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    /// Written with its own `Display` text.
    Scalar,
    /// Written as `[a, b, c]`.
    Enumerable,
    /// Written as `[{k = v}, ...]`.
    Dictionary,
}

impl MemberKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Enumerable => "enumerable",
            Self::Dictionary => "dictionary",
        }
    }
}

/// Declared visibility of a type or member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accessibility {
    /// `pub`
    Public,
    /// `pub(crate)`
    Crate,
    /// `pub(super)`, `pub(self)` or `pub(in path)`
    Restricted,
    /// No visibility qualifier.
    #[default]
    Private,
}

/// One renderable member of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDescriptor {
    name: String,
    kind: MemberKind,
    nullable: bool,
    sensitivity: Sensitivity,
}

impl MemberDescriptor {
    /// Creates a non-nullable, non-sensitive member.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
            sensitivity: Sensitivity::Plain,
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub const fn sensitivity(&self) -> &Sensitivity {
        &self.sensitivity
    }

    pub const fn is_sensitive(&self) -> bool {
        self.sensitivity.is_sensitive()
    }

    /// Member-specific mask, if the sensitivity marker carried one.
    pub fn mask(&self) -> Option<&str> {
        self.sensitivity.mask()
    }

    /// Text written in place of the value: the member mask, else `default_mask`.
    ///
    /// Returns `None` for members that are not sensitive.
    pub fn redaction_text<'a>(&'a self, default_mask: &'a str) -> Option<&'a str> {
        self.is_sensitive()
            .then(|| self.mask().unwrap_or(default_mask))
    }
}

/// One renderable type: identity plus its members in declaration order.
///
/// Members are shared behind an `Arc`, so clones handed out by a cache are
/// cheap. Equality and hashing look at the member contents, not the pointer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    qualified_name: String,
    accessibility: Accessibility,
    members: Arc<[MemberDescriptor]>,
}

impl TypeDescriptor {
    pub fn new(
        qualified_name: impl Into<String>,
        accessibility: Accessibility,
        members: impl IntoIterator<Item = MemberDescriptor>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            accessibility,
            members: members.into_iter().collect(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Unqualified type name, as written in the rendered output.
    pub fn name(&self) -> &str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub const fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|member| member.name() == name)
    }
}
