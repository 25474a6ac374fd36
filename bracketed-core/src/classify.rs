//! Member classification.
//!
//! ## Kind Mapping
//!
//! | Declared shape | Kind         |
//! |----------------|--------------|
//! | `Text`         | `Scalar`     |
//! | `KeyValue`     | `Dictionary` |
//! | `Sequence`     | `Enumerable` |
//! | `Opaque`       | `Scalar`     |
//!
//! Text is checked first, so strings never render as character sequences.
//!
//! ## Nullability
//!
//! One policy for fields and properties alike: `Optional` and `Annotated`
//! types are nullable, everything else is not. An unannotated reference is
//! treated as non-null.

use std::fmt;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{trace, warn};

use crate::{
    descriptor::{Accessibility, MemberDescriptor, MemberKind, TypeDescriptor},
    metadata::{DeclaredType, RawMember, RawType, TypeShape},
    redaction::RedactionResolver,
};

/// Classification failure for a single member.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("member `{member}` has no declared type")]
    MalformedType { member: String },
}

/// Which members are eligible for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassifyOptions {
    /// Admit non-public instance members as well.
    pub include_private: bool,
}

/// A member that was skipped while describing a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub type_name: String,
    pub member: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} skipped: {}",
            self.type_name, self.member, self.message
        )
    }
}

/// Result of describing one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Described {
    pub descriptor: TypeDescriptor,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns raw members into [`MemberDescriptor`]s.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    options: ClassifyOptions,
    resolver: RedactionResolver,
}

impl Classifier {
    pub fn new(options: ClassifyOptions) -> Self {
        Self {
            options,
            resolver: RedactionResolver::default(),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: RedactionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub const fn options(&self) -> ClassifyOptions {
        self.options
    }

    /// Whether `member` takes part in rendering at all.
    ///
    /// Static members never do; non-public ones only with `include_private`.
    pub fn admits(&self, member: &RawMember) -> bool {
        if member.is_static {
            return false;
        }
        match member.visibility {
            Accessibility::Public => true,
            Accessibility::Crate | Accessibility::Restricted | Accessibility::Private => {
                self.options.include_private
            }
        }
    }

    /// Classifies an admitted member.
    pub fn classify(&self, member: &RawMember) -> Result<MemberDescriptor, ClassifyError> {
        let declared = member
            .declared_type
            .as_ref()
            .ok_or_else(|| ClassifyError::MalformedType {
                member: member.name.clone(),
            })?;

        Ok(MemberDescriptor::new(member.name.clone(), kind_of(declared))
            .with_nullable(declared.nullability.is_nullable())
            .with_sensitivity(self.resolver.resolve(member)))
    }

    /// Builds the descriptor of an annotated type.
    ///
    /// Returns `None` for types without the qualifying annotation. Members
    /// that fail to classify are skipped and reported as diagnostics.
    pub fn describe(&self, raw: &RawType) -> Option<Described> {
        let options = raw.options?;
        let classifier = Self {
            options: ClassifyOptions {
                include_private: self.options.include_private || options.include_private,
            },
            resolver: self.resolver.clone(),
        };

        let admitted: Vec<&RawMember> = raw
            .members
            .iter()
            .filter(|member| classifier.admits(member))
            .collect();

        // Indexed parallel collect keeps declaration order.
        let results: Vec<_> = admitted
            .par_iter()
            .map(|member| classifier.classify(member))
            .collect();

        let mut members = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for (member, result) in admitted.iter().zip(results) {
            match result {
                Ok(descriptor) => members.push(descriptor),
                Err(err) => {
                    warn!(type_name = %raw.qualified_name, member = %member.name, "{err}");
                    diagnostics.push(Diagnostic {
                        type_name: raw.qualified_name.clone(),
                        member: member.name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        trace!(
            type_name = %raw.qualified_name,
            members = members.len(),
            skipped = diagnostics.len(),
            "described type"
        );

        Some(Described {
            descriptor: TypeDescriptor::new(raw.qualified_name.clone(), raw.accessibility, members),
            diagnostics,
        })
    }
}

/// Kind of a declared type; the first matching row of the mapping wins.
pub(crate) fn kind_of(declared: &DeclaredType) -> MemberKind {
    match declared.shape {
        TypeShape::Text | TypeShape::Opaque => MemberKind::Scalar,
        TypeShape::KeyValue => MemberKind::Dictionary,
        TypeShape::Sequence => MemberKind::Enumerable,
    }
}
