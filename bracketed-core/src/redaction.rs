//! Resolution of sensitivity markers into masks.
//!
//! A marker with a string literal argument carries its own mask. A marker
//! without an argument, or with an argument that is not a literal, falls back
//! to the default mask, which is only substituted at render time so one
//! descriptor serves every `RedactionConfig`.

use crate::metadata::{AnnotationArg, RawMember};

/// Default name of the sensitivity marker (`#[sensitive]`).
pub const SENSITIVE_MARKER: &str = "sensitive";

/// Whether a member's value may appear in output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sensitivity {
    /// The value is written.
    #[default]
    Plain,
    /// The value is replaced by `mask`, or by the default mask when `None`.
    Sensitive { mask: Option<String> },
}

impl Sensitivity {
    pub const fn is_sensitive(&self) -> bool {
        matches!(self, Self::Sensitive { .. })
    }

    pub fn mask(&self) -> Option<&str> {
        match self {
            Self::Plain => None,
            Self::Sensitive { mask } => mask.as_deref(),
        }
    }
}

/// Maps a member's annotations to its [`Sensitivity`].
#[derive(Clone, Debug)]
pub struct RedactionResolver {
    marker: String,
}

impl Default for RedactionResolver {
    fn default() -> Self {
        Self::new(SENSITIVE_MARKER)
    }
}

impl RedactionResolver {
    /// Recognises annotations whose last path segment equals `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn resolve(&self, member: &RawMember) -> Sensitivity {
        let Some(annotation) = member
            .annotations
            .iter()
            .find(|annotation| annotation.name() == self.marker)
        else {
            return Sensitivity::Plain;
        };

        // Only a literal is trusted as mask text; an expression's source must
        // never reach the output.
        let mask = match &annotation.argument {
            Some(AnnotationArg::Literal(text)) => Some(text.clone()),
            Some(AnnotationArg::Expression(_)) | None => None,
        };
        Sensitivity::Sensitive { mask }
    }
}
