//! Runtime rendering of live instances.
//!
//! Output layout:
//!
//! ```text
//! [Name: member = value, list = [1, 2], map = [{k = v}], secret = [REDACTED]]
//! ```
//!
//! Values are written with `Display` and no formatter flags. Collection
//! elements are neither redacted nor null-checked individually. Sensitive
//! members are never read from the instance.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Write},
};

use thiserror::Error;

use crate::{
    config::RedactionConfig,
    descriptor::{MemberDescriptor, MemberKind, TypeDescriptor},
};

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("`{type_name}` has no readable member `{member}`")]
    MissingMember { type_name: String, member: String },
    #[error("member `{member}` is not nullable but its value is null")]
    UnexpectedNull { member: String },
    #[error("member `{member}` is {expected} but its value is {found}")]
    KindMismatch {
        member: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("member name `{member}` is not a valid field identifier")]
    InvalidMemberName { member: String },
    #[error(transparent)]
    Format(#[from] fmt::Error),
}

/// A member value as exposed by an [`InstanceAccessor`].
#[derive(Clone)]
pub enum Value<'a> {
    Null,
    Scalar(&'a dyn fmt::Display),
    Sequence(Vec<&'a dyn fmt::Display>),
    Map(Vec<(&'a dyn fmt::Display, &'a dyn fmt::Display)>),
}

impl<'a> Value<'a> {
    pub fn scalar<T: fmt::Display>(value: &'a T) -> Self {
        Self::Scalar(value)
    }

    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: fmt::Display + 'a,
    {
        Self::Sequence(
            items
                .into_iter()
                .map(|item| -> &dyn fmt::Display { item })
                .collect(),
        )
    }

    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: fmt::Display + 'a,
        V: fmt::Display + 'a,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(key, value)| -> (&dyn fmt::Display, &dyn fmt::Display) { (key, value) })
                .collect(),
        )
    }

    const fn describe(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "a scalar",
            Self::Sequence(_) => "a sequence",
            Self::Map(_) => "a map",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(value) => write!(f, "Scalar({value})"),
            Self::Sequence(items) => f
                .debug_list()
                .entries(items.iter().map(|item| item.to_string()))
                .finish(),
            Self::Map(pairs) => f
                .debug_map()
                .entries(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
                .finish(),
        }
    }
}

/// Read access to an instance's members by name.
///
/// Implementations return `None` for unknown members. The derive never
/// exposes sensitive members through this trait.
pub trait InstanceAccessor {
    fn read(&self, member: &str) -> Option<Value<'_>>;
}

impl<A: InstanceAccessor + ?Sized> InstanceAccessor for &A {
    fn read(&self, member: &str) -> Option<Value<'_>> {
        (**self).read(member)
    }
}

impl<'v, S: std::hash::BuildHasher> InstanceAccessor for HashMap<String, Value<'v>, S> {
    fn read(&self, member: &str) -> Option<Value<'_>> {
        self.get(member).cloned()
    }
}

impl<'v> InstanceAccessor for BTreeMap<String, Value<'v>> {
    fn read(&self, member: &str) -> Option<Value<'_>> {
        self.get(member).cloned()
    }
}

/// Types that carry their own descriptor, implemented by `#[derive(Bracketed)]`.
pub trait Bracketed: InstanceAccessor {
    fn type_descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// Renders `self` at runtime with the default mask from `config`.
    fn render_with(&self, config: &RedactionConfig) -> Result<String, RenderError>
    where
        Self: Sized,
    {
        render(&Self::type_descriptor(), self, config.default_mask())
    }
}

/// A way of turning a descriptor into output.
pub trait RenderBackend {
    type Output;

    fn render(
        &self,
        descriptor: &TypeDescriptor,
        config: &RedactionConfig,
    ) -> Result<Self::Output, RenderError>;
}

/// Backend that renders one live instance to a `String`.
pub struct RuntimeRenderer<'a, A: ?Sized> {
    instance: &'a A,
}

impl<'a, A: InstanceAccessor + ?Sized> RuntimeRenderer<'a, A> {
    pub const fn new(instance: &'a A) -> Self {
        Self { instance }
    }
}

impl<A: InstanceAccessor + ?Sized> RenderBackend for RuntimeRenderer<'_, A> {
    type Output = String;

    fn render(
        &self,
        descriptor: &TypeDescriptor,
        config: &RedactionConfig,
    ) -> Result<String, RenderError> {
        render(descriptor, self.instance, config.default_mask())
    }
}

/// Renders `instance` according to `descriptor`.
pub fn render<A: InstanceAccessor + ?Sized>(
    descriptor: &TypeDescriptor,
    instance: &A,
    default_mask: &str,
) -> Result<String, RenderError> {
    let mut out = String::new();
    write!(out, "[{}: ", descriptor.name())?;
    for (index, member) in descriptor.members().iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write!(out, "{} = ", member.name())?;
        write_member(&mut out, descriptor, member, instance, default_mask)?;
    }
    out.push(']');
    Ok(out)
}

fn write_member<A: InstanceAccessor + ?Sized>(
    out: &mut String,
    descriptor: &TypeDescriptor,
    member: &MemberDescriptor,
    instance: &A,
    default_mask: &str,
) -> Result<(), RenderError> {
    if let Some(mask) = member.redaction_text(default_mask) {
        out.push_str(mask);
        return Ok(());
    }

    let value = instance
        .read(member.name())
        .ok_or_else(|| RenderError::MissingMember {
            type_name: descriptor.qualified_name().to_string(),
            member: member.name().to_string(),
        })?;

    match (member.kind(), value) {
        (_, Value::Null) if member.is_nullable() => out.push_str("null"),
        (_, Value::Null) => {
            return Err(RenderError::UnexpectedNull {
                member: member.name().to_string(),
            });
        }
        (MemberKind::Scalar, Value::Scalar(value)) => write!(out, "{value}")?,
        (MemberKind::Enumerable, Value::Sequence(items)) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write!(out, "{item}")?;
            }
            out.push(']');
        }
        (MemberKind::Dictionary, Value::Map(pairs)) => {
            out.push('[');
            for (index, (key, value)) in pairs.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write!(out, "{{{key} = {value}}}")?;
            }
            out.push(']');
        }
        (kind, other) => {
            return Err(RenderError::KindMismatch {
                member: member.name().to_string(),
                expected: kind.as_str(),
                found: other.describe(),
            });
        }
    }
    Ok(())
}
