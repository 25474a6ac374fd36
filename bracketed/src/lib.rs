//! Bracketed, redaction-aware string representations for structs.
//!
//! Deriving [`Bracketed`] gives a struct a `Display` impl of the form
//!
//! ```text
//! [User: name = Ada, roles = [admin, ops], password = [REDACTED]]
//! ```
//!
//! where members marked `#[sensitive]` are replaced by a mask and never read.
//!
//! ```ignore
//! use bracketed::Bracketed;
//!
//! #[derive(Bracketed)]
//! pub struct User {
//!     pub name: String,
//!     pub roles: Vec<String>,
//!     #[sensitive]
//!     pub password: String,
//!     #[sensitive("****")]
//!     pub card: String,
//! }
//! ```
//!
//! What this crate does:
//! - re-exports the engine from `bracketed-core` and the derive macro
//! - renders any [`InstanceAccessor`] against a [`TypeDescriptor`] at runtime
//! - provides logging integrations behind feature flags (`slog`, `tracing`)
//!
//! What it does not do:
//! - walk nested values or redact collection elements individually
//! - read configuration files; the default mask comes from
//!   `BRACKETED_REDACTED_VALUE` or an explicit [`RedactionConfig`]

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

pub use bracketed_core::{
    Accessibility, Annotation, AnnotationArg, CONFIG_KEY, CacheError, CacheStats,
    CancellationToken, Classifier, ClassifyError, ClassifyOptions, DEFAULT_MASK, DeclaredType,
    Described, DescriptorCache, Diagnostic, EmittedSource, Fingerprint, GenerateOptions,
    InstanceAccessor, MemberDescriptor, MemberKind, MemberSlot, MetadataProvider, Nullability,
    Pipeline, PipelineError, RawMember, RawType, RedactionConfig, RedactionResolver,
    RenderBackend, RenderError, RuntimeRenderer, SENSITIVE_MARKER, Sensitivity, SourceEmitter,
    TypeDescriptor, TypeOutcome, TypeShape, Value, render,
};
/// Derive macro generating `Display`, [`InstanceAccessor`] and [`Bracketed`].
pub use bracketed_derive::Bracketed;

/// Types that carry their own descriptor.
///
/// Shares its name with the derive macro, like `Debug` does.
pub use bracketed_core::Bracketed;

#[allow(unused_extern_crates)]
extern crate self as bracketed;

#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "slog")]
pub use slog::{BracketedValue, SlogBracketedExt};
#[cfg(feature = "tracing")]
pub use tracing::TracingBracketedExt;
