//! Engine behind `bracketed`: descriptors, classification, redaction and rendering.
//!
//! This crate separates:
//! - **Raw metadata**: what a metadata provider knows about a type's members
//!   (`RawType`, `RawMember`).
//! - **Descriptors**: pure value snapshots of how each member renders
//!   (`TypeDescriptor`, `MemberDescriptor`).
//! - **Backends**: the runtime renderer and the source emitter, which turn a
//!   descriptor into the bracketed text layout.
//!
//! What this crate does:
//! - classifies members into scalar, enumerable and dictionary strategies
//! - resolves `#[sensitive]` markers into masks
//! - caches descriptors by structural fingerprint
//!
//! What it does not do:
//! - read configuration files
//! - walk nested values or redact collection elements individually
//!
//! The `Bracketed` derive macro lives in `bracketed-derive`, and both are
//! re-exported from the `bracketed` crate.

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
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

mod cache;
mod cancel;
mod classify;
mod config;
mod descriptor;
mod emit;
mod metadata;
mod pipeline;
mod redaction;
mod render;

pub use cache::{CacheError, CacheStats, DescriptorCache, Fingerprint};
pub use cancel::CancellationToken;
pub use classify::{ClassifyError, ClassifyOptions, Classifier, Described, Diagnostic};
pub use config::{CONFIG_KEY, DEFAULT_MASK, RedactionConfig};
pub use descriptor::{Accessibility, MemberDescriptor, MemberKind, TypeDescriptor};
pub use emit::{EmittedSource, SourceEmitter};
pub use metadata::{
    Annotation, AnnotationArg, DeclaredType, GenerateOptions, MemberSlot, MetadataProvider,
    Nullability, RawMember, RawType, TypeShape,
};
pub use pipeline::{Pipeline, PipelineError, TypeOutcome};
pub use redaction::{RedactionResolver, SENSITIVE_MARKER, Sensitivity};
pub use render::{
    Bracketed, InstanceAccessor, RenderBackend, RenderError, RuntimeRenderer, Value, render,
};
