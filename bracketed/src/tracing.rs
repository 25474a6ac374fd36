//! Adapters for emitting bracketed strings through `tracing`.
//!
//! # Example
//!
//! ```ignore
//! use bracketed::tracing::TracingBracketedExt;
//!
//! tracing::info!(user = %user.tracing_bracketed());
//! ```

use std::fmt;

use tracing::field::{DisplayValue, display};

use crate::{Bracketed, RedactionConfig};

/// Extension trait for logging derived types as `tracing` display values.
pub trait TracingBracketedExt {
    /// The `Display` output, masked with the compile-time default.
    fn tracing_bracketed(&self) -> DisplayValue<String>;

    /// The runtime rendering, masked with the default from `config`.
    ///
    /// A rendering failure is logged in place of the value.
    fn tracing_bracketed_with(&self, config: &RedactionConfig) -> DisplayValue<String>;
}

impl<T> TracingBracketedExt for T
where
    T: Bracketed + fmt::Display,
{
    fn tracing_bracketed(&self) -> DisplayValue<String> {
        display(self.to_string())
    }

    fn tracing_bracketed_with(&self, config: &RedactionConfig) -> DisplayValue<String> {
        let text = self
            .render_with(config)
            .unwrap_or_else(|err| format!("Failed to render bracketed value: {err}"));
        display(text)
    }
}
