//! Adapters for emitting bracketed strings through `slog`.
//!
//! The logged value is always the rendered, masked string; the instance
//! itself is never handed to the serializer. Rendering failures are logged
//! as a placeholder string rather than propagated, so logging stays
//! infallible.

use std::fmt;

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{Bracketed, RedactionConfig};

/// A rendered bracketed string ready to be logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketedValue(String);

impl BracketedValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BracketedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl SlogValue for BracketedValue {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.0)
    }
}

/// Extension trait for logging derived types with `slog`.
///
/// ## Example
/// ```ignore
/// use bracketed::slog::SlogBracketedExt;
///
/// info!(logger, "login"; "user" => user.slog_bracketed());
/// ```
pub trait SlogBracketedExt: Bracketed + fmt::Display + Sized {
    /// Logs the `Display` output, which uses the mask fixed at compile time.
    fn slog_bracketed(&self) -> BracketedValue {
        BracketedValue(self.to_string())
    }

    /// Logs the runtime rendering with the default mask from `config`.
    fn slog_bracketed_with(&self, config: &RedactionConfig) -> BracketedValue {
        BracketedValue(
            self.render_with(config)
                .unwrap_or_else(|err| format!("Failed to render bracketed value: {err}")),
        )
    }
}

impl<T> SlogBracketedExt for T where T: Bracketed + fmt::Display {}
