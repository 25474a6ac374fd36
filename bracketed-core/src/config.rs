//! Default redaction text.
//!
//! The default mask is resolved once per run from the `BRACKETED_REDACTED_VALUE`
//! key and threaded through calls as a plain value.

use std::collections::HashMap;

/// Mask used when neither the member nor the configuration provides one.
pub const DEFAULT_MASK: &str = "[REDACTED]";

/// Configuration key (and environment variable) holding the default mask.
pub const CONFIG_KEY: &str = "BRACKETED_REDACTED_VALUE";

/// Process- or project-wide redaction settings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactionConfig {
    default_mask: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MASK)
    }
}

impl RedactionConfig {
    pub fn new(default_mask: impl Into<String>) -> Self {
        Self {
            default_mask: default_mask.into(),
        }
    }

    /// Resolves [`CONFIG_KEY`] through `lookup`.
    ///
    /// A present key wins even when its value is empty; an absent key falls
    /// back to [`DEFAULT_MASK`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(CONFIG_KEY).map_or_else(Self::default, Self::new)
    }

    /// Resolves [`CONFIG_KEY`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves [`CONFIG_KEY`] from a key-value option set.
    pub fn from_options<S: std::hash::BuildHasher>(options: &HashMap<String, String, S>) -> Self {
        Self::from_lookup(|key| options.get(key).cloned())
    }

    pub fn default_mask(&self) -> &str {
        &self.default_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_falls_back_to_redacted() {
        let config = RedactionConfig::from_lookup(|_| None);
        assert_eq!(config.default_mask(), "[REDACTED]");
        assert_eq!(config, RedactionConfig::default());
    }

    #[test]
    fn lookup_receives_well_known_key() {
        let config = RedactionConfig::from_lookup(|key| {
            assert_eq!(key, "BRACKETED_REDACTED_VALUE");
            Some("<hidden>".to_string())
        });
        assert_eq!(config.default_mask(), "<hidden>");
    }

    #[test]
    fn empty_value_is_respected() {
        let config = RedactionConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config.default_mask(), "");
    }

    #[test]
    fn options_map_is_consulted() {
        let mut options = HashMap::new();
        options.insert(CONFIG_KEY.to_string(), "###".to_string());
        assert_eq!(RedactionConfig::from_options(&options).default_mask(), "###");

        let empty: HashMap<String, String> = HashMap::new();
        assert_eq!(
            RedactionConfig::from_options(&empty).default_mask(),
            DEFAULT_MASK
        );
    }
}
