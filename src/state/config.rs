//! Manager configuration.
//!
//! Configuration is plain data so a game can ship it alongside its other
//! JSON settings. Every field has a default, so `{}` is a valid config.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default number of transitions kept in the history ring.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Settings fixed for the lifetime of one [`StateManager`](super::StateManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Compare state IDs verbatim. When `false`, IDs are lower-cased on
    /// `add`, `switch`, `remove` and every lookup.
    pub case_sensitive: bool,

    /// Transitions retained in the history ring. `0` disables recording.
    pub history_capacity: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ManagerConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Normalize a state ID under this config's case policy.
    ///
    /// Borrows when the ID is already in normal form.
    pub fn normalize<'a>(&self, state_id: &'a str) -> Cow<'a, str> {
        // Titlecase letters are not uppercase but still lower-case to
        // something else, so test the mapping rather than the category.
        let already_lower = state_id
            .chars()
            .all(|c| c.to_lowercase().eq(std::iter::once(c)));
        if self.case_sensitive || already_lower {
            Cow::Borrowed(state_id)
        } else {
            Cow::Owned(state_id.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert!(!config.case_sensitive);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ManagerConfig::from_json(r#"{"case_sensitive": true}"#).unwrap();
        assert_eq!(
            config,
            ManagerConfig {
                case_sensitive: true,
                history_capacity: DEFAULT_HISTORY_CAPACITY,
            }
        );

        let empty = ManagerConfig::from_json("{}").unwrap();
        assert_eq!(empty, ManagerConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ManagerConfig::from_json(r#"{"history_capacity": -1}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid manager config"));
    }

    #[test]
    fn test_normalize() {
        let insensitive = ManagerConfig::default();
        assert_eq!(insensitive.normalize("Run"), "run");
        assert!(matches!(insensitive.normalize("run"), Cow::Borrowed("run")));

        // Titlecase dz (U+01C5) and uppercase DZ (U+01C4) both fold to U+01C6.
        assert_eq!(insensitive.normalize("\u{01C5}"), "\u{01C6}");
        assert_eq!(insensitive.normalize("\u{01C4}"), "\u{01C6}");
        assert!(matches!(insensitive.normalize("\u{01C6}"), Cow::Borrowed(_)));

        let sensitive = ManagerConfig::default().case_sensitive(true);
        assert_eq!(sensitive.normalize("Run"), "Run");
        assert_eq!(sensitive.normalize("\u{01C5}"), "\u{01C5}");
    }
}
