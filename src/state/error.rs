//! Error types.
//!
//! State transitions never fail with an error: they report a
//! [`SwitchOutcome`](super::SwitchOutcome) or a `bool`. The only fallible
//! entry point is loading a [`ManagerConfig`](super::ManagerConfig).

use thiserror::Error;

/// Failure to load a manager configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid manager config: {0}")]
    Parse(#[from] serde_json::Error),
}
