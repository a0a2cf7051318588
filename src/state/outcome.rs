//! Results of transition requests.
//!
//! Transitions are not errors when they do not happen. Callers that need to
//! know why a switch was skipped inspect the outcome; everyone else ignores it.

use std::fmt;

use serde::Serialize;

/// What a call to [`StateManager::switch`](super::StateManager::switch) did.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchOutcome {
    /// The manager is frozen; nothing changed.
    Frozen,

    /// The target is already the active state; nothing changed.
    AlreadyActive,

    /// No state is registered under the target ID; nothing changed.
    UnknownState,

    /// The active state's exit guard refused; it is still active.
    ExitVetoed,

    /// The previous state exited but the target's enter guard refused.
    /// The manager is now unarmed.
    EnterVetoed,

    /// The target state is now active.
    Switched,
}

impl SwitchOutcome {
    pub fn is_switched(self) -> bool {
        matches!(self, Self::Switched)
    }

    /// Whether the active state changed at all (including to unarmed).
    pub fn changed_state(self) -> bool {
        matches!(self, Self::Switched | Self::EnterVetoed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frozen => "frozen",
            Self::AlreadyActive => "already_active",
            Self::UnknownState => "unknown_state",
            Self::ExitVetoed => "exit_vetoed",
            Self::EnterVetoed => "enter_vetoed",
            Self::Switched => "switched",
        }
    }
}

impl fmt::Display for SwitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the exit protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The active state ran its exit callback and was cleared.
    Exited,

    /// No state was active.
    AlreadyExited,

    /// The active state's exit guard refused.
    Vetoed,
}

impl ExitOutcome {
    /// `Exited` and `AlreadyExited` both leave the manager unarmed.
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Vetoed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_outcome_flags() {
        assert!(SwitchOutcome::Switched.is_switched());
        assert!(SwitchOutcome::Switched.changed_state());
        assert!(SwitchOutcome::EnterVetoed.changed_state());
        assert!(!SwitchOutcome::EnterVetoed.is_switched());
        assert!(!SwitchOutcome::Frozen.changed_state());
    }

    #[test]
    fn test_display_matches_serde() {
        for outcome in [
            SwitchOutcome::Frozen,
            SwitchOutcome::AlreadyActive,
            SwitchOutcome::UnknownState,
            SwitchOutcome::ExitVetoed,
            SwitchOutcome::EnterVetoed,
            SwitchOutcome::Switched,
        ] {
            let json = serde_json::to_value(outcome).unwrap();
            assert_eq!(json, serde_json::json!(outcome.to_string()));
        }
    }

    #[test]
    fn test_exit_outcome_success() {
        assert!(ExitOutcome::Exited.is_success());
        assert!(ExitOutcome::AlreadyExited.is_success());
        assert!(!ExitOutcome::Vetoed.is_success());
    }
}
