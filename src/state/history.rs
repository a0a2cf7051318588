//! Transition history.
//!
//! A bounded log of every change to the active state, newest last. Useful
//! for debug overlays and for asserting on state flow in tests.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why the active state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    /// `switch` completed.
    Switch,
    /// `switch` exited the old state, then the target refused to enter.
    EnterVetoed,
    /// `exit` was called directly.
    Exit,
    /// The active state was removed from the registry.
    Remove,
}

/// One change of the active state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionRecord {
    /// State that was active before, `None` if unarmed.
    pub from: Option<String>,
    /// State active afterwards, `None` if unarmed.
    pub to: Option<String>,
    pub cause: TransitionCause,
    pub at: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new(from: Option<String>, to: Option<String>, cause: TransitionCause) -> Self {
        Self {
            from,
            to,
            cause,
            at: Utc::now(),
        }
    }

    /// Convert to JSON for debug output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "from": self.from,
            "to": self.to,
            "cause": self.cause,
            "at": self.at.to_rfc3339(),
        })
    }
}

/// Ring buffer of [`TransitionRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl TransitionHistory {
    /// Create a history holding at most `capacity` records.
    /// A capacity of zero records nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn push(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.records.iter().map(|r| r.to_json()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(from: Option<&str>, to: Option<&str>) -> TransitionRecord {
        TransitionRecord::new(
            from.map(String::from),
            to.map(String::from),
            TransitionCause::Switch,
        )
    }

    #[test]
    fn test_push_and_evict() {
        let mut history = TransitionHistory::with_capacity(2);
        history.push(record(None, Some("idle")));
        history.push(record(Some("idle"), Some("run")));
        history.push(record(Some("run"), Some("jump")));

        assert_eq!(history.len(), 2);
        let targets: Vec<_> = history.iter().map(|r| r.to.as_deref()).collect();
        assert_eq!(targets, vec![Some("run"), Some("jump")]);
        assert_eq!(history.last().and_then(|r| r.from.as_deref()), Some("run"));
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut history = TransitionHistory::with_capacity(0);
        history.push(record(None, Some("idle")));
        assert!(history.is_empty());
    }

    #[test]
    fn test_to_json() {
        let rec = TransitionRecord::new(Some("idle".into()), None, TransitionCause::Exit);
        let json = rec.to_json();
        assert_eq!(json["from"], "idle");
        assert_eq!(json["to"], serde_json::Value::Null);
        assert_eq!(json["cause"], "exit");
        assert!(json["at"].is_string());
    }
}
