//! State management module.
//!
//! - `handler` - Callbacks for one named state
//! - `manager` - Registry, active state and transitions
//! - `freeze` - Timer that temporarily blocks switching
//! - `history` - Bounded log of state changes
//! - `config` - Per-manager settings (case policy, history size)
//! - `outcome` - Results of switch and exit requests
//! - `error` - Config loading errors
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       StateManager<A>                         │
//! │                                                               │
//! │  registry: id ──▶ Box<dyn StateHandler<A>>                    │
//! │  current:  Option<id>   (looked up in registry, never owned)  │
//! │                                                               │
//! │  ┌──────────────┐  ┌───────────────────┐  ┌───────────────┐   │
//! │  │ FreezeTimer  │  │ TransitionHistory │  │ ManagerConfig │   │
//! │  │ gates switch │  │ from ─▶ to, cause │  │ case policy   │   │
//! │  └──────────────┘  └───────────────────┘  └───────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//!            ▲ add / switch / exit / remove / freeze
//!            │ update(dt) once per frame
//!        host game loop
//! ```

pub mod config;
pub mod error;
pub mod freeze;
pub mod handler;
pub mod history;
pub mod manager;
pub mod outcome;

// Re-export commonly used types
pub use config::{ManagerConfig, DEFAULT_HISTORY_CAPACITY};
pub use error::ConfigError;
pub use freeze::{FreezeHandle, FreezeTimer};
pub use handler::{Handler, StateHandler};
pub use history::{TransitionCause, TransitionHistory, TransitionRecord};
pub use manager::{ManagerSnapshot, StateManager};
pub use outcome::{ExitOutcome, SwitchOutcome};
