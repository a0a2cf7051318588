//! Frame State Library
//!
//! A small named-state manager for a game's per-frame update loop.
//!
//! # Overview
//!
//! - **Named states** - Register handlers under string IDs. IDs are
//!   case-insensitive unless the manager is configured otherwise.
//!
//! - **Guarded transitions** - `can_exit` and `can_enter` guards can veto a
//!   switch. Exit always completes (or is vetoed) before enter is attempted.
//!
//! - **Per-frame dispatch** - `update(dt)` forwards to the active state only.
//!
//! - **Freeze** - Block switching for a stretch of frame time, then run a
//!   callback.
//!
//! # Design Principles
//!
//! 1. **No errors for control flow** - A switch that does not happen reports
//!    a [`SwitchOutcome`]; nothing panics or returns `Err`.
//!
//! 2. **One source of truth** - Only the active ID is stored; its handler is
//!    looked up in the registry every time.
//!
//! 3. **Single-threaded** - Driven from one game loop. No locks, no I/O.
//!
//! # Example
//!
//! ```rust
//! use frame_state::{Handler, StateManager, SwitchOutcome};
//!
//! let mut states: StateManager<i32> = StateManager::new();
//!
//! states.add("idle", Handler::<i32>::new().on_enter(|_| println!("I")));
//! states.add(
//!     "run",
//!     Handler::<i32>::new()
//!         .enter_when(|speed| *speed > 0)
//!         .on_update(|dt| println!("running for {}s", dt)),
//! );
//!
//! assert_eq!(states.switch("run", 5), SwitchOutcome::Switched);
//! states.update(0.016);
//!
//! // A guard refusal after the old state exited leaves nothing active.
//! states.switch("idle", 0);
//! assert_eq!(states.switch("run", -1), SwitchOutcome::EnterVetoed);
//! assert_eq!(states.current_id(), None);
//!
//! // Frozen managers ignore switches until enough frame time has passed.
//! states.freeze(0.5, || println!("thawed"));
//! assert_eq!(states.switch("idle", 0), SwitchOutcome::Frozen);
//! states.update(0.5);
//! assert_eq!(states.switch("idle", 0), SwitchOutcome::Switched);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
