//! Freeze timer.
//!
//! A freeze blocks `switch` for a fixed duration. The timer is driven by the
//! same `delta_time` the host passes to `update`, so it counts game time and
//! pauses when the frame loop pauses.
//!
//! Arming a new freeze cancels the pending one: its callback is dropped
//! without running, and its [`FreezeHandle`] goes stale.

use std::fmt;

use tracing::debug;

/// Identifies one arming of the freeze timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreezeHandle(u64);

/// Pending freeze and its after-freeze callback.
#[derive(Default)]
pub struct FreezeTimer {
    pending: Option<PendingFreeze>,
    /// Bumped on every arm so old handles never match.
    generation: u64,
}

struct PendingFreeze {
    handle: FreezeHandle,
    remaining: f32,
    on_thaw: Box<dyn FnOnce()>,
}

impl FreezeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a freeze of `duration` seconds, replacing any pending one.
    ///
    /// A non-positive or NaN duration thaws on the next tick.
    pub fn arm(&mut self, duration: f32, on_thaw: impl FnOnce() + 'static) -> FreezeHandle {
        if let Some(old) = self.pending.take() {
            debug!(remaining = old.remaining, "replacing pending freeze");
        }

        self.generation += 1;
        let handle = FreezeHandle(self.generation);
        let remaining = if duration.is_nan() { 0.0 } else { duration.max(0.0) };

        self.pending = Some(PendingFreeze {
            handle,
            remaining,
            on_thaw: Box::new(on_thaw),
        });
        handle
    }

    /// Cancel the pending freeze without running its callback.
    ///
    /// Returns `true` if a freeze was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel only if `handle` is the current arming.
    pub fn cancel_handle(&mut self, handle: FreezeHandle) -> bool {
        match &self.pending {
            Some(pending) if pending.handle == handle => self.cancel(),
            _ => false,
        }
    }

    /// Advance by `delta_time` seconds. Fires the callback once the
    /// duration has elapsed and returns `true` on that tick.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        pending.remaining -= delta_time;
        if pending.remaining > 0.0 {
            return false;
        }

        // Clear before calling out so the callback observes a thawed timer.
        if let Some(pending) = self.pending.take() {
            debug!("freeze elapsed");
            (pending.on_thaw)();
        }
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.pending.is_some()
    }

    /// Seconds left on the pending freeze.
    pub fn remaining(&self) -> Option<f32> {
        self.pending.as_ref().map(|p| p.remaining.max(0.0))
    }

    pub fn handle(&self) -> Option<FreezeHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }
}

impl fmt::Debug for FreezeTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreezeTimer")
            .field("frozen", &self.is_frozen())
            .field("remaining", &self.remaining())
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        (fired, move || f.set(f.get() + 1))
    }

    #[test]
    fn test_thaws_after_duration() {
        let mut timer = FreezeTimer::new();
        let (fired, cb) = counter();
        timer.arm(1.0, cb);

        assert!(timer.is_frozen());
        assert!(!timer.tick(0.5));
        assert!(timer.is_frozen());
        assert!(timer.tick(0.5));
        assert!(!timer.is_frozen());
        assert_eq!(fired.get(), 1);

        // Further ticks do nothing.
        assert!(!timer.tick(10.0));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_rearm_replaces() {
        let mut timer = FreezeTimer::new();
        let (first, cb1) = counter();
        let (second, cb2) = counter();

        let h1 = timer.arm(1.0, cb1);
        timer.tick(0.9);
        let h2 = timer.arm(1.0, cb2);
        assert_ne!(h1, h2);

        timer.tick(0.5);
        assert!(timer.is_frozen());
        timer.tick(0.5);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_cancel_handle() {
        let mut timer = FreezeTimer::new();
        let (fired, cb) = counter();
        let stale = timer.arm(1.0, || {});
        let live = timer.arm(1.0, cb);

        assert!(!timer.cancel_handle(stale));
        assert!(timer.is_frozen());
        assert!(timer.cancel_handle(live));
        assert!(!timer.is_frozen());

        timer.tick(2.0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_degenerate_durations() {
        let mut timer = FreezeTimer::new();
        timer.arm(f32::NAN, || {});
        assert_eq!(timer.remaining(), Some(0.0));
        assert!(timer.tick(0.0));

        timer.arm(-3.0, || {});
        assert!(timer.tick(0.016));

        timer.arm(f32::INFINITY, || {});
        assert!(!timer.tick(1.0e9));
        assert!(timer.is_frozen());
    }
}
