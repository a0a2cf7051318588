//! State handlers.
//!
//! A state is a bundle of up to five callbacks. Anything that implements
//! [`StateHandler`] can be registered; every method has a default, so a
//! missing callback behaves as a no-op and a missing guard always passes.
//!
//! For quick wiring from game code there is [`Handler`], a record of optional
//! closures built with a small builder API.

use std::fmt;

/// Callbacks for one named state.
///
/// `A` is the argument value forwarded from `switch`, `exit` and `remove`.
pub trait StateHandler<A = ()> {
    /// Called when the state becomes active.
    fn enter(&mut self, _args: &A) {}

    /// Called when the state is deactivated.
    fn exit(&mut self, _args: &A) {}

    /// Called once per frame while the state is active.
    fn update(&mut self, _delta_time: f32) {}

    /// Guard consulted before entering. Returning `false` aborts the switch.
    fn can_enter(&mut self, _args: &A) -> bool {
        true
    }

    /// Guard consulted before exiting. Returning `false` keeps the state active.
    fn can_exit(&mut self, _args: &A) -> bool {
        true
    }
}

type ArgsFn<A> = Box<dyn FnMut(&A)>;
type GuardFn<A> = Box<dyn FnMut(&A) -> bool>;
type UpdateFn = Box<dyn FnMut(f32)>;

/// Closure-backed state handler.
///
/// ```rust
/// use frame_state::Handler;
///
/// let handler = Handler::<i32>::new()
///     .on_enter(|speed| println!("running at {}", speed))
///     .enter_when(|speed| *speed > 0);
/// assert!(handler.has_enter());
/// assert!(!handler.has_update());
/// ```
pub struct Handler<A = ()> {
    enter: Option<ArgsFn<A>>,
    exit: Option<ArgsFn<A>>,
    update: Option<UpdateFn>,
    can_enter: Option<GuardFn<A>>,
    can_exit: Option<GuardFn<A>>,
}

impl<A> Handler<A> {
    /// Create a handler with no callbacks.
    pub fn new() -> Self {
        Self {
            enter: None,
            exit: None,
            update: None,
            can_enter: None,
            can_exit: None,
        }
    }

    pub fn on_enter(mut self, f: impl FnMut(&A) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl FnMut(&A) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Guard the enter path. See [`StateHandler::can_enter`].
    pub fn enter_when(mut self, f: impl FnMut(&A) -> bool + 'static) -> Self {
        self.can_enter = Some(Box::new(f));
        self
    }

    /// Guard the exit path. See [`StateHandler::can_exit`].
    pub fn exit_when(mut self, f: impl FnMut(&A) -> bool + 'static) -> Self {
        self.can_exit = Some(Box::new(f));
        self
    }

    // Capability checks

    pub fn has_enter(&self) -> bool {
        self.enter.is_some()
    }

    pub fn has_exit(&self) -> bool {
        self.exit.is_some()
    }

    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn has_enter_guard(&self) -> bool {
        self.can_enter.is_some()
    }

    pub fn has_exit_guard(&self) -> bool {
        self.can_exit.is_some()
    }
}

impl<A> Default for Handler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("enter", &self.has_enter())
            .field("exit", &self.has_exit())
            .field("update", &self.has_update())
            .field("can_enter", &self.has_enter_guard())
            .field("can_exit", &self.has_exit_guard())
            .finish()
    }
}

impl<A> StateHandler<A> for Handler<A> {
    fn enter(&mut self, args: &A) {
        if let Some(f) = self.enter.as_mut() {
            f(args);
        }
    }

    fn exit(&mut self, args: &A) {
        if let Some(f) = self.exit.as_mut() {
            f(args);
        }
    }

    fn update(&mut self, delta_time: f32) {
        if let Some(f) = self.update.as_mut() {
            f(delta_time);
        }
    }

    fn can_enter(&mut self, args: &A) -> bool {
        match self.can_enter.as_mut() {
            Some(guard) => guard(args),
            None => true,
        }
    }

    fn can_exit(&mut self, args: &A) -> bool {
        match self.can_exit.as_mut() {
            Some(guard) => guard(args),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_empty_handler_is_noop() {
        let mut handler: Handler<i32> = Handler::new();
        handler.enter(&1);
        handler.exit(&1);
        handler.update(0.016);
        assert!(handler.can_enter(&1));
        assert!(handler.can_exit(&1));
    }

    #[test]
    fn test_closures_are_invoked() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
        let mut handler = Handler::<i32>::new()
            .on_enter(move |n| l1.borrow_mut().push(format!("enter {}", n)))
            .on_exit(move |n| l2.borrow_mut().push(format!("exit {}", n)))
            .on_update(move |dt| l3.borrow_mut().push(format!("update {}", dt)));

        handler.enter(&3);
        handler.update(0.5);
        handler.exit(&4);

        assert_eq!(*log.borrow(), vec!["enter 3", "update 0.5", "exit 4"]);
    }

    #[test]
    fn test_guards() {
        let mut handler = Handler::<i32>::new()
            .enter_when(|n| *n > 0)
            .exit_when(|n| *n != 7);

        assert!(handler.can_enter(&5));
        assert!(!handler.can_enter(&-1));
        assert!(handler.can_exit(&0));
        assert!(!handler.can_exit(&7));
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let handler: Handler = Handler::new().on_update(|_| {});
        assert_eq!(
            format!("{:?}", handler),
            "Handler { enter: false, exit: false, update: true, can_enter: false, can_exit: false }"
        );
    }

    struct Counter {
        frames: u32,
    }

    impl StateHandler for Counter {
        fn update(&mut self, _delta_time: f32) {
            self.frames += 1;
        }
    }

    #[test]
    fn test_trait_defaults() {
        let mut counter = Counter { frames: 0 };
        counter.enter(&());
        counter.update(0.1);
        counter.update(0.1);
        assert!(counter.can_enter(&()));
        assert_eq!(counter.frames, 2);
    }
}
