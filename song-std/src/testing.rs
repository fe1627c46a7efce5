//! Testing utilities for Song.
//!
//! This module provides helpers that make testing dispatch code easier.
//!
//! # Features
//!
//! - [`CallbackSpy`]: A callback that records every action it receives
//! - [`CountingCallback`]: A callback that only counts invocations
//! - [`OrderRecorder`]: Records the order in which tagged callbacks run
//! - [`FailingCallback`]: A callback that always fails
//! - [`MockDispatcher`]: A [`Dispatch`] implementation that records what it
//!   was asked to dispatch

use song_core::{Action, BoxError, Callback, Dispatch, DispatchError};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Callback Spy
// ============================================================================

/// A callback that records all actions it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust,ignore
/// let spy = CallbackSpy::<AddTodo>::new();
/// dispatcher.register_callback::<AddTodo, _>(spy.clone())?;
///
/// dispatcher.dispatch(&AddTodo::new("a"))?;
///
/// assert_eq!(spy.call_count(), 1);
/// ```
pub struct CallbackSpy<A: Clone> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A: Clone> CallbackSpy<A> {
    /// Create a spy with an empty record.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the received actions.
    pub fn calls(&self) -> Vec<A> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of received actions.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether at least one action was received.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Clear the record.
    pub fn reset(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<A: Clone> Default for CallbackSpy<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Clone for CallbackSpy<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<A: Action + Clone> Callback<A> for CallbackSpy<A> {
    fn call(&self, action: &A) -> Result<(), BoxError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action.clone());
        Ok(())
    }
}

// ============================================================================
// Counting Callback
// ============================================================================

/// A callback that counts invocations, for any action type.
#[derive(Clone, Default)]
pub struct CountingCallback {
    count: Arc<AtomicUsize>,
}

impl CountingCallback {
    /// Create a new counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A: Action> Callback<A> for CountingCallback {
    fn call(&self, _action: &A) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Order Recorder
// ============================================================================

/// Records the order in which tagged callbacks run.
///
/// ```rust,ignore
/// let order = OrderRecorder::new();
/// dispatcher.register_callback::<Ping, _>(order.tagged("first"))?;
/// dispatcher.register_callback::<Ping, _>(order.tagged("second"))?;
/// dispatcher.dispatch(&Ping)?;
/// assert_eq!(order.order(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct OrderRecorder {
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends `tag` each time it runs.
    pub fn tagged(&self, tag: &'static str) -> TaggedCallback {
        TaggedCallback {
            tag,
            order: self.order.clone(),
        }
    }

    /// The tags recorded so far.
    pub fn order(&self) -> Vec<&'static str> {
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Callback produced by [`OrderRecorder::tagged`].
#[derive(Clone)]
pub struct TaggedCallback {
    tag: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl<A: Action> Callback<A> for TaggedCallback {
    fn call(&self, _action: &A) -> Result<(), BoxError> {
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.tag);
        Ok(())
    }
}

// ============================================================================
// Failing Callback
// ============================================================================

/// A callback that always returns an error with the given message.
#[derive(Debug, Clone)]
pub struct FailingCallback {
    message: String,
}

impl FailingCallback {
    /// Create a callback failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<A: Action> Callback<A> for FailingCallback {
    fn call(&self, _action: &A) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Mock Dispatcher
// ============================================================================

/// A [`Dispatch`] implementation that records the names of the actions it
/// receives instead of delivering them.
#[derive(Clone, Default)]
pub struct MockDispatcher {
    dispatched: Arc<Mutex<Vec<&'static str>>>,
}

impl MockDispatcher {
    /// Create a mock with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of dispatched actions, in order.
    pub fn dispatched(&self) -> Vec<&'static str> {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of dispatched actions.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Dispatch for MockDispatcher {
    fn dispatch<A: Action>(&self, _action: &A) -> Result<(), DispatchError> {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(A::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dispatcher;

    #[derive(Clone, Debug, PartialEq)]
    struct Step(u8);

    impl Action for Step {
        const NAME: &'static str = "Step";
    }

    #[test]
    fn test_spy_records_actions() {
        let dispatcher = Dispatcher::new("app");
        let spy = CallbackSpy::<Step>::new();
        dispatcher.register_callback::<Step, _>(spy.clone()).unwrap();

        dispatcher.dispatch_all([Step(1), Step(2)]).unwrap();

        assert_eq!(spy.calls(), vec![Step(1), Step(2)]);
        spy.reset();
        assert!(!spy.was_called());
    }

    #[test]
    fn test_order_recorder() {
        let dispatcher = Dispatcher::new("app");
        let order = OrderRecorder::new();
        dispatcher.register_callback::<Step, _>(order.tagged("a")).unwrap();
        dispatcher.register_callback::<Step, _>(order.tagged("b")).unwrap();

        dispatcher.dispatch(&Step(0)).unwrap();

        assert_eq!(order.order(), vec!["a", "b"]);
    }

    #[test]
    fn test_failing_callback() {
        let dispatcher = Dispatcher::new("app");
        dispatcher
            .register_callback::<Step, _>(FailingCallback::new("broken"))
            .unwrap();
        let err = dispatcher.dispatch(&Step(0)).unwrap_err();
        assert!(matches!(err, DispatchError::Callback { .. }));
    }
}
