//! Action factories.
//!
//! An [`ActionFactory`] binds freshly constructed actions to a dispatcher so
//! the resulting [`BoundAction`] can dispatch itself. The action keeps its own
//! fields and methods: a bound action dereferences to it.
//!
//! # Example
//!
//! ```rust
//! use song_core::Action;
//! use song_std::{DispatcherRegistry, Modules};
//!
//! struct AddTodo {
//!     text: String,
//! }
//!
//! impl Action for AddTodo {
//!     const NAME: &'static str = "AddTodo";
//! }
//!
//! let registry = DispatcherRegistry::new(Modules::from_names(["todos"]).unwrap());
//! let add_todo = registry.action_factory::<AddTodo>("todos").unwrap();
//!
//! let action = add_todo.create(AddTodo { text: "write docs".into() });
//! assert_eq!(action.text, "write docs");
//! action.dispatch().unwrap();
//! ```

use crate::dispatcher::Dispatcher;
use song_core::{Action, Dispatch, DispatchError};
use std::{
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    sync::Arc,
};

/// Creates actions of type `A` bound to a dispatcher.
pub struct ActionFactory<A, D = Dispatcher> {
    dispatcher: Arc<D>,
    _phantom: PhantomData<fn() -> A>,
}

impl<A: Action, D: Dispatch> ActionFactory<A, D> {
    /// Create a factory for `dispatcher`.
    pub fn new(dispatcher: Arc<D>) -> Self {
        Self {
            dispatcher,
            _phantom: PhantomData,
        }
    }

    /// Bind `action` to this factory's dispatcher.
    pub fn create(&self, action: A) -> BoundAction<A, D> {
        BoundAction {
            action,
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }

    /// The dispatcher actions are bound to.
    pub fn dispatcher(&self) -> &Arc<D> {
        &self.dispatcher
    }
}

impl<A, D> Clone for ActionFactory<A, D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            _phantom: PhantomData,
        }
    }
}

impl<A: Action, D: fmt::Debug> fmt::Debug for ActionFactory<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionFactory")
            .field("action", &A::NAME)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// An action together with the dispatcher it belongs to.
pub struct BoundAction<A, D = Dispatcher> {
    action: A,
    dispatcher: Arc<D>,
}

impl<A: Action, D: Dispatch> BoundAction<A, D> {
    /// Dispatch this action through its dispatcher.
    pub fn dispatch(&self) -> Result<(), DispatchError> {
        self.dispatcher.dispatch(&self.action)
    }

    /// The dispatcher this action is bound to.
    pub fn dispatcher(&self) -> &Arc<D> {
        &self.dispatcher
    }

    /// Unbind, returning the action.
    pub fn into_inner(self) -> A {
        self.action
    }
}

impl<A, D> Deref for BoundAction<A, D> {
    type Target = A;

    fn deref(&self) -> &Self::Target {
        &self.action
    }
}

impl<A, D> DerefMut for BoundAction<A, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.action
    }
}

impl<A, D> AsRef<A> for BoundAction<A, D> {
    fn as_ref(&self) -> &A {
        &self.action
    }
}

impl<A: fmt::Debug, D> fmt::Debug for BoundAction<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundAction").field(&self.action).finish()
    }
}
