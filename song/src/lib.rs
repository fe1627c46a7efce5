//! # song - Per-Owner Action Dispatcher
//!
//! `song` routes typed actions to callbacks, Flux style. Every owner (a
//! module of the host application) gets its own [`Dispatcher`], handed out
//! by a [`DispatcherRegistry`] that only serves owners its catalog knows.
//!
//! ## Quick Start
//!
//! ```rust
//! use song::prelude::*;
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
//! let dispatcher = registry.get_dispatcher("todos").unwrap();
//!
//! let id = dispatcher
//!     .register(|action: &AddTodo| println!("added {}", action.text))
//!     .unwrap();
//! assert_eq!(id, "D_todos_AddTodo_1");
//!
//! dispatcher.dispatch(&AddTodo { text: "docs".into() }).unwrap();
//! dispatcher.unregister(&id);
//! ```
//!
//! ## Re-entrancy
//!
//! By default a callback that dispatches on its own dispatcher gets
//! [`DispatchError::Reentrant`]. Build the registry with
//! [`ReentrancyPolicy::Allow`] to run nested dispatches inline instead.

#![warn(missing_docs)]

pub use song_core::{
    // Actions
    Action,
    ActionKind,
    // Errors
    BoxError,
    // Callbacks
    Callback,
    CallbackResult,
    DISPATCHER_ID_PREFIX,
    // Dispatch seam
    Dispatch,
    DispatchError,
    // Ids
    DispatcherId,
    RegisterError,
    RegistrationId,
    RegistryError,
    SongError,
};

pub use song_std::{
    ActionFactory, BoundAction, Dispatcher, DispatcherConfig, DispatcherRegistry, Modules,
    OwnerCatalog, ReentrancyPolicy,
};

#[cfg(feature = "inventory")]
pub use song_std::{OwnerDeclaration, declare_owner};

/// Standard callback implementations.
pub mod callbacks {
    pub use song_std::callbacks::LoggingCallback;
}

/// Testing utilities.
pub mod testing {
    pub use song_std::testing::{
        CallbackSpy, CountingCallback, FailingCallback, MockDispatcher, OrderRecorder,
        TaggedCallback,
    };
}

/// Prelude module - common imports for Song.
///
/// # Usage
///
/// ```rust,ignore
/// use song::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Action, BoundAction, Callback, Dispatch, DispatchError, Dispatcher, DispatcherConfig,
        DispatcherRegistry, Modules, ReentrancyPolicy, RegistrationId, RegistryError,
    };
}

#[cfg(feature = "macros")]
pub use song_macros::Action;

#[cfg(feature = "inventory")]
pub use inventory;
