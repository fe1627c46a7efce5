//! # song-core
//!
//! Core traits and types for the Song action dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines actions or callbacks without needing the full `song-std`
//! implementation.
//!
//! # Building Blocks
//!
//! - [`Action`] - a typed value routed to interested callbacks. Its
//!   [`ActionKind`] is the static identity used both for matching and for
//!   formatting registration ids.
//! - [`Callback`] - something invoked with a reference to a dispatched action.
//!   Plain closures returning `()` or `Result<(), E>` qualify through
//!   [`CallbackResult`].
//! - [`Dispatch`] - the seam through which actions are delivered. Bound
//!   actions talk to their dispatcher only through this trait.
//! - [`DispatcherId`] / [`RegistrationId`] - the string identities handed out
//!   by a dispatcher.
//!
//! # Error Types
//!
//! - [`SongError`] - Top-level error type
//! - [`RegistryError`] - Owner lookup errors
//! - [`RegisterError`] - Registration validation errors
//! - [`DispatchError`] - Dispatch errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod callback;
mod dispatch;
mod error;
mod id;

// Re-exports
pub use action::{Action, ActionKind};
pub use callback::{Callback, CallbackResult};
pub use dispatch::Dispatch;
pub use error::{BoxError, DispatchError, RegisterError, RegistryError, SongError};
pub use id::{DISPATCHER_ID_PREFIX, DispatcherId, RegistrationId};
