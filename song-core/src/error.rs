//! Error types for Song.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SongError`] - Top-level error type for all Song operations
//! - [`RegistryError`] - Errors looking up an owner's dispatcher
//! - [`RegisterError`] - Errors validating a registration
//! - [`DispatchError`] - Errors during dispatch

use crate::id::RegistrationId;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Song operations.
#[derive(Error, Debug)]
pub enum SongError {
    /// An owner lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A registration was rejected.
    #[error("register error: {0}")]
    Register(#[from] RegisterError),

    /// A dispatch failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors that can occur when resolving an owner's dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The owner is not known to the owner catalog.
    #[error("unknown owner: {0:?}")]
    UnknownOwner(String),

    /// The owner name cannot be used.
    #[error("invalid owner name: {0:?}")]
    InvalidOwnerName(String),
}

/// Errors that can occur when registering a callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The action name is empty or contains whitespace.
    #[error("invalid action name: {0:?}")]
    InvalidActionName(String),
}

/// Errors that can occur during dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// `dispatch` was called while the dispatcher was already dispatching.
    #[error("cannot dispatch in the middle of a dispatch on {dispatcher}")]
    Reentrant {
        /// Id of the busy dispatcher.
        dispatcher: String,
    },

    /// A callback returned an error.
    #[error("callback {id} failed")]
    Callback {
        /// Registration id of the failing callback.
        id: RegistrationId,
        /// The callback's error.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Whether this error was caused by a re-entrant dispatch.
    pub fn is_reentrant(&self) -> bool {
        matches!(self, DispatchError::Reentrant { .. })
    }
}
