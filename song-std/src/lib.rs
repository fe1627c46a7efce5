//! # song-std
//!
//! Standard implementations for the Song action dispatcher.
//!
//! This crate provides:
//! - **Dispatching**: [`Dispatcher`], one per owner, with an explicit
//!   Idle/Dispatching state machine
//! - **Owner lookup**: [`DispatcherRegistry`] and the [`OwnerCatalog`] it
//!   consults, usually a [`Modules`] set
//! - **Configuration**: [`DispatcherConfig`], [`ReentrancyPolicy`]
//! - **Action factories**: [`ActionFactory`], [`BoundAction`]
//! - **Standard callbacks**: Logging
//! - **Testing utilities**: spies, counters and a mock dispatcher

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use song_core;

// Modules
pub mod callbacks;
pub mod config;
pub mod dispatcher;
pub mod factory;
pub mod owners;
pub mod registry;
pub mod testing;

pub use config::{DispatcherConfig, ReentrancyPolicy};
pub use dispatcher::Dispatcher;
pub use factory::{ActionFactory, BoundAction};
pub use owners::{Modules, OwnerCatalog};
pub use registry::DispatcherRegistry;

#[cfg(feature = "inventory")]
pub use inventory;
#[cfg(feature = "inventory")]
pub use owners::OwnerDeclaration;
