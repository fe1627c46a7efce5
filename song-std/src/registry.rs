//! Owner → dispatcher registry.
//!
//! The registry hands out one [`Dispatcher`] per recognized owner, creating
//! it on first request and returning the same `Arc` afterwards. It is a plain
//! value: construct it at startup, share it with whatever needs dispatchers,
//! and drop it at shutdown.

use crate::{
    config::DispatcherConfig,
    dispatcher::Dispatcher,
    factory::ActionFactory,
    owners::{Modules, OwnerCatalog, validate_owner_name},
};
use song_core::{Action, RegistryError};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// One dispatcher per owner.
///
/// # Example
///
/// ```rust
/// use song_std::{DispatcherRegistry, Modules};
/// use std::sync::Arc;
///
/// let registry = DispatcherRegistry::new(Modules::from_names(["todos"]).unwrap());
///
/// let first = registry.get_dispatcher("todos").unwrap();
/// let second = registry.get_dispatcher("todos").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(first.id(), "D_todos");
///
/// assert!(registry.get_dispatcher("unknown").is_err());
/// ```
pub struct DispatcherRegistry<C = Modules> {
    catalog: C,
    config: DispatcherConfig,
    dispatchers: Mutex<HashMap<String, Arc<Dispatcher>>>,
}

impl<C: OwnerCatalog> DispatcherRegistry<C> {
    /// Create a registry that recognizes the owners in `catalog`.
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, DispatcherConfig::default())
    }

    /// Create a registry whose dispatchers use `config`.
    pub fn with_config(catalog: C, config: DispatcherConfig) -> Self {
        Self {
            catalog,
            config,
            dispatchers: Mutex::new(HashMap::new()),
        }
    }

    /// Get the dispatcher of `owner`, creating it on first request.
    ///
    /// Fails with [`RegistryError::UnknownOwner`] if the catalog does not
    /// recognize `owner`; no dispatcher is created in that case.
    pub fn get_dispatcher(&self, owner: &str) -> Result<Arc<Dispatcher>, RegistryError> {
        validate_owner_name(owner)?;

        if let Some(dispatcher) = self.lock().get(owner) {
            return Ok(Arc::clone(dispatcher));
        }

        if !self.catalog.contains(owner) {
            #[cfg(feature = "tracing")]
            tracing::warn!(owner, "dispatcher requested for unknown owner");
            return Err(RegistryError::UnknownOwner(owner.to_owned()));
        }

        let dispatcher = self
            .lock()
            .entry(owner.to_owned())
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                tracing::debug!(owner, "created dispatcher");
                Arc::new(Dispatcher::with_config(owner, self.config.clone()))
            })
            .clone();
        Ok(dispatcher)
    }

    /// Create a factory binding actions of type `A` to the dispatcher of
    /// `owner`.
    pub fn action_factory<A: Action>(
        &self,
        owner: &str,
    ) -> Result<ActionFactory<A>, RegistryError> {
        self.get_dispatcher(owner).map(ActionFactory::new)
    }

    /// Whether a dispatcher has been created for `owner`.
    pub fn contains(&self, owner: &str) -> bool {
        self.lock().contains_key(owner)
    }

    /// Owners that have a dispatcher, sorted.
    pub fn owners(&self) -> Vec<String> {
        let mut owners: Vec<String> = self.lock().keys().cloned().collect();
        owners.sort();
        owners
    }

    /// Number of dispatchers created.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no dispatcher has been created yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The owner catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The configuration given to new dispatchers.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Dispatcher>>> {
        self.dispatchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DispatcherRegistry<Modules> {
    fn default() -> Self {
        Self::new(Modules::new())
    }
}

impl<C> fmt::Debug for DispatcherRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dispatchers = self
            .dispatchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut owners: Vec<&String> = dispatchers.keys().collect();
        owners.sort();
        f.debug_struct("DispatcherRegistry")
            .field("owners", &owners)
            .field("config", &self.config)
            .finish()
    }
}
