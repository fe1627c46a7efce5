//! Per-owner dispatcher.
//!
//! A [`Dispatcher`] keeps an ordered list of registrations, each binding a
//! registration id to a callback for one action kind, and delivers
//! dispatched actions to the callbacks registered for their kind.
//!
//! # Dispatch state
//!
//! A dispatcher is either idle or dispatching. `dispatch` moves it to
//! dispatching, records the registration ids present at that moment (see
//! [`Dispatcher::current_callbacks`]) and returns it to idle on every exit
//! path, including callback errors and panics. A nested `dispatch` is
//! governed by the configured [`ReentrancyPolicy`].
//!
//! # Mutation during dispatch
//!
//! The internal lock is never held while a callback runs. A dispatch invokes
//! the callbacks that matched when it started; callbacks registered during
//! the dispatch wait for the next one, and callbacks unregistered during the
//! dispatch are skipped if they have not run yet.

use crate::config::{DispatcherConfig, ReentrancyPolicy};
use song_core::{
    Action, ActionKind, BoxError, Callback, CallbackResult, Dispatch, DispatchError,
    DispatcherId, RegisterError, RegistrationId,
};
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

type ErasedCallback = Arc<dyn Fn(&dyn Any) -> Result<(), BoxError> + Send + Sync>;

struct Registration {
    id: RegistrationId,
    kind: ActionKind,
    callback: ErasedCallback,
    /// Set by `unregister`; shared with dispatches that captured this entry.
    removed: Arc<AtomicBool>,
}

/// A matching callback captured when a dispatch started.
struct Pending {
    id: RegistrationId,
    callback: ErasedCallback,
    removed: Arc<AtomicBool>,
}

enum DispatchState {
    Idle,
    Dispatching {
        /// Number of dispatch calls currently on the stack.
        depth: usize,
        /// Registration ids present when the outermost dispatch started.
        callbacks: Vec<RegistrationId>,
    },
}

struct Inner {
    registrations: Vec<Registration>,
    type_counters: HashMap<&'static str, u64>,
    state: DispatchState,
}

/// Routes actions of one owner to the callbacks registered for them.
pub struct Dispatcher {
    id: DispatcherId,
    owner: String,
    config: DispatcherConfig,
    inner: Mutex<Inner>,
}

impl Dispatcher {
    /// Create an idle dispatcher for `owner` with the default configuration.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_config(owner, DispatcherConfig::default())
    }

    /// Create an idle dispatcher for `owner`.
    pub fn with_config(owner: impl Into<String>, config: DispatcherConfig) -> Self {
        let owner = owner.into();
        Self {
            id: DispatcherId::for_owner(&owner),
            owner,
            config,
            inner: Mutex::new(Inner {
                registrations: Vec::new(),
                type_counters: HashMap::new(),
                state: DispatchState::Idle,
            }),
        }
    }

    /// The dispatcher id, `D_<owner>`.
    pub fn id(&self) -> &DispatcherId {
        &self.id
    }

    /// The owner this dispatcher belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The configuration this dispatcher was created with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a closure for actions of type `A`.
    ///
    /// Returns the new registration id, `<dispatcher id>_<A::NAME>_<n>` where
    /// `n` counts registrations of that action name, starting at 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use song_core::Action;
    /// use song_std::Dispatcher;
    ///
    /// struct Ping;
    /// impl Action for Ping {
    ///     const NAME: &'static str = "Ping";
    /// }
    ///
    /// let dispatcher = Dispatcher::new("net");
    /// let id = dispatcher.register(|_: &Ping| {}).unwrap();
    /// assert_eq!(id, "D_net_Ping_1");
    /// ```
    pub fn register<A, F, R>(&self, callback: F) -> Result<RegistrationId, RegisterError>
    where
        A: Action,
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: CallbackResult,
    {
        self.register_callback::<A, F>(callback)
    }

    /// Register any [`Callback`] implementation for actions of type `A`.
    pub fn register_callback<A, C>(&self, callback: C) -> Result<RegistrationId, RegisterError>
    where
        A: Action,
        C: Callback<A>,
    {
        let kind = ActionKind::of::<A>();
        if !kind.has_valid_name() {
            return Err(RegisterError::InvalidActionName(kind.name().to_owned()));
        }

        let erased: ErasedCallback = Arc::new(move |action: &dyn Any| {
            match action.downcast_ref::<A>() {
                Some(action) => callback.call(action),
                None => Ok(()),
            }
        });

        let mut inner = self.lock();
        let counter = inner.type_counters.entry(kind.name()).or_insert(0);
        *counter += 1;
        let id = self.id.registration(kind.name(), *counter);
        inner.registrations.push(Registration {
            id: id.clone(),
            kind,
            callback: erased,
            removed: Arc::new(AtomicBool::new(false)),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = %self.id, registration = %id, "registered callback");

        Ok(id)
    }

    /// Remove a registration.
    ///
    /// Returns whether a registration was removed; unknown ids are ignored.
    pub fn unregister<I>(&self, id: &I) -> bool
    where
        I: AsRef<str> + ?Sized,
    {
        let id = id.as_ref();
        let mut inner = self.lock();
        let Some(index) = inner
            .registrations
            .iter()
            .position(|registration| registration.id.as_str() == id)
        else {
            return false;
        };
        let registration = inner.registrations.remove(index);
        registration.removed.store(true, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = %self.id, registration = id, "unregistered callback");

        true
    }

    /// Deliver `action` to every callback registered for `A`, in
    /// registration order.
    ///
    /// Stops at the first callback error, which is returned as
    /// [`DispatchError::Callback`]. Fails with [`DispatchError::Reentrant`]
    /// if a dispatch is already running and the policy is
    /// [`ReentrancyPolicy::Reject`].
    pub fn dispatch<A: Action>(&self, action: &A) -> Result<(), DispatchError> {
        let kind = ActionKind::of::<A>();
        let (callbacks, _guard) = self.start_dispatching(kind)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            dispatcher = %self.id,
            action = kind.name(),
            callbacks = callbacks.len(),
            "dispatching action"
        );

        for Pending { id, callback, removed } in callbacks {
            if removed.load(Ordering::Acquire) {
                continue;
            }
            callback(action as &dyn Any)
                .map_err(|source| DispatchError::Callback { id, source })?;
        }
        Ok(())
    }

    /// Dispatch each action in turn, stopping at the first error.
    pub fn dispatch_all<A, I>(&self, actions: I) -> Result<(), DispatchError>
    where
        A: Action,
        I: IntoIterator<Item = A>,
    {
        for action in actions {
            self.dispatch(&action)?;
        }
        Ok(())
    }

    /// Whether a dispatch is running.
    pub fn is_dispatching(&self) -> bool {
        matches!(self.lock().state, DispatchState::Dispatching { .. })
    }

    /// The registration ids captured when the running dispatch started, or
    /// `None` while idle.
    pub fn current_callbacks(&self) -> Option<Vec<RegistrationId>> {
        match &self.lock().state {
            DispatchState::Idle => None,
            DispatchState::Dispatching { callbacks, .. } => Some(callbacks.clone()),
        }
    }

    /// Whether `id` is currently registered.
    pub fn is_registered<I>(&self, id: &I) -> bool
    where
        I: AsRef<str> + ?Sized,
    {
        let id = id.as_ref();
        self.lock()
            .registrations
            .iter()
            .any(|registration| registration.id.as_str() == id)
    }

    /// All registration ids, in registration order.
    pub fn registration_ids(&self) -> Vec<RegistrationId> {
        self.lock()
            .registrations
            .iter()
            .map(|registration| registration.id.clone())
            .collect()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.lock().registrations.len()
    }

    /// Whether there are no registrations.
    pub fn is_empty(&self) -> bool {
        self.lock().registrations.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_dispatching(
        &self,
        kind: ActionKind,
    ) -> Result<(Vec<Pending>, DispatchGuard<'_>), DispatchError> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if let DispatchState::Dispatching { depth, .. } = &mut inner.state {
            if self.config.reentrancy == ReentrancyPolicy::Reject {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    dispatcher = %self.id,
                    action = kind.name(),
                    "rejected re-entrant dispatch"
                );
                return Err(DispatchError::Reentrant {
                    dispatcher: self.id.to_string(),
                });
            }
            *depth += 1;
        } else {
            let callbacks = inner
                .registrations
                .iter()
                .map(|registration| registration.id.clone())
                .collect();
            inner.state = DispatchState::Dispatching {
                depth: 1,
                callbacks,
            };
        }

        let matching = inner
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .map(|registration| Pending {
                id: registration.id.clone(),
                callback: Arc::clone(&registration.callback),
                removed: Arc::clone(&registration.removed),
            })
            .collect();

        Ok((matching, DispatchGuard { dispatcher: self }))
    }

    fn finish_dispatching(&self) {
        let mut inner = self.lock();
        if let DispatchState::Dispatching { depth, .. } = &mut inner.state {
            if *depth > 1 {
                *depth -= 1;
                return;
            }
        }
        Self::stop_dispatching(&mut inner);
    }

    fn stop_dispatching(inner: &mut Inner) {
        inner.state = DispatchState::Idle;
    }
}

/// Leaves the dispatching state when dropped, so the state is restored when
/// a callback errors or panics.
struct DispatchGuard<'a> {
    dispatcher: &'a Dispatcher,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.dispatcher.finish_dispatching();
    }
}

impl Dispatch for Dispatcher {
    fn dispatch<A: Action>(&self, action: &A) -> Result<(), DispatchError> {
        Dispatcher::dispatch(self, action)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Dispatcher")
            .field("id", &self.id)
            .field("registrations", &inner.registrations.len())
            .field(
                "dispatching",
                &matches!(inner.state, DispatchState::Dispatching { .. }),
            )
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping;
    impl Action for Ping {
        const NAME: &'static str = "Ping";
    }

    struct Pong;
    impl Action for Pong {
        const NAME: &'static str = "Pong";
    }

    struct Nameless;
    impl Action for Nameless {
        const NAME: &'static str = "";
    }

    #[test]
    fn test_new_dispatcher_is_idle_and_empty() {
        let dispatcher = Dispatcher::new("testModule");
        assert_eq!(dispatcher.id(), "D_testModule");
        assert_eq!(dispatcher.owner(), "testModule");
        assert!(dispatcher.is_empty());
        assert!(!dispatcher.is_dispatching());
        assert!(dispatcher.current_callbacks().is_none());
    }

    #[test]
    fn test_counters_are_per_action_name() {
        let dispatcher = Dispatcher::new("app");
        let ping_1 = dispatcher.register(|_: &Ping| {}).unwrap();
        let pong_1 = dispatcher.register(|_: &Pong| {}).unwrap();
        let ping_2 = dispatcher.register(|_: &Ping| {}).unwrap();
        assert_eq!(ping_1, "D_app_Ping_1");
        assert_eq!(pong_1, "D_app_Pong_1");
        assert_eq!(ping_2, "D_app_Ping_2");
    }

    #[test]
    fn test_counters_are_not_reused_after_unregister() {
        let dispatcher = Dispatcher::new("app");
        let first = dispatcher.register(|_: &Ping| {}).unwrap();
        assert!(dispatcher.unregister(&first));
        let second = dispatcher.register(|_: &Ping| {}).unwrap();
        assert_eq!(second, "D_app_Ping_2");
    }

    #[test]
    fn test_invalid_action_name_is_rejected() {
        let dispatcher = Dispatcher::new("app");
        let err = dispatcher.register(|_: &Nameless| {}).unwrap_err();
        assert_eq!(err, RegisterError::InvalidActionName(String::new()));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_dispatch_only_reaches_matching_kind() {
        let dispatcher = Dispatcher::new("app");
        let pings = Arc::new(AtomicUsize::new(0));
        let pongs = Arc::new(AtomicUsize::new(0));
        let pings_clone = pings.clone();
        let pongs_clone = pongs.clone();
        dispatcher
            .register(move |_: &Ping| {
                pings_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        dispatcher
            .register(move |_: &Pong| {
                pongs_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        dispatcher.dispatch(&Ping).unwrap();

        assert_eq!(pings.load(Ordering::SeqCst), 1);
        assert_eq!(pongs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_dispatching_resets_state() {
        let dispatcher = Dispatcher::new("app");
        dispatcher.lock().state = DispatchState::Dispatching {
            depth: 3,
            callbacks: Vec::new(),
        };
        assert_eq!(dispatcher.current_callbacks(), Some(Vec::new()));

        Dispatcher::stop_dispatching(&mut dispatcher.lock());

        assert!(dispatcher.current_callbacks().is_none());
        assert!(!dispatcher.is_dispatching());
    }

    #[test]
    fn test_callbacks_unregistering_the_next_one_skip_it() {
        let dispatcher = Arc::new(Dispatcher::new("app"));
        let ids: Arc<Mutex<Vec<RegistrationId>>> = Arc::default();
        let ran: Arc<Mutex<Vec<usize>>> = Arc::default();

        for index in 0..6 {
            let weak = Arc::downgrade(&dispatcher);
            let ids_clone = ids.clone();
            let ran_clone = ran.clone();
            let id = dispatcher
                .register(move |_: &Ping| {
                    ran_clone.lock().unwrap().push(index);
                    let next = ids_clone.lock().unwrap().get(index + 1).cloned();
                    if let (Some(dispatcher), Some(next)) = (weak.upgrade(), next) {
                        dispatcher.unregister(&next);
                    }
                })
                .unwrap();
            ids.lock().unwrap().push(id);
        }

        dispatcher.dispatch(&Ping).unwrap();

        assert_eq!(*ran.lock().unwrap(), vec![0, 2, 4]);
        assert_eq!(dispatcher.len(), 3);
        assert!(!dispatcher.is_dispatching());
    }

    #[test]
    fn test_unregister_marks_captured_entries_removed() {
        let dispatcher = Dispatcher::new("app");
        let id = dispatcher.register(|_: &Ping| {}).unwrap();
        let (pending, guard) = dispatcher.start_dispatching(ActionKind::of::<Ping>()).unwrap();
        assert_eq!(pending.len(), 1);
        assert!(!pending[0].removed.load(Ordering::Acquire));

        assert!(dispatcher.unregister(&id));

        assert!(pending[0].removed.load(Ordering::Acquire));
        drop(guard);
        assert!(!dispatcher.is_dispatching());
    }

    #[test]
    fn test_unregister_unknown_id_is_noop() {
        let dispatcher = Dispatcher::new("app");
        dispatcher.register(|_: &Ping| {}).unwrap();
        assert!(!dispatcher.unregister("D_app_Ping_7"));
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_debug_output() {
        let dispatcher = Dispatcher::new("app");
        let debug = format!("{dispatcher:?}");
        assert!(debug.contains("D_app"));
        assert!(debug.contains("registrations: 0"));
    }
}
