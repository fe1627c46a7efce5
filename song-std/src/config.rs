//! Dispatcher configuration.

/// What a dispatcher does when `dispatch` is called while it is already
/// dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentrancyPolicy {
    /// Fail fast with `DispatchError::Reentrant`; nothing is invoked.
    #[default]
    Reject,
    /// Run the nested dispatch inline. The guard clears only when the
    /// outermost dispatch finishes.
    Allow,
}

/// Settings applied to every dispatcher a registry creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Behaviour of nested or overlapping dispatches.
    pub reentrancy: ReentrancyPolicy,
}

impl DispatcherConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the re-entrancy policy.
    pub fn with_reentrancy(mut self, reentrancy: ReentrancyPolicy) -> Self {
        self.reentrancy = reentrancy;
        self
    }

    /// Whether nested dispatches are allowed.
    pub fn allows_reentrancy(&self) -> bool {
        self.reentrancy == ReentrancyPolicy::Allow
    }
}
