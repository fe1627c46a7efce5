//! Standard callbacks.

use song_core::{Action, BoxError, Callback};
use std::fmt;

/// A callback that logs every action it receives.
///
/// Logs at `info` level when the `tracing` feature is enabled and does
/// nothing otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCallback;

impl<A: Action + fmt::Debug> Callback<A> for LoggingCallback {
    fn call(&self, action: &A) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(action = A::NAME, ?action, "received action");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = action;
        }
        Ok(())
    }
}
