//! Dispatch seam.

use crate::{action::Action, error::DispatchError};
use std::sync::Arc;

/// Something that delivers actions to their callbacks.
///
/// Implemented by the standard `Dispatcher`; bound actions only depend on
/// this trait so tests can substitute a recording double.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch actions",
    label = "missing `Dispatch` implementation",
    note = "Implement `Dispatch` to deliver actions to callbacks."
)]
pub trait Dispatch: Send + Sync {
    /// Deliver `action` to every callback registered for its kind.
    fn dispatch<A: Action>(&self, action: &A) -> Result<(), DispatchError>;
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch<A: Action>(&self, action: &A) -> Result<(), DispatchError> {
        (**self).dispatch(action)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch<A: Action>(&self, action: &A) -> Result<(), DispatchError> {
        (**self).dispatch(action)
    }
}
