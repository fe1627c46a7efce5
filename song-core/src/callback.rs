//! Callback traits.
//!
//! A [`Callback`] is the terminal point of a dispatch: it receives a reference
//! to the action and either succeeds or reports an error that stops the
//! dispatch. Plain closures are callbacks as long as their return type
//! implements [`CallbackResult`].

use crate::{action::Action, error::BoxError};

/// Something invoked with each dispatched action of type `A`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Callback` for `{A}`",
    label = "missing `Callback` implementation",
    note = "Closures of the form `Fn(&{A}) -> R` are callbacks when `R: CallbackResult`."
)]
pub trait Callback<A: Action>: Send + Sync + 'static {
    /// Handle one action.
    fn call(&self, action: &A) -> Result<(), BoxError>;
}

impl<A, F, R> Callback<A> for F
where
    A: Action,
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: CallbackResult,
{
    fn call(&self, action: &A) -> Result<(), BoxError> {
        (self)(action).into_result()
    }
}

/// Conversion from a callback's return value into a dispatch outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T` or propagates the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `CallbackResult`",
    label = "callbacks must return `()` or `Result<(), E>`",
    note = "Return `()` or a `Result` whose error converts into `BoxError`."
)]
pub trait CallbackResult {
    /// Convert into success or the error that stops the dispatch.
    fn into_result(self) -> Result<(), BoxError>;
}

impl CallbackResult for () {
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> CallbackResult for Result<T, E>
where
    T: CallbackResult,
    E: Into<BoxError>,
{
    fn into_result(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_result(),
            Err(e) => Err(e.into()),
        }
    }
}
