//! Procedural macros for Song.
//!
//! - `#[derive(Action)]` - implements `song::Action`, naming the action after
//!   the type unless `#[action(name = "...")]` says otherwise

use proc_macro::TokenStream;

mod action;

/// Derive macro for implementing the `Action` trait.
///
/// ```rust,ignore
/// #[derive(song::Action)]
/// struct AddTodo { text: String }            // NAME = "AddTodo"
///
/// #[derive(song::Action)]
/// #[action(name = "todos.remove")]
/// struct RemoveTodo { index: usize }         // NAME = "todos.remove"
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    action::derive_action_impl(input.into()).into()
}
