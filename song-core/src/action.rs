//! Action trait for dispatched values.

use std::any::TypeId;
use std::fmt;

/// A typed value representing an event routed to interested callbacks.
///
/// `NAME` is the human-readable part of every registration id handed out for
/// this action, so `D_todos_AddTodo_1` is the first callback registered for an
/// action named `AddTodo` on the `todos` dispatcher.
///
/// # Example
///
/// ```rust
/// use song_core::Action;
///
/// struct AddTodo {
///     text: String,
/// }
///
/// impl Action for AddTodo {
///     const NAME: &'static str = "AddTodo";
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable Action",
    label = "missing `Action` implementation",
    note = "Implement `Action` (or derive it with the `macros` feature) to dispatch `{Self}`."
)]
pub trait Action: Send + Sync + 'static {
    /// The name used when formatting registration ids.
    const NAME: &'static str;

    /// The static identity of this action type.
    fn kind() -> ActionKind
    where
        Self: Sized,
    {
        ActionKind::of::<Self>()
    }
}

/// The static identity of an action type.
///
/// Two kinds are equal only when they describe the same Rust type; the name
/// is carried along for id formatting and diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKind {
    name: &'static str,
    type_id: TypeId,
}

impl ActionKind {
    /// Returns the kind of `A`.
    pub fn of<A: Action>() -> Self {
        Self {
            name: A::NAME,
            type_id: TypeId::of::<A>(),
        }
    }

    /// The action name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the action type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether the name can be embedded in a registration id.
    ///
    /// Names must be non-empty and free of whitespace.
    pub fn has_valid_name(&self) -> bool {
        !self.name.is_empty() && !self.name.chars().any(char::is_whitespace)
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionKind").field(&self.name).finish()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
