#![cfg(feature = "macros")]

use song::{Action, Dispatcher};

#[derive(Clone, Debug, song::Action)]
struct AddTodo {
    text: String,
}

#[derive(Clone, Debug, song::Action)]
#[action(name = "todos.remove")]
struct RemoveTodo {
    index: usize,
}

#[derive(song::Action)]
struct Reset;

#[test]
fn test_derive_uses_type_name() {
    assert_eq!(AddTodo::NAME, "AddTodo");
    assert_eq!(Reset::NAME, "Reset");
}

#[test]
fn test_derive_name_override() {
    assert_eq!(RemoveTodo::NAME, "todos.remove");
}

#[test]
fn test_derived_actions_dispatch() {
    let dispatcher = Dispatcher::new("todos");
    let add = dispatcher
        .register(|action: &AddTodo| assert_eq!(action.text, "milk"))
        .unwrap();
    let remove = dispatcher
        .register(|action: &RemoveTodo| assert_eq!(action.index, 0))
        .unwrap();

    assert_eq!(add, "D_todos_AddTodo_1");
    assert_eq!(remove, "D_todos_todos.remove_1");

    dispatcher
        .dispatch(&AddTodo {
            text: "milk".into(),
        })
        .unwrap();
    dispatcher.dispatch(&RemoveTodo { index: 0 }).unwrap();
}

#[derive(Clone, Debug, song::Action)]
struct Wrapped<T> {
    inner: T,
}

#[test]
fn test_derive_on_generic_type() {
    assert_eq!(Wrapped::<u8>::NAME, "Wrapped");

    let dispatcher = Dispatcher::new("app");
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    dispatcher
        .register(move |action: &Wrapped<u8>| {
            seen_clone.lock().unwrap().push(action.inner);
        })
        .unwrap();
    // Same name, different type: shares the id counter but not the callbacks.
    let id = dispatcher.register(|_: &Wrapped<String>| {}).unwrap();
    assert_eq!(id, "D_app_Wrapped_2");

    dispatcher.dispatch(&Wrapped { inner: 7u8 }).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![7]);
}
