//! Owner → dispatcher lookup.

use lazy_static::lazy_static;
use song::{DispatcherRegistry, Modules, RegistryError, SongError};
use std::sync::Arc;

mod common;
use common::registry;

#[test]
fn test_returns_new_dispatcher_for_unseen_module() {
    let registry = registry();
    let dispatcher = registry.get_dispatcher("moduleA").unwrap();
    assert!(dispatcher.is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_returns_same_dispatcher_on_second_request() {
    let registry = registry();
    let first = registry.get_dispatcher("moduleA").unwrap();
    let second = registry.get_dispatcher("moduleA").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_returns_different_dispatcher_per_module() {
    let registry = registry();
    let a = registry.get_dispatcher("moduleA").unwrap();
    let b = registry.get_dispatcher("moduleB").unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.id(), "D_moduleA");
    assert_eq!(b.id(), "D_moduleB");
    assert_eq!(registry.owners(), vec!["moduleA", "moduleB"]);
}

#[test]
fn test_errors_for_unknown_module() {
    let registry = registry();
    let err = registry.get_dispatcher("idonotexist").unwrap_err();
    assert_eq!(err, RegistryError::UnknownOwner("idonotexist".to_string()));
    assert!(!registry.contains("idonotexist"));

    let err: SongError = err.into();
    assert!(matches!(err, SongError::Registry(_)));
}

#[test]
fn test_closure_catalog() {
    let registry = DispatcherRegistry::new(|owner: &str| owner.starts_with("app."));
    assert!(registry.get_dispatcher("app.todos").is_ok());
    assert!(registry.get_dispatcher("todos").is_err());
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.get_dispatcher("testModule").unwrap())
        })
        .collect();

    let dispatchers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for dispatcher in &dispatchers[1..] {
        assert!(Arc::ptr_eq(&dispatchers[0], dispatcher));
    }
}

lazy_static! {
    static ref APP_REGISTRY: DispatcherRegistry =
        DispatcherRegistry::new(Modules::from_names(["shell", "editor"]).unwrap());
}

#[test]
fn test_process_wide_registry() {
    let shell = APP_REGISTRY.get_dispatcher("shell").unwrap();
    let again = APP_REGISTRY.get_dispatcher("shell").unwrap();
    assert!(Arc::ptr_eq(&shell, &again));
    assert!(APP_REGISTRY.get_dispatcher("settings").is_err());
}
