#![allow(dead_code)]

use song::{DispatcherConfig, DispatcherRegistry, Modules};

// ============================================================================
// Test Action Types
// ============================================================================

/// Named like the action in the registration id examples, `D_<owner>_Action_<n>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub payload: u32,
}

impl Action {
    pub fn new(payload: u32) -> Self {
        Self { payload }
    }
}

impl song::Action for Action {
    const NAME: &'static str = "Action";
}

#[derive(Clone, Debug, PartialEq)]
pub struct OtherAction;

impl song::Action for OtherAction {
    const NAME: &'static str = "OtherAction";
}

// ============================================================================
// Registries
// ============================================================================

pub const MODULES: [&str; 3] = ["moduleA", "moduleB", "testModule"];

pub fn registry() -> DispatcherRegistry {
    registry_with(DispatcherConfig::default())
}

pub fn registry_with(config: DispatcherConfig) -> DispatcherRegistry {
    let modules = Modules::from_names(MODULES).expect("valid module names");
    DispatcherRegistry::with_config(modules, config)
}
