//! Dispatcher and registration identities.

use std::borrow::Borrow;
use std::fmt;

/// Prefix of every dispatcher id.
pub const DISPATCHER_ID_PREFIX: &str = "D_";

/// Identity of a dispatcher, `D_<owner>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatcherId(String);

impl DispatcherId {
    /// The id of the dispatcher owned by `owner`.
    pub fn for_owner(owner: &str) -> Self {
        Self(format!("{DISPATCHER_ID_PREFIX}{owner}"))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id of the `counter`-th registration for `action_name`.
    pub fn registration(&self, action_name: &str, counter: u64) -> RegistrationId {
        RegistrationId(format!("{}_{action_name}_{counter}", self.0))
    }
}

impl fmt::Display for DispatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DispatcherId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DispatcherId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DispatcherId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Key identifying one (action kind, callback) binding within a dispatcher.
///
/// Formatted as `<dispatcher id>_<action name>_<counter>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RegistrationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RegistrationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistrationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegistrationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RegistrationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RegistrationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_id_format() {
        let id = DispatcherId::for_owner("testModule");
        assert_eq!(id, "D_testModule");
        assert_eq!(id.to_string(), "D_testModule");
    }

    #[test]
    fn test_registration_id_format() {
        let id = DispatcherId::for_owner("testModule").registration("Action", 2);
        assert_eq!(id, "D_testModule_Action_2");
        assert_eq!(id.into_string(), "D_testModule_Action_2");
    }
}
