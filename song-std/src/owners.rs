//! Owner catalogs.
//!
//! A registry only creates dispatchers for owners its [`OwnerCatalog`]
//! recognizes. [`Modules`] is the standard catalog: a set of module names
//! declared at runtime or, with the `inventory` feature, statically through
//! [`declare_owner!`](crate::declare_owner).

use song_core::RegistryError;
use std::{
    collections::{BTreeSet, HashSet},
    sync::{Arc, PoisonError, RwLock},
};

/// Decides which owner names are recognized.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `OwnerCatalog`",
    label = "missing `OwnerCatalog` implementation",
    note = "Use `Modules`, a set of names, or a closure `Fn(&str) -> bool`."
)]
pub trait OwnerCatalog: Send + Sync {
    /// Whether `owner` is a recognized owner.
    fn contains(&self, owner: &str) -> bool;
}

impl<F> OwnerCatalog for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn contains(&self, owner: &str) -> bool {
        (self)(owner)
    }
}

impl OwnerCatalog for HashSet<String> {
    fn contains(&self, owner: &str) -> bool {
        HashSet::contains(self, owner)
    }
}

impl OwnerCatalog for BTreeSet<String> {
    fn contains(&self, owner: &str) -> bool {
        BTreeSet::contains(self, owner)
    }
}

impl OwnerCatalog for Vec<String> {
    fn contains(&self, owner: &str) -> bool {
        self.iter().any(|name| name == owner)
    }
}

impl<const N: usize> OwnerCatalog for [&'static str; N] {
    fn contains(&self, owner: &str) -> bool {
        self.iter().any(|name| *name == owner)
    }
}

impl<C: OwnerCatalog + ?Sized> OwnerCatalog for Arc<C> {
    fn contains(&self, owner: &str) -> bool {
        (**self).contains(owner)
    }
}

/// Checks that `name` can be used as an owner name.
pub(crate) fn validate_owner_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidOwnerName(name.to_owned()));
    }
    Ok(())
}

/// A thread-safe set of declared module names.
///
/// # Example
///
/// ```rust
/// use song_std::{Modules, OwnerCatalog};
///
/// let modules = Modules::new();
/// modules.declare("todos").unwrap();
/// assert!(modules.contains("todos"));
/// assert!(!modules.contains("settings"));
/// ```
#[derive(Debug, Default)]
pub struct Modules {
    names: RwLock<BTreeSet<String>>,
}

impl Modules {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding `names`.
    pub fn from_names<I, S>(names: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules = Self::new();
        for name in names {
            modules.declare(name)?;
        }
        Ok(modules)
    }

    /// Create a set holding every owner declared with
    /// [`declare_owner!`](crate::declare_owner).
    ///
    /// Declarations with invalid names are skipped.
    #[cfg(feature = "inventory")]
    pub fn from_inventory() -> Self {
        let modules = Self::new();
        for declaration in inventory::iter::<OwnerDeclaration>() {
            if let Err(_err) = modules.declare(declaration.name) {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "skipping owner declaration");
            }
        }
        modules
    }

    /// Declare a module.
    ///
    /// Returns `true` if the name was not declared before.
    pub fn declare(&self, name: impl Into<String>) -> Result<bool, RegistryError> {
        let name = name.into();
        validate_owner_name(&name)?;
        let inserted = self
            .names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name);
        Ok(inserted)
    }

    /// Whether `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OwnerCatalog for Modules {
    fn contains(&self, owner: &str) -> bool {
        Modules::contains(self, owner)
    }
}

/// A statically declared owner, collected by [`Modules::from_inventory`].
///
/// Submitted through [`declare_owner!`](crate::declare_owner).
#[cfg(feature = "inventory")]
#[derive(Debug)]
pub struct OwnerDeclaration {
    /// The owner name.
    pub name: &'static str,
}

#[cfg(feature = "inventory")]
impl OwnerDeclaration {
    /// Create a declaration for `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(OwnerDeclaration);

/// Declares an owner so that [`Modules::from_inventory`] recognizes it.
///
/// # Example
///
/// ```rust,ignore
/// song_std::declare_owner!("todos");
///
/// let modules = song_std::Modules::from_inventory();
/// assert!(modules.contains("todos"));
/// ```
#[cfg(feature = "inventory")]
#[macro_export]
macro_rules! declare_owner {
    ($name:expr) => {
        $crate::inventory::submit! {
            $crate::owners::OwnerDeclaration::new($name)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_reports_new_names() {
        let modules = Modules::new();
        assert_eq!(modules.declare("moduleA"), Ok(true));
        assert_eq!(modules.declare("moduleA"), Ok(false));
        assert_eq!(modules.len(), 1);
    }

    #[test]
    fn test_declare_rejects_invalid_names() {
        let modules = Modules::new();
        assert_eq!(
            modules.declare(""),
            Err(RegistryError::InvalidOwnerName(String::new()))
        );
        assert!(modules.declare("two words").is_err());
        assert!(modules.is_empty());
    }

    #[test]
    fn test_from_names_sorted() {
        let modules = Modules::from_names(["moduleB", "moduleA"]).unwrap();
        assert_eq!(modules.names(), vec!["moduleA", "moduleB"]);
    }

    #[test]
    fn test_catalog_impls() {
        fn recognizes<C: OwnerCatalog>(catalog: C, owner: &str) -> bool {
            catalog.contains(owner)
        }

        assert!(recognizes(["a", "b"], "b"));
        assert!(!recognizes(["a", "b"], "c"));
        assert!(recognizes(vec!["a".to_string()], "a"));
        assert!(recognizes(
            HashSet::from(["a".to_string()]),
            "a"
        ));
        assert!(recognizes(|owner: &str| owner.starts_with("app."), "app.todos"));
        assert!(recognizes(Arc::new(Modules::from_names(["x"]).unwrap()), "x"));
    }
}
