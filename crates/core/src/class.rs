//! Class identity for composite values
//!
//! Objects carry a [`ClassHandle`]. Handles are obtained from the process-wide
//! [`ClassRegistry`], which maps class names to their definitions.
//!
//! ## Identity vs. assignability
//!
//! Two handles are equal when they name the same class. That is the only
//! relation contract validation uses: an instance of a subclass does NOT
//! satisfy a declared parent class. [`ClassHandle::is_subclass_of`] exists for
//! closure signatures, whose parameter hints accept subclasses.
//!
//! ## Registration
//!
//! ```ignore
//! use contracts_core::{ClassDef, ClassRegistry};
//!
//! let shape = ClassRegistry::register(ClassDef::new("Shape"))?;
//! let circle = ClassRegistry::register(ClassDef::new("Circle").extends("Shape"))?;
//! assert!(circle.is_subclass_of(&shape));
//! ```

use crate::error::{Error, Result};
use crate::semantic_type::SemanticType;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Name of the class that generic JSON objects are instances of
pub const STD_CLASS: &str = "stdClass";

/// Definition of a class to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    name: String,
    parent: Option<String>,
}

impl ClassDef {
    /// Define a root class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Set the parent class
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent class name, if any
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[derive(Debug)]
struct ClassInfo {
    name: String,
    parent: Option<ClassHandle>,
}

/// Resolved class identity
///
/// Cheap to clone. Equality compares class names case-insensitively, so
/// `classOf(value) == resolve(name)` is a name comparison.
#[derive(Clone)]
pub struct ClassHandle(Arc<ClassInfo>);

impl ClassHandle {
    /// Class name as registered
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Parent class, if any
    pub fn parent(&self) -> Option<&ClassHandle> {
        self.0.parent.as_ref()
    }

    /// Check if this class is `other` or inherits from it
    pub fn is_subclass_of(&self, other: &ClassHandle) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }

    fn key(&self) -> String {
        normalize(&self.0.name)
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for ClassHandle {}

impl std::hash::Hash for ClassHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassHandle")
            .field("name", &self.name())
            .field("parent", &self.parent().map(|p| p.name()))
            .finish()
    }
}

impl fmt::Display for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Global class table (lowercased name -> handle)
///
/// Uses parking_lot::RwLock so a panicking test cannot poison lookups for
/// every other test in the process.
static CLASSES: Lazy<RwLock<HashMap<String, ClassHandle>>> = Lazy::new(|| {
    let std_class = ClassHandle(Arc::new(ClassInfo {
        name: STD_CLASS.to_string(),
        parent: None,
    }));
    RwLock::new(HashMap::from([(normalize(STD_CLASS), std_class)]))
});

/// Process-wide class-identity resolver
pub struct ClassRegistry;

impl ClassRegistry {
    /// Register a class, returning its handle
    ///
    /// Registering an identical definition again returns the existing handle.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedTypeName` if the parent is not registered
    /// - `ClassConflict` if the name is empty, is a reserved category name,
    ///   or is already registered with a different parent
    pub fn register(def: ClassDef) -> Result<ClassHandle> {
        let key = normalize(&def.name);
        if key.is_empty() {
            return Err(Error::ClassConflict {
                name: def.name,
                reason: "class name cannot be empty".to_string(),
            });
        }
        if SemanticType::from_name(&key).is_some() {
            return Err(Error::ClassConflict {
                name: def.name,
                reason: "name is reserved for a semantic category".to_string(),
            });
        }

        let parent = match def.parent.as_deref() {
            Some(parent) => Some(Self::resolve(parent)?),
            None => None,
        };

        let mut classes = CLASSES.write();
        if let Some(existing) = classes.get(&key) {
            return if existing.parent() == parent.as_ref() {
                Ok(existing.clone())
            } else {
                Err(Error::ClassConflict {
                    name: def.name,
                    reason: format!(
                        "already registered with parent {}",
                        existing.parent().map_or("<none>", |p| p.name())
                    ),
                })
            };
        }

        let handle = ClassHandle(Arc::new(ClassInfo {
            name: def.name.trim().to_string(),
            parent,
        }));
        info!(
            class = handle.name(),
            parent = handle.parent().map(|p| p.name()),
            "Registered class"
        );
        classes.insert(key, handle.clone());
        Ok(handle)
    }

    /// Resolve a class by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedTypeName` if no such class is registered.
    pub fn resolve(name: &str) -> Result<ClassHandle> {
        Self::lookup(name).ok_or_else(|| Error::unrecognized(name))
    }

    /// Look up a class by name without failing
    pub fn lookup(name: &str) -> Option<ClassHandle> {
        CLASSES.read().get(&normalize(name)).cloned()
    }

    /// Check if a class is registered
    pub fn is_registered(name: &str) -> bool {
        CLASSES.read().contains_key(&normalize(name))
    }

    /// The built-in `stdClass`
    pub fn std_class() -> ClassHandle {
        match Self::lookup(STD_CLASS) {
            Some(class) => class,
            None => unreachable!("stdClass is registered when the table is created"),
        }
    }
}
