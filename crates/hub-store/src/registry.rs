//! Ordered, name-indexed set of feature modules.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, StoreError};
use crate::module::{FeatureModule, ModuleName};
use crate::state::ROOT_FIELD_NAMES;

#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Box<dyn FeatureModule>>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its namespace.
    ///
    /// Namespaces must be non-empty, unique, and must not shadow a root
    /// field name.
    pub fn register(&mut self, module: Box<dyn FeatureModule>) -> Result<()> {
        let namespace = module.namespace().to_string();
        if namespace.trim().is_empty() {
            return Err(StoreError::InvalidNamespace {
                namespace,
                reason: "namespace must not be empty",
            });
        }
        if ROOT_FIELD_NAMES.contains(&namespace.as_str()) {
            return Err(StoreError::InvalidNamespace {
                namespace,
                reason: "namespace collides with a root state field",
            });
        }
        if self.index.contains_key(&namespace) {
            return Err(StoreError::DuplicateModule(namespace));
        }

        tracing::debug!(namespace = %namespace, "registered feature module");
        self.index.insert(namespace, self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    pub fn get(&self, namespace: &str) -> Option<&dyn FeatureModule> {
        let idx = *self.index.get(namespace)?;
        Some(self.modules[idx].as_ref())
    }

    pub fn get_mut(&mut self, namespace: &str) -> Option<&mut (dyn FeatureModule + 'static)> {
        let idx = *self.index.get(namespace)?;
        Some(self.modules[idx].as_mut())
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.index.contains_key(namespace)
    }

    /// Namespaces in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.namespace()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn FeatureModule>> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check that every standard namespace is registered.
    pub fn require_standard(&self) -> Result<()> {
        match ModuleName::all()
            .iter()
            .find(|name| !self.contains(name.as_str()))
        {
            Some(missing) => Err(StoreError::MissingModule(missing.as_str().to_string())),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .finish()
    }
}
