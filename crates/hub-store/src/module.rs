//! Feature-module capability.
//!
//! The root container never looks inside a feature module. It only needs a
//! namespace to register it under, an initial value, the list of operations
//! the module accepts, and a way to route an operation to it.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::StoreError;

/// Namespaces of the feature modules composed into the standard store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleName {
    Auth,
    Users,
    Subjects,
    Projects,
    Badges,
    Config,
    LibVersion,
}

impl ModuleName {
    /// All standard namespaces, in registration order.
    pub const fn all() -> &'static [ModuleName] {
        &[
            Self::Auth,
            Self::Users,
            Self::Subjects,
            Self::Projects,
            Self::Badges,
            Self::Config,
            Self::LibVersion,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Users => "users",
            Self::Subjects => "subjects",
            Self::Projects => "projects",
            Self::Badges => "badges",
            Self::Config => "config",
            Self::LibVersion => "libVersion",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| StoreError::UnknownModule(s.to_string()))
    }
}

/// Error raised by a feature module while applying an operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("invalid payload for '{operation}': {reason}")]
    InvalidPayload { operation: String, reason: String },
}

/// Minimal contract a feature module satisfies to be registered.
pub trait FeatureModule {
    /// Name the module is registered and addressed under.
    fn namespace(&self) -> &str;

    /// State the module starts with.
    fn initial_value(&self) -> Value;

    /// Current state, for snapshots.
    fn state(&self) -> Value;

    /// Operation names accepted by [`FeatureModule::apply`].
    fn operations(&self) -> &[&'static str];

    /// Apply a named operation to the module's own state.
    fn apply(&mut self, operation: &str, payload: Value) -> Result<(), ModuleError>;
}

/// Opaque keyed slot used for namespaces without a concrete module.
///
/// State is a JSON object. `set` writes `payload.value` under
/// `payload.key`; `reset` restores the initial object.
#[derive(Debug, Clone)]
pub struct SlotModule {
    namespace: String,
    initial: Map<String, Value>,
    current: Map<String, Value>,
}

impl SlotModule {
    pub const SET: &'static str = "set";
    pub const RESET: &'static str = "reset";

    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_initial(namespace, Map::new())
    }

    pub fn with_initial(namespace: impl Into<String>, initial: Map<String, Value>) -> Self {
        Self {
            namespace: namespace.into(),
            current: initial.clone(),
            initial,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key)
    }
}

impl From<ModuleName> for SlotModule {
    fn from(name: ModuleName) -> Self {
        Self::new(name.as_str())
    }
}

impl FeatureModule for SlotModule {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn initial_value(&self) -> Value {
        Value::Object(self.initial.clone())
    }

    fn state(&self) -> Value {
        Value::Object(self.current.clone())
    }

    fn operations(&self) -> &[&'static str] {
        &[Self::SET, Self::RESET]
    }

    fn apply(&mut self, operation: &str, payload: Value) -> Result<(), ModuleError> {
        match operation {
            Self::SET => {
                let invalid = |reason: &str| ModuleError::InvalidPayload {
                    operation: operation.to_string(),
                    reason: reason.to_string(),
                };
                let Value::Object(mut fields) = payload else {
                    return Err(invalid("expected an object with 'key' and 'value'"));
                };
                let key = match fields.remove("key") {
                    Some(Value::String(key)) => key,
                    _ => return Err(invalid("'key' must be a string")),
                };
                let value = fields.remove("value").unwrap_or(Value::Null);
                self.current.insert(key, value);
                Ok(())
            }
            Self::RESET => {
                self.current = self.initial.clone();
                Ok(())
            }
            other => Err(ModuleError::UnknownOperation(other.to_string())),
        }
    }
}
