//! The aggregate store: root state plus registered feature modules.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{Result, StoreError};
use crate::module::{FeatureModule, ModuleName, SlotModule};
use crate::mutation::Mutation;
use crate::registry::ModuleRegistry;
use crate::settings::StoreSettings;
use crate::state::RootState;

/// A committed change, delivered to observers after it has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Change {
    /// A root field was written. `previous` holds the value it replaced.
    Root { mutation: Mutation, previous: String },
    /// An operation was applied inside a feature module.
    Module { namespace: String, operation: String },
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Change, &RootState)>;

/// Builder that composes the root state with its feature modules.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    settings: StoreSettings,
    registry: ModuleRegistry,
    error: Option<StoreError>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Attach a feature module. Registration errors surface from `build`.
    #[must_use]
    pub fn module(mut self, module: impl FeatureModule + 'static) -> Self {
        if self.error.is_none()
            && let Err(e) = self.registry.register(Box::new(module))
        {
            self.error = Some(e);
        }
        self
    }

    /// Build with exactly the modules that were attached.
    pub fn build(self) -> Result<Store> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let state = RootState::new(&self.settings.thresholds);
        tracing::debug!(
            modules = ?self.registry.names(),
            minimum_project_points = state.minimum_project_points(),
            minimum_subject_points = state.minimum_subject_points(),
            "store constructed"
        );
        Ok(Store {
            state,
            registry: self.registry,
            observers: Vec::new(),
            next_subscription: 0,
            version: 0,
        })
    }

    /// Build the standard store.
    ///
    /// Any standard namespace not attached explicitly gets a [`SlotModule`].
    pub fn build_standard(mut self) -> Result<Store> {
        for name in ModuleName::all() {
            if !self.registry.contains(name.as_str()) {
                self = self.module(SlotModule::from(*name));
            }
        }
        let store = self.build()?;
        store.registry.require_standard()?;
        Ok(store)
    }
}

/// Root state container.
///
/// Writes go through [`Store::commit`] (root fields) or
/// [`Store::commit_module`] (feature modules). Every successful commit bumps
/// [`Store::version`] and notifies observers in subscription order.
pub struct Store {
    state: RootState,
    registry: ModuleRegistry,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    version: u64,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Default settings and a slot module for each standard namespace.
    pub fn standard() -> Result<Self> {
        StoreBuilder::new().build_standard()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn project_id(&self) -> &str {
        self.state.project_id()
    }

    pub fn previous_url(&self) -> &str {
        self.state.previous_url()
    }

    pub fn minimum_project_points(&self) -> u32 {
        self.state.minimum_project_points()
    }

    pub fn minimum_subject_points(&self) -> u32 {
        self.state.minimum_subject_points()
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn module(&self, namespace: &str) -> Option<&dyn FeatureModule> {
        self.registry.get(namespace)
    }

    /// Number of commits applied since construction.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whole state tree: the four root fields first, then each module's
    /// state under its namespace in registration order.
    pub fn snapshot(&self) -> Value {
        let mut tree = Map::new();
        tree.insert("projectId".into(), json!(self.state.project_id()));
        tree.insert("previousUrl".into(), json!(self.state.previous_url()));
        tree.insert(
            "minimumProjectPoints".into(),
            json!(self.state.minimum_project_points()),
        );
        tree.insert(
            "minimumSubjectPoints".into(),
            json!(self.state.minimum_subject_points()),
        );
        for module in self.registry.iter() {
            tree.insert(module.namespace().to_string(), module.state());
        }
        Value::Object(tree)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Apply a root mutation. Values are stored as given, without validation.
    pub fn commit(&mut self, mutation: Mutation) {
        let previous = match &mutation {
            Mutation::CurrentProjectId(value) => self.state.replace_project_id(value.clone()),
            Mutation::PreviousUrl(value) => self.state.replace_previous_url(value.clone()),
        };
        tracing::debug!(
            mutation = mutation.name(),
            value = mutation.value(),
            previous = %previous,
            "commit"
        );
        self.notify(Change::Root { mutation, previous });
    }

    pub fn set_current_project_id(&mut self, id: impl Into<String>) {
        self.commit(Mutation::CurrentProjectId(id.into()));
    }

    pub fn set_previous_url(&mut self, url: impl Into<String>) {
        self.commit(Mutation::PreviousUrl(url.into()));
    }

    /// Route an operation to the module registered under `namespace`.
    ///
    /// Root fields are never touched. Observers are notified only when the
    /// module accepts the operation.
    pub fn commit_module(
        &mut self,
        namespace: &str,
        operation: &str,
        payload: Value,
    ) -> Result<()> {
        let module = self
            .registry
            .get_mut(namespace)
            .ok_or_else(|| StoreError::UnknownModule(namespace.to_string()))?;
        module
            .apply(operation, payload)
            .map_err(|source| StoreError::Module {
                namespace: namespace.to_string(),
                source,
            })?;
        tracing::debug!(namespace, operation, "module commit");
        self.notify(Change::Module {
            namespace: namespace.to_string(),
            operation: operation.to_string(),
        });
        Ok(())
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register an observer called synchronously after every commit.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Change, &RootState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: Change) {
        self.version += 1;
        for (_, observer) in &mut self.observers {
            observer(&change, &self.state);
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("modules", &self.registry.names())
            .field("observer_count", &self.observers.len())
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::settings::ThresholdSettings;

    #[test]
    fn standard_store_registers_all_namespaces() {
        let store = Store::standard().unwrap();
        assert_eq!(
            store.modules().names(),
            vec!["auth", "users", "subjects", "projects", "badges", "config", "libVersion"]
        );
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn build_surfaces_registration_error() {
        let err = Store::builder()
            .module(SlotModule::new("auth"))
            .module(SlotModule::new("auth"))
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateModule(_)));
    }

    #[test]
    fn build_standard_keeps_supplied_modules() {
        let mut initial = Map::new();
        initial.insert("version".into(), json!("1.4.0"));
        let store = Store::builder()
            .module(SlotModule::with_initial("libVersion", initial))
            .build_standard()
            .unwrap();

        assert_eq!(store.modules().len(), 7);
        assert_eq!(store.snapshot()["libVersion"]["version"], json!("1.4.0"));
    }

    #[test]
    fn settings_set_thresholds() {
        let settings = StoreSettings {
            thresholds: ThresholdSettings {
                minimum_project_points: 10,
                minimum_subject_points: 20,
            },
        };
        let store = Store::builder().settings(settings).build().unwrap();
        assert_eq!(store.minimum_project_points(), 10);
        assert_eq!(store.minimum_subject_points(), 20);
        assert!(store.modules().is_empty());
    }

    #[test]
    fn observers_see_change_and_new_state() {
        let mut store = Store::standard().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |change, state| {
            sink.borrow_mut()
                .push((change.clone(), state.project_id().to_string()));
        });

        store.set_current_project_id("A");
        store.set_current_project_id("B");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[1],
            (
                Change::Root {
                    mutation: Mutation::CurrentProjectId("B".into()),
                    previous: "A".into(),
                },
                "B".to_string()
            )
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = Store::standard().unwrap();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.set_previous_url("/a");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_previous_url("/b");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn failed_module_commit_does_not_notify() {
        let mut store = Store::standard().unwrap();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        let err = store
            .commit_module("badges", "explode", Value::Null)
            .unwrap_err();
        assert!(matches!(err, StoreError::Module { namespace, .. } if namespace == "badges"));

        let err = store
            .commit_module("leaderboard", "set", Value::Null)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownModule(_)));

        assert_eq!(*count.borrow(), 0);
        assert_eq!(store.version(), 0);
    }
}
