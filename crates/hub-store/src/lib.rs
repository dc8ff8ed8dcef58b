//! Root state container for the Hub web client.
//!
//! The store holds four root fields and composes the feature modules
//! (`auth`, `users`, `subjects`, `projects`, `badges`, `config`,
//! `libVersion`) under their namespaces:
//!
//! - **RootState**: `projectId`, `previousUrl` and the two point thresholds
//! - **Mutation**: the two named root writes
//! - **FeatureModule**: capability every registered module satisfies
//! - **Store**: composition, commits, observers and snapshots
//!
//! The store is an explicit value handed to whoever needs it; there is no
//! global instance.

pub mod error;
pub mod module;
pub mod mutation;
pub mod registry;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{Result, StoreError};
pub use module::{FeatureModule, ModuleError, ModuleName, SlotModule};
pub use mutation::Mutation;
pub use registry::ModuleRegistry;
pub use settings::{
    StoreSettings, ThresholdSettings, load_or_default, load_settings, settings_path,
};
pub use state::RootState;
pub use store::{Change, Store, StoreBuilder, SubscriptionId};
