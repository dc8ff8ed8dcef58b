use thiserror::Error;

use crate::module::ModuleError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no module registered under namespace '{0}'")]
    UnknownModule(String),
    #[error("module namespace '{0}' is already registered")]
    DuplicateModule(String),
    #[error("invalid module namespace '{namespace}': {reason}")]
    InvalidNamespace {
        namespace: String,
        reason: &'static str,
    },
    #[error("required module '{0}' is not registered")]
    MissingModule(String),
    #[error("unknown mutation '{0}' (expected currentProjectId or previousUrl)")]
    UnknownMutation(String),
    #[error("invalid assignment '{0}' (expected NAME=VALUE)")]
    InvalidAssignment(String),
    #[error("module '{namespace}': {source}")]
    Module {
        namespace: String,
        #[source]
        source: ModuleError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
