//! Named root mutations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A write to one of the two mutable root fields.
///
/// Serialized as `{"currentProjectId": "..."}` / `{"previousUrl": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    #[serde(rename = "currentProjectId")]
    CurrentProjectId(String),
    #[serde(rename = "previousUrl")]
    PreviousUrl(String),
}

impl Mutation {
    pub const CURRENT_PROJECT_ID: &'static str = "currentProjectId";
    pub const PREVIOUS_URL: &'static str = "previousUrl";

    /// All mutation names accepted by [`Mutation::parse`].
    pub const fn names() -> &'static [&'static str] {
        &[Self::CURRENT_PROJECT_ID, Self::PREVIOUS_URL]
    }

    /// Resolve a mutation by its wire name.
    pub fn parse(name: &str, value: impl Into<String>) -> Result<Self> {
        match name {
            Self::CURRENT_PROJECT_ID => Ok(Self::CurrentProjectId(value.into())),
            Self::PREVIOUS_URL => Ok(Self::PreviousUrl(value.into())),
            other => Err(StoreError::UnknownMutation(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CurrentProjectId(_) => Self::CURRENT_PROJECT_ID,
            Self::PreviousUrl(_) => Self::PREVIOUS_URL,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::CurrentProjectId(value) | Self::PreviousUrl(value) => value,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name(), self.value())
    }
}

/// Parses `NAME=VALUE`. The value may be empty and may itself contain `=`.
impl FromStr for Mutation {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| StoreError::InvalidAssignment(s.to_string()))?;
        Self::parse(name.trim(), value)
    }
}
