//! Root-level state held directly by the store.
//!
//! Only `project_id` and `previous_url` are writable, and only through
//! [`Store::commit`](crate::Store::commit). The point thresholds are fixed
//! when the state is constructed.

use serde::{Deserialize, Serialize};

use crate::settings::ThresholdSettings;

/// Default value for both point thresholds.
pub const DEFAULT_MINIMUM_POINTS: u32 = 100;

/// Field names of the root state, as exposed to readers and snapshots.
pub const ROOT_FIELD_NAMES: &[&str] = &[
    "projectId",
    "previousUrl",
    "minimumProjectPoints",
    "minimumSubjectPoints",
];

/// The four scalar fields owned by the root container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootState {
    project_id: String,
    previous_url: String,
    minimum_project_points: u32,
    minimum_subject_points: u32,
}

impl Default for RootState {
    fn default() -> Self {
        Self::new(&ThresholdSettings::default())
    }
}

impl RootState {
    /// Create the initial state with the given thresholds.
    ///
    /// `project_id` and `previous_url` start empty, meaning "none selected"
    /// and "none recorded".
    pub fn new(thresholds: &ThresholdSettings) -> Self {
        Self {
            project_id: String::new(),
            previous_url: String::new(),
            minimum_project_points: thresholds.minimum_project_points,
            minimum_subject_points: thresholds.minimum_subject_points,
        }
    }

    /// Identifier of the active project (empty when none is selected).
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Last navigated location (empty when none is recorded).
    pub fn previous_url(&self) -> &str {
        &self.previous_url
    }

    pub fn minimum_project_points(&self) -> u32 {
        self.minimum_project_points
    }

    pub fn minimum_subject_points(&self) -> u32 {
        self.minimum_subject_points
    }

    pub(crate) fn replace_project_id(&mut self, value: String) -> String {
        std::mem::replace(&mut self.project_id, value)
    }

    pub(crate) fn replace_previous_url(&mut self, value: String) -> String {
        std::mem::replace(&mut self.previous_url, value)
    }
}
