use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConfigMap, ConfigValue};

/// Definition types the host uses for tasks it cannot describe by an execution signature.
pub const PLACEHOLDER_TYPES: [&str; 2] = ["$empty", "$composite"];

/// Where a runtime task came from.
///
/// Only `Workspace` tasks were declared by the user and are eligible for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskSource {
    Workspace,
    Other(String),
}

impl TaskSource {
    #[inline]
    pub fn is_workspace(&self) -> bool {
        matches!(self, TaskSource::Workspace)
    }
}

impl From<String> for TaskSource {
    fn from(s: String) -> Self {
        if s == "Workspace" {
            TaskSource::Workspace
        } else {
            TaskSource::Other(s)
        }
    }
}

impl From<TaskSource> for String {
    fn from(source: TaskSource) -> Self {
        match source {
            TaskSource::Workspace => "Workspace".to_string(),
            TaskSource::Other(s) => s,
        }
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskSource::Workspace => f.write_str("Workspace"),
            TaskSource::Other(s) => f.write_str(s),
        }
    }
}

/// Type-specific definition of a runtime task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Definition type (`shell`, `process`, `npm`, `$composite`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Escaped execution identifier for shell/process tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Remaining type-specific fields (`script`, `path`, ...).
    #[serde(flatten)]
    pub fields: ConfigMap,
}

impl TaskDefinition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            fields: ConfigMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// `true` for `$empty`/`$composite` definitions, which carry no stable sub-identity.
    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER_TYPES.contains(&self.kind.as_str())
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(ConfigValue::as_str)
    }
}

/// Opaque handle of one launchable task, as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeTask {
    pub name: String,
    pub definition: TaskDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub source: TaskSource,
}

impl RuntimeTask {
    pub fn new(name: impl Into<String>, definition: TaskDefinition) -> Self {
        Self {
            name: name.into(),
            definition,
            detail: None,
            source: TaskSource::Workspace,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = TaskSource::from(source.into());
        self
    }
}
