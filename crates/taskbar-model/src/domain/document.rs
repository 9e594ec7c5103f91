use serde::{Deserialize, Serialize};

use crate::{ConfigMap, ConfigValue, ModelError};

/// Top-level configuration document of one scope, as read from the host.
///
/// The document is borrowed by the resolver; only the parts merged into an effective view are ever copied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(pub ConfigMap);

impl ConfigDocument {
    /// Keys that describe the document itself and are never inherited by its tasks.
    pub const STRUCTURAL_KEYS: [&'static str; 2] = ["tasks", "version"];

    pub fn new(root: ConfigMap) -> Self {
        Self(root)
    }

    /// Parse a document from JSON text. The root must be an object.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let value: ConfigValue = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    #[inline]
    pub fn root(&self) -> &ConfigMap {
        &self.0
    }

    /// Declared task entries, or `None` when `tasks` is missing or not a sequence.
    pub fn tasks(&self) -> Option<&[ConfigValue]> {
        self.0.get("tasks").and_then(ConfigValue::as_seq)
    }

    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(ConfigValue::as_str)
    }
}

impl TryFrom<ConfigValue> for ConfigDocument {
    type Error = ModelError;

    fn try_from(value: ConfigValue) -> Result<Self, Self::Error> {
        match value {
            ConfigValue::Map(root) => Ok(Self(root)),
            _ => Err(ModelError::NotAnObject),
        }
    }
}

impl TryFrom<serde_json::Value> for ConfigDocument {
    type Error = ModelError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::try_from(ConfigValue::try_from(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_tasks_and_version() {
        let doc = ConfigDocument::try_from(json!({
            "version": "2.0.0",
            "tasks": [{ "label": "a" }, { "label": "b" }]
        }))
        .unwrap();

        assert_eq!(doc.version(), Some("2.0.0"));
        assert_eq!(doc.tasks().map(|t| t.len()), Some(2));
    }

    #[test]
    fn tasks_must_be_a_sequence() {
        let doc = ConfigDocument::try_from(json!({ "tasks": { "label": "a" } })).unwrap();
        assert!(doc.tasks().is_none());
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            ConfigDocument::from_json("[1, 2]"),
            Err(ModelError::NotAnObject)
        ));
        assert!(matches!(
            ConfigDocument::from_json("{"),
            Err(ModelError::Parse(_))
        ));
    }
}
