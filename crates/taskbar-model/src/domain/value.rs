use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping node of a configuration tree.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// One node of a configuration document.
///
/// Configuration is untyped on the host side, so the model keeps it as a tagged tree: scalars, ordered sequences and mappings.
/// Sequences are always replaced wholesale when layers are merged; mappings merge key by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Seq(Vec<ConfigValue>),
    Map(ConfigMap),
}

impl ConfigValue {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Truthiness in the loose sense configuration authors expect: `false`, `null`, `0` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => *n != 0.0,
            ConfigValue::String(s) => !s.is_empty(),
            ConfigValue::Seq(_) | ConfigValue::Map(_) => true,
        }
    }

    /// Walk a path of mapping keys.
    pub fn pointer<'a>(&'a self, path: &[&str]) -> Option<&'a ConfigValue> {
        path.iter()
            .try_fold(self, |node, key| node.as_map().and_then(|m| m.get(*key)))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Map(map)
    }
}

impl TryFrom<serde_json::Value> for ConfigValue {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}
