use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskbar_model::{Platform, UnmatchedPolicy};

use crate::error::CoreError;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum interval between two debounced reconciliation passes.
    pub debounce_ms: u64,
    /// Maximum number of shown indicators; the rest go to the selection list.
    pub max_visible: Option<usize>,
    pub unmatched_policy: UnmatchedPolicy,
    /// Prefix of an indicator's text while its task runs.
    pub running_marker: String,
    pub overflow_text: String,
    pub overflow_tooltip: Option<String>,
    /// Active overlay bucket.
    pub platform: Platform,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            max_visible: None,
            unmatched_policy: UnmatchedPolicy::default(),
            running_marker: "$(sync~spin) ".to_string(),
            overflow_text: "$(ellipsis)".to_string(),
            overflow_tooltip: Some("More tasks".to_string()),
            platform: Platform::current(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    #[inline]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = Some(max);
        self
    }

    pub fn with_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched_policy = policy;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}
