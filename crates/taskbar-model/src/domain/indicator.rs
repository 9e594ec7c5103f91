use serde::{Deserialize, Serialize};

use crate::RuntimeTask;

/// Colour of an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorColor {
    /// Literal colour such as `#ff0000`.
    Hex(String),
    /// Theme colour identifier such as `statusBarItem.warningForeground`.
    Theme(String),
}

impl IndicatorColor {
    /// Classify a configured colour string. Empty strings carry no colour.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.starts_with('#') {
            Some(IndicatorColor::Hex(raw.to_string()))
        } else {
            Some(IndicatorColor::Theme(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IndicatorColor::Hex(s) | IndicatorColor::Theme(s) => s,
        }
    }
}

/// Command an indicator triggers when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum IndicatorCommand {
    /// Execute the runtime task bound to the indicator at `index`.
    Run { index: usize },
    /// Open the overflow selection list.
    Select,
}

/// Visual state of an indicator in one run state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorLook {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<IndicatorColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<IndicatorColor>,
}

impl IndicatorLook {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Desired final state of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDescriptor {
    /// Look while the bound task is idle.
    pub idle: IndicatorLook,
    /// Look while the bound task runs, before the running marker is applied.
    pub running: IndicatorLook,
    /// Regular expression the active document path must match for the indicator to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_pattern: Option<String>,
    pub command: IndicatorCommand,
    /// Bound runtime task; `None` only for the overflow selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<RuntimeTask>,
}

impl IndicatorDescriptor {
    /// Descriptor of the reserved overflow selector.
    pub fn selector(look: IndicatorLook) -> Self {
        Self {
            running: look.clone(),
            idle: look,
            file_pattern: None,
            command: IndicatorCommand::Select,
            task: None,
        }
    }

    #[inline]
    pub fn is_selector(&self) -> bool {
        matches!(self.command, IndicatorCommand::Select)
    }
}

/// One entry of the overflow selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Live indicator the entry stands for.
    pub index: usize,
    pub task: RuntimeTask,
}
