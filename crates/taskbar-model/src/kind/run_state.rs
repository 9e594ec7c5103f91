use serde::{Deserialize, Serialize};

/// Execution state of the runtime task bound to an indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl RunState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}
