use async_trait::async_trait;
use taskbar_core::RunTarget;
use taskbar_model::{Diagnostic, RuntimeTask};

use crate::error::ApiError;

/// Backend of the exposed commands.
///
/// [`EngineAdapter`](crate::EngineAdapter) is the ready-made implementation; custom handlers can wrap it with extra
/// policy (confirmation prompts, auditing, ...).
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    /// Execute a runtime task given directly or by indicator position.
    async fn run(&self, target: RunTarget) -> Result<RuntimeTask, ApiError>;

    /// Open the overflow selection list and run the choice, if any.
    async fn select(&self) -> Result<Option<RuntimeTask>, ApiError>;

    /// Record a diagnostic about a rejected command.
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(kind = ?diagnostic.kind(), "{diagnostic}");
    }
}
