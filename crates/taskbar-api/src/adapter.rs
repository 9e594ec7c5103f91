use std::sync::Arc;

use async_trait::async_trait;
use taskbar_core::{Engine, Host, RunTarget};
use taskbar_model::{Diagnostic, RuntimeTask};

use crate::error::ApiError;
use crate::handler::CommandHandler;

/// Adapter that bridges [`Engine`] to [`CommandHandler`].
pub struct EngineAdapter<H: Host> {
    engine: Arc<Engine<H>>,
}

impl<H: Host + 'static> EngineAdapter<H> {
    pub fn new(engine: Arc<Engine<H>>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<Engine<H>> {
        &self.engine
    }
}

#[async_trait]
impl<H: Host + 'static> CommandHandler for EngineAdapter<H> {
    async fn run(&self, target: RunTarget) -> Result<RuntimeTask, ApiError> {
        self.engine.run(target).await.map_err(ApiError::from)
    }

    async fn select(&self) -> Result<Option<RuntimeTask>, ApiError> {
        self.engine.select().await.map_err(ApiError::from)
    }

    fn report(&self, diagnostic: Diagnostic) {
        self.engine.emit(&[diagnostic]);
    }
}
