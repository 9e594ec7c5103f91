//! Collaborator seams towards the host that owns tasks, settings and widgets.
//!
//! The engine never talks to a concrete editor. A host implements the three traits below and is then usable as [`Host`].

use async_trait::async_trait;
use taskbar_model::{
    ConfigDocument, ConfigMap, ConfigScope, FolderId, IndicatorColor, IndicatorCommand, PickEntry,
    RuntimeTask,
};

use crate::error::HostError;

/// Read access to layered configuration.
pub trait ConfigSource: Send + Sync {
    /// Raw document of one scope, or `None` when the scope has no configuration.
    fn read_config(&self, scope: &ConfigScope) -> Option<ConfigDocument>;

    /// Open workspace folders in declared order; `None` when no workspace is open.
    fn workspace_folders(&self) -> Option<Vec<FolderId>>;

    /// Global default statusbar settings (`tasks.default.statusbar`).
    fn default_settings(&self) -> ConfigMap {
        ConfigMap::new()
    }
}

/// Enumeration and execution of runtime tasks.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    async fn fetch_tasks(&self) -> Result<Vec<RuntimeTask>, HostError>;

    async fn execute(&self, task: &RuntimeTask) -> Result<(), HostError>;
}

/// Widget primitives.
#[async_trait]
pub trait Ui: Send + Sync {
    /// Create a new, hidden indicator widget.
    fn create_item(&self) -> Box<dyn StatusItem>;

    /// Present a searchable list; resolves to the chosen position or `None` when cancelled.
    async fn pick(&self, entries: &[PickEntry]) -> Option<usize>;

    /// Show a user-visible warning.
    fn warn(&self, message: &str);
}

/// Everything the engine needs from its host.
pub trait Host: ConfigSource + TaskProvider + Ui {}

impl<T> Host for T where T: ConfigSource + TaskProvider + Ui {}

/// One live indicator widget.
pub trait StatusItem: Send {
    fn set_text(&mut self, text: &str);
    fn set_tooltip(&mut self, tooltip: Option<&str>);
    fn set_color(&mut self, color: Option<&IndicatorColor>);
    fn set_background(&mut self, color: Option<&IndicatorColor>);
    fn set_command(&mut self, command: IndicatorCommand);
    fn show(&mut self);
    fn hide(&mut self);
    fn dispose(&mut self);
}

/// Events the host forwards to the engine.
#[derive(Debug, Clone)]
pub enum HostEvent {
    ConfigurationChanged,
    WorkspaceFoldersChanged,
    ActiveDocumentChanged(Option<String>),
    ExecutionStarted(RuntimeTask),
    ExecutionEnded(RuntimeTask),
}

impl HostEvent {
    /// Whether the event invalidates the configuration/runtime matching.
    pub fn needs_reconcile(&self) -> bool {
        matches!(
            self,
            HostEvent::ConfigurationChanged | HostEvent::WorkspaceFoldersChanged
        )
    }
}
