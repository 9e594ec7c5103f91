use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use async_trait::async_trait;
use taskbar_core::{ConfigSource, HostError, StatusItem, TaskProvider, Ui};
use taskbar_model::{
    ConfigDocument, ConfigMap, ConfigScope, FolderId, IndicatorColor, IndicatorCommand, PickEntry,
    RuntimeTask,
};
use tracing::{debug, info, warn};

/// Host backed by configuration documents and a runtime task snapshot read from disk.
///
/// Executions are not performed; they are logged and printed.
#[derive(Debug, Default)]
pub struct FileHost {
    docs: HashMap<ConfigScope, ConfigDocument>,
    folders: Vec<FolderId>,
    defaults: ConfigMap,
    tasks: Vec<RuntimeTask>,
    choice: Option<usize>,
}

impl FileHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, path: &Path) -> anyhow::Result<Self> {
        self.docs.insert(ConfigScope::Global, read_doc(path)?);
        Ok(self)
    }

    /// The workspace file opens a workspace even when no folder is named.
    pub fn with_workspace(mut self, path: &Path) -> anyhow::Result<Self> {
        self.docs.insert(ConfigScope::Workspace, read_doc(path)?);
        Ok(self)
    }

    pub fn with_folder(mut self, name: &str, path: &Path) -> anyhow::Result<Self> {
        self.docs
            .insert(ConfigScope::Folder(name.to_string()), read_doc(path)?);
        self.folders.push(name.to_string());
        Ok(self)
    }

    pub fn with_defaults(mut self, path: &Path) -> anyhow::Result<Self> {
        self.defaults = read_doc(path)?.0;
        Ok(self)
    }

    pub fn with_tasks(mut self, path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading runtime tasks from {}", path.display()))?;
        self.tasks = serde_json::from_str(&text)
            .with_context(|| format!("parsing runtime tasks in {}", path.display()))?;
        Ok(self)
    }

    /// Position the selection list resolves to; `None` dismisses it.
    pub fn with_choice(mut self, choice: Option<usize>) -> Self {
        self.choice = choice;
        self
    }
}

fn read_doc(path: &Path) -> anyhow::Result<ConfigDocument> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ConfigDocument::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

impl ConfigSource for FileHost {
    fn read_config(&self, scope: &ConfigScope) -> Option<ConfigDocument> {
        self.docs.get(scope).cloned()
    }

    fn workspace_folders(&self) -> Option<Vec<FolderId>> {
        if !self.folders.is_empty() {
            return Some(self.folders.clone());
        }
        self.docs
            .contains_key(&ConfigScope::Workspace)
            .then(|| vec!["workspace".to_string()])
    }

    fn default_settings(&self) -> ConfigMap {
        self.defaults.clone()
    }
}

#[async_trait]
impl TaskProvider for FileHost {
    async fn fetch_tasks(&self) -> Result<Vec<RuntimeTask>, HostError> {
        Ok(self.tasks.clone())
    }

    async fn execute(&self, task: &RuntimeTask) -> Result<(), HostError> {
        if !self.tasks.contains(task) {
            return Err(HostError::new(format!("task {} is not known", task.name)));
        }
        info!(task = %task.name, "executing");
        println!("run {}", task.name);
        Ok(())
    }
}

#[async_trait]
impl Ui for FileHost {
    fn create_item(&self) -> Box<dyn StatusItem> {
        Box::new(TraceItem::default())
    }

    async fn pick(&self, entries: &[PickEntry]) -> Option<usize> {
        for (pos, entry) in entries.iter().enumerate() {
            println!("  [{pos}] {}", entry.label);
        }
        self.choice.filter(|&c| c < entries.len())
    }

    fn warn(&self, message: &str) {
        warn!(%message, "host warning");
        eprintln!("warning: {message}");
    }
}

/// Widget that only traces what it is told.
#[derive(Debug, Default)]
struct TraceItem {
    text: String,
}

impl StatusItem for TraceItem {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_tooltip(&mut self, tooltip: Option<&str>) {
        debug!(item = %self.text, ?tooltip, "tooltip");
    }

    fn set_color(&mut self, color: Option<&IndicatorColor>) {
        debug!(item = %self.text, color = color.map(IndicatorColor::as_str), "color");
    }

    fn set_background(&mut self, color: Option<&IndicatorColor>) {
        debug!(item = %self.text, background = color.map(IndicatorColor::as_str), "background");
    }

    fn set_command(&mut self, command: IndicatorCommand) {
        debug!(item = %self.text, ?command, "command");
    }

    fn show(&mut self) {
        debug!(item = %self.text, "show");
    }

    fn hide(&mut self) {
        debug!(item = %self.text, "hide");
    }

    fn dispose(&mut self) {
        debug!(item = %self.text, "dispose");
    }
}
