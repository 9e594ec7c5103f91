//! Common test utilities and mocks

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use taskbar_core::{ConfigSource, HostError, StatusItem, TaskProvider, Ui};
use taskbar_model::{
    ConfigDocument, ConfigMap, ConfigScope, ConfigValue, FolderId, IndicatorColor,
    IndicatorCommand, PickEntry, RuntimeTask, TaskDefinition,
};

/// Widget state as last written by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemState {
    pub text: String,
    pub tooltip: Option<String>,
    pub color: Option<IndicatorColor>,
    pub background: Option<IndicatorColor>,
    pub command: Option<IndicatorCommand>,
    pub shown: bool,
    pub disposed: bool,
}

struct MockItem {
    slot: usize,
    items: Arc<Mutex<Vec<ItemState>>>,
}

impl MockItem {
    fn update(&self, f: impl FnOnce(&mut ItemState)) {
        if let Some(state) = self.items.lock().get_mut(self.slot) {
            f(state);
        }
    }
}

impl StatusItem for MockItem {
    fn set_text(&mut self, text: &str) {
        self.update(|s| s.text = text.to_string());
    }

    fn set_tooltip(&mut self, tooltip: Option<&str>) {
        self.update(|s| s.tooltip = tooltip.map(str::to_string));
    }

    fn set_color(&mut self, color: Option<&IndicatorColor>) {
        self.update(|s| s.color = color.cloned());
    }

    fn set_background(&mut self, color: Option<&IndicatorColor>) {
        self.update(|s| s.background = color.cloned());
    }

    fn set_command(&mut self, command: IndicatorCommand) {
        self.update(|s| s.command = Some(command));
    }

    fn show(&mut self) {
        self.update(|s| s.shown = true);
    }

    fn hide(&mut self) {
        self.update(|s| s.shown = false);
    }

    fn dispose(&mut self) {
        self.update(|s| s.disposed = true);
    }
}

/// Mock host recording every widget call, execution and warning.
#[derive(Default)]
pub struct MockHost {
    docs: Mutex<HashMap<ConfigScope, ConfigDocument>>,
    folders: Mutex<Option<Vec<FolderId>>>,
    defaults: Mutex<ConfigMap>,
    tasks: Mutex<Vec<RuntimeTask>>,
    fetch_failure: Mutex<Option<String>>,
    execute_failure: Mutex<Option<String>>,
    choice: Mutex<Option<usize>>,
    pub items: Arc<Mutex<Vec<ItemState>>>,
    pub executed: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub picks: Mutex<Vec<Vec<String>>>,
    pub fetches: Mutex<usize>,
}

impl MockHost {
    /// Host with one open folder and no configuration.
    pub fn new() -> Self {
        let host = Self::default();
        *host.folders.lock() = Some(vec!["root".to_string()]);
        host
    }

    pub fn with_doc(self, scope: ConfigScope, doc: serde_json::Value) -> Self {
        self.set_doc(scope, doc);
        self
    }

    pub fn with_workspace(self, doc: serde_json::Value) -> Self {
        self.with_doc(ConfigScope::Workspace, doc)
    }

    pub fn with_tasks(self, tasks: Vec<RuntimeTask>) -> Self {
        *self.tasks.lock() = tasks;
        self
    }

    pub fn with_defaults(self, defaults: serde_json::Value) -> Self {
        *self.defaults.lock() = map(defaults);
        self
    }

    pub fn set_doc(&self, scope: ConfigScope, doc: serde_json::Value) {
        let doc = ConfigDocument::try_from(doc).expect("valid document");
        self.docs.lock().insert(scope, doc);
    }

    pub fn set_folders(&self, folders: Option<Vec<&str>>) {
        *self.folders.lock() = folders.map(|f| f.into_iter().map(str::to_string).collect());
    }

    pub fn set_tasks(&self, tasks: Vec<RuntimeTask>) {
        *self.tasks.lock() = tasks;
    }

    pub fn fail_fetch(&self, reason: Option<&str>) {
        *self.fetch_failure.lock() = reason.map(str::to_string);
    }

    pub fn fail_execution(&self, reason: Option<&str>) {
        *self.execute_failure.lock() = reason.map(str::to_string);
    }

    pub fn choose(&self, choice: Option<usize>) {
        *self.choice.lock() = choice;
    }

    /// Every widget ever created, disposed ones included.
    pub fn items(&self) -> Vec<ItemState> {
        self.items.lock().clone()
    }

    /// Live widgets in creation order.
    pub fn live(&self) -> Vec<ItemState> {
        self.items().into_iter().filter(|i| !i.disposed).collect()
    }

    /// Texts of live, shown widgets.
    pub fn shown(&self) -> Vec<String> {
        self.live()
            .into_iter()
            .filter(|i| i.shown)
            .map(|i| i.text)
            .collect()
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock()
    }
}

impl ConfigSource for MockHost {
    fn read_config(&self, scope: &ConfigScope) -> Option<ConfigDocument> {
        self.docs.lock().get(scope).cloned()
    }

    fn workspace_folders(&self) -> Option<Vec<FolderId>> {
        self.folders.lock().clone()
    }

    fn default_settings(&self) -> ConfigMap {
        self.defaults.lock().clone()
    }
}

#[async_trait]
impl TaskProvider for MockHost {
    async fn fetch_tasks(&self) -> Result<Vec<RuntimeTask>, HostError> {
        *self.fetches.lock() += 1;
        if let Some(reason) = self.fetch_failure.lock().clone() {
            return Err(HostError::new(reason));
        }
        Ok(self.tasks.lock().clone())
    }

    async fn execute(&self, task: &RuntimeTask) -> Result<(), HostError> {
        if let Some(reason) = self.execute_failure.lock().clone() {
            return Err(HostError::new(reason));
        }
        self.executed.lock().push(task.name.clone());
        Ok(())
    }
}

#[async_trait]
impl Ui for MockHost {
    fn create_item(&self) -> Box<dyn StatusItem> {
        let mut items = self.items.lock();
        items.push(ItemState::default());
        Box::new(MockItem {
            slot: items.len() - 1,
            items: Arc::clone(&self.items),
        })
    }

    async fn pick(&self, entries: &[PickEntry]) -> Option<usize> {
        self.picks
            .lock()
            .push(entries.iter().map(|e| e.label.clone()).collect());
        *self.choice.lock()
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().push(message.to_string());
    }
}

pub fn map(v: serde_json::Value) -> ConfigMap {
    match ConfigValue::try_from(v).expect("valid value") {
        ConfigValue::Map(m) => m,
        other => panic!("expected a mapping, got {other:?}"),
    }
}

/// Workspace shell task as the host reports it.
pub fn shell(name: &str, id: &str) -> RuntimeTask {
    RuntimeTask::new(name, TaskDefinition::new("shell").with_id(id))
}
