//! Configuration resolution: scope walking, platform overlays and layer merging.

mod merge;
pub use merge::{ConfigMerger, merge_layer};

mod overlay;
pub use overlay::PlatformOverlay;

use taskbar_model::{ConfigMap, ConfigScope, ConfigValue, FolderId, Platform};
use tracing::{debug, trace};

use crate::host::ConfigSource;

/// Type assumed for a task that declares none.
pub const DEFAULT_TASK_TYPE: &str = "process";

/// Fully merged, platform-resolved configuration of one declared task.
///
/// Built fresh on every pass and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTaskView {
    scope: ConfigScope,
    position: usize,
    fields: ConfigMap,
}

impl EffectiveTaskView {
    pub fn new(scope: ConfigScope, position: usize, fields: ConfigMap) -> Self {
        Self {
            scope,
            position,
            fields,
        }
    }

    #[inline]
    pub fn scope(&self) -> &ConfigScope {
        &self.scope
    }

    /// Position of the entry inside its document's `tasks` sequence.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn fields(&self) -> &ConfigMap {
        &self.fields
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Declared name: `label`, or the legacy `taskName` when no label key exists.
    pub fn name(&self) -> Option<&str> {
        if self.fields.contains_key("label") {
            self.get_str("label")
        } else {
            self.get_str("taskName")
        }
    }

    pub fn task_type(&self) -> &str {
        self.get_str("type").unwrap_or(DEFAULT_TASK_TYPE)
    }

    pub fn type_declared(&self) -> bool {
        self.get_str("type").is_some()
    }

    /// The task's own `detail` field.
    pub fn detail(&self) -> Option<&str> {
        self.get_str("detail")
    }

    fn statusbar_value(&self) -> Option<&ConfigValue> {
        self.get("options")
            .and_then(ConfigValue::as_map)
            .and_then(|options| options.get("statusbar"))
    }

    /// `options.statusbar` when it is a mapping.
    pub fn statusbar(&self) -> Option<&ConfigMap> {
        self.statusbar_value().and_then(ConfigValue::as_map)
    }

    /// Legacy form `"options": { "statusbar": "hide" }`.
    pub fn statusbar_hidden(&self) -> bool {
        self.statusbar_value().and_then(ConfigValue::as_str) == Some("hide")
    }

    /// Label used in diagnostics: the name, or the type when unnamed.
    pub fn display_name(&self) -> String {
        self.name()
            .map(str::to_string)
            .unwrap_or_else(|| self.task_type().to_string())
    }
}

/// Walks every scope in precedence order and yields effective task views.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver {
    merger: ConfigMerger,
}

impl ConfigResolver {
    pub fn new(platform: Platform) -> Self {
        Self {
            merger: ConfigMerger::new(platform),
        }
    }

    /// Scopes in visiting order: global, workspace, then each folder as declared.
    pub fn scopes(folders: &[FolderId]) -> Vec<ConfigScope> {
        let mut scopes = vec![ConfigScope::Global, ConfigScope::Workspace];
        scopes.extend(folders.iter().cloned().map(ConfigScope::Folder));
        scopes
    }

    pub fn resolve<S>(&self, source: &S, folders: &[FolderId]) -> Vec<EffectiveTaskView>
    where
        S: ConfigSource + ?Sized,
    {
        let mut views = Vec::new();

        for scope in Self::scopes(folders) {
            let Some(document) = source.read_config(&scope) else {
                trace!(%scope, "no configuration document");
                continue;
            };
            let Some(entries) = document.tasks() else {
                trace!(%scope, "document declares no tasks");
                continue;
            };

            for (position, entry) in entries.iter().enumerate() {
                let Some(entry) = entry.as_map() else {
                    debug!(%scope, position, "skipping task entry that is not an object");
                    continue;
                };
                let fields = self.merger.merge(&document, entry);
                views.push(EffectiveTaskView::new(scope.clone(), position, fields));
            }
        }

        debug!(views = views.len(), "configuration resolved");
        views
    }
}
