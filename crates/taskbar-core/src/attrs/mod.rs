//! Attribute precedence.
//!
//! First hit wins:
//! 1. `options.statusbar.running.<key>` while the task runs;
//! 2. `options.statusbar.<key>`;
//! 3. the task's own field, for label/detail/icon/hide only (label and detail fall back to the runtime task);
//! 4. global default settings, for hide and color only.
//!
//! `null` counts as absent at every level.

use taskbar_model::{Attribute, ConfigMap, ConfigValue, RunState, RuntimeTask};

use crate::resolve::EffectiveTaskView;

/// Resolves display attributes against one set of global defaults.
#[derive(Debug, Clone, Copy)]
pub struct AttributeResolver<'a> {
    defaults: &'a ConfigMap,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(defaults: &'a ConfigMap) -> Self {
        Self { defaults }
    }

    pub fn resolve(
        &self,
        view: Option<&EffectiveTaskView>,
        task: Option<&RuntimeTask>,
        state: RunState,
        attr: Attribute,
    ) -> Option<ConfigValue> {
        let statusbar = view.and_then(EffectiveTaskView::statusbar);

        if state.is_running() {
            let running = statusbar
                .and_then(|s| s.get("running"))
                .and_then(ConfigValue::as_map);
            if let Some(v) = running.and_then(|m| lookup(m, attr)) {
                return Some(v.clone());
            }
        }

        if let Some(v) = statusbar.and_then(|m| lookup(m, attr)) {
            return Some(v.clone());
        }
        if attr == Attribute::Hide && view.is_some_and(EffectiveTaskView::statusbar_hidden) {
            return Some(ConfigValue::Bool(true));
        }

        if let Some(v) = builtin(view, task, attr) {
            return Some(v);
        }

        if attr.has_global_default() {
            return lookup(self.defaults, attr).cloned();
        }
        None
    }

    /// Resolved attribute as a string; non-string values are ignored.
    pub fn text(
        &self,
        view: Option<&EffectiveTaskView>,
        task: Option<&RuntimeTask>,
        state: RunState,
        attr: Attribute,
    ) -> Option<String> {
        match self.resolve(view, task, state, attr)? {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Effective `hide` of a declared task, evaluated before it is matched.
    pub fn is_hidden(&self, view: &EffectiveTaskView) -> bool {
        self.resolve(Some(view), None, RunState::Idle, Attribute::Hide)
            .is_some_and(|v| v.is_truthy())
    }

    /// Effective `hide` of a runtime task no declaration claimed; only the global default can apply.
    pub fn is_orphan_hidden(&self, task: &RuntimeTask) -> bool {
        self.resolve(None, Some(task), RunState::Idle, Attribute::Hide)
            .is_some_and(|v| v.is_truthy())
    }
}

fn lookup(map: &ConfigMap, attr: Attribute) -> Option<&ConfigValue> {
    attr.keys()
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !matches!(v, ConfigValue::Null))
}

fn builtin(
    view: Option<&EffectiveTaskView>,
    task: Option<&RuntimeTask>,
    attr: Attribute,
) -> Option<ConfigValue> {
    if !attr.has_builtin() {
        return None;
    }
    let from_view = |key: &str| {
        view.and_then(|v| v.get(key))
            .filter(|v| !matches!(v, ConfigValue::Null))
            .cloned()
    };

    match attr {
        Attribute::Label => view
            .and_then(EffectiveTaskView::name)
            .or(task.map(|t| t.name.as_str()))
            .map(ConfigValue::from),
        Attribute::Detail => view
            .and_then(EffectiveTaskView::detail)
            .or(task.and_then(|t| t.detail.as_deref()))
            .map(ConfigValue::from),
        Attribute::Icon => from_view("icon"),
        Attribute::Hide => from_view("hide"),
        _ => None,
    }
}
