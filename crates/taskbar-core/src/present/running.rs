use std::collections::{HashMap, HashSet};

use taskbar_model::{RunState, RuntimeTask};

use crate::identity::fingerprint;

/// Stable key of a runtime task across fetches and execution events.
///
/// Covers name, detail, source and the definition (type, execution id, remaining fields). Two handles the host reports side
/// by side always differ in at least one of these.
pub fn binding_key(task: &RuntimeTask) -> String {
    let definition = &task.definition;
    let fields = serde_json::to_string(&definition.fields).unwrap_or_default();
    let source = task.source.to_string();
    let detail = match &task.detail {
        Some(detail) => format!("+{detail}"),
        None => String::new(),
    };

    fingerprint([
        task.name.as_str(),
        detail.as_str(),
        source.as_str(),
        definition.kind.as_str(),
        definition.id.as_deref().unwrap_or_default(),
        fields.as_str(),
    ])
}

/// Binding table from runtime tasks to live indicator positions, plus the set of running tasks.
///
/// Bindings are rebuilt on every sync. The running set outlives syncs so an indicator recreated mid-execution keeps its
/// running look.
#[derive(Debug, Default)]
pub struct RunStateTracker {
    bindings: HashMap<String, usize>,
    running: HashSet<String>,
}

impl RunStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Forget bindings and running tasks.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.running.clear();
    }

    /// Bind `task` to `index`. An earlier binding of the same key is kept.
    pub fn bind(&mut self, task: &RuntimeTask, index: usize) {
        self.bindings.entry(binding_key(task)).or_insert(index);
    }

    pub fn index_of(&self, task: &RuntimeTask) -> Option<usize> {
        self.bindings.get(&binding_key(task)).copied()
    }

    pub fn state_of(&self, task: &RuntimeTask) -> RunState {
        if self.running.contains(&binding_key(task)) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Record a start. Returns the bound indicator, if any.
    pub fn start(&mut self, task: &RuntimeTask) -> Option<usize> {
        let key = binding_key(task);
        let index = self.bindings.get(&key).copied();
        self.running.insert(key);
        index
    }

    /// Record an end. Returns the bound indicator, if any.
    pub fn end(&mut self, task: &RuntimeTask) -> Option<usize> {
        let key = binding_key(task);
        self.running.remove(&key);
        self.bindings.get(&key).copied()
    }

    pub fn running(&self) -> usize {
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskbar_model::TaskDefinition;

    fn task(name: &str, id: &str) -> RuntimeTask {
        RuntimeTask::new(name, TaskDefinition::new("shell").with_id(id))
    }

    #[test]
    fn key_covers_detail_and_definition() {
        let a = task("build", "shell,make,");
        assert_eq!(binding_key(&a), binding_key(&a.clone()));
        assert_ne!(binding_key(&a), binding_key(&a.clone().with_detail("x")));
        assert_ne!(binding_key(&a), binding_key(&a.clone().with_detail("")));
        assert_ne!(binding_key(&a), binding_key(&task("build", "shell,make,all,")));
        assert_ne!(binding_key(&a), binding_key(&a.clone().with_source("npm")));
    }

    #[test]
    fn unbound_events_are_noops() {
        let mut t = RunStateTracker::new();
        let a = task("build", "shell,make,");

        assert_eq!(t.start(&a), None);
        assert_eq!(t.state_of(&a), RunState::Running);
        assert_eq!(t.end(&a), None);
        assert_eq!(t.end(&a), None);
        assert_eq!(t.running(), 0);
    }

    #[test]
    fn running_set_survives_rebinding() {
        let mut t = RunStateTracker::new();
        let a = task("build", "shell,make,");

        t.bind(&a, 0);
        assert_eq!(t.start(&a), Some(0));

        t.clear_bindings();
        t.bind(&a, 3);
        assert_eq!(t.state_of(&a), RunState::Running);
        assert_eq!(t.end(&a), Some(3));
        assert_eq!(t.state_of(&a), RunState::Idle);
    }

    #[test]
    fn same_definition_different_detail_binds_separately() {
        let mut t = RunStateTracker::new();
        let one = task("t", "shell,make,").with_detail("one");
        let two = task("t", "shell,make,").with_detail("two");
        t.bind(&one, 0);
        t.bind(&two, 1);

        assert_eq!(t.start(&one), Some(0));
        assert_eq!(t.state_of(&two), RunState::Idle);
        assert_eq!(t.index_of(&two), Some(1));
    }
}
