//! Live indicator set.
//!
//! [`PresentationState`] owns every widget the engine created. It is only mutated by a completed pass (`sync`), by
//! visibility recomputation and by run-state events; the engine serialises all three.

mod describe;
pub use describe::DescriptorBuilder;

mod running;
pub use running::{RunStateTracker, binding_key};

mod visibility;
pub use visibility::VisibilityReport;

use regex::Regex;
use serde::Serialize;
use taskbar_model::{
    Diagnostic, IndicatorCommand, IndicatorDescriptor, IndicatorLook, PickEntry, RunState,
    RuntimeTask,
};
use tracing::{debug, trace};

use crate::host::{StatusItem, Ui};

/// Compiled file pattern of one indicator. A malformed pattern always hides its indicator.
enum FilePattern {
    None,
    Valid(Regex),
    Invalid,
}

impl FilePattern {
    fn compile(pattern: Option<&str>) -> Result<Self, Diagnostic> {
        let Some(pattern) = pattern else {
            return Ok(FilePattern::None);
        };
        Regex::new(pattern)
            .map(FilePattern::Valid)
            .map_err(|e| Diagnostic::InvalidFilePattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }
}

struct LiveIndicator {
    item: Box<dyn StatusItem>,
    descriptor: IndicatorDescriptor,
    pattern: FilePattern,
    visible: bool,
}

/// Point-in-time view of one live indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub index: usize,
    #[serde(flatten)]
    pub look: IndicatorLook,
    pub command: IndicatorCommand,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// Explicitly owned presentation state, passed into each pass.
pub struct PresentationState {
    live: Vec<LiveIndicator>,
    tracker: RunStateTracker,
    select_list: Vec<PickEntry>,
    listening: bool,
    marker: String,
}

impl PresentationState {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            live: Vec::new(),
            tracker: RunStateTracker::new(),
            select_list: Vec::new(),
            listening: false,
            marker: marker.into(),
        }
    }

    /// Number of live indicators, overflow selector included.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether document and execution events are currently applied.
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }

    /// Entries that did not fit under the visible limit at the last recomputation.
    #[inline]
    pub fn select_list(&self) -> &[PickEntry] {
        &self.select_list
    }

    /// Runtime task bound to the indicator at `index`.
    pub fn task_at(&self, index: usize) -> Option<&RuntimeTask> {
        self.live.get(index)?.descriptor.task.as_ref()
    }

    pub fn descriptor(&self, index: usize) -> Option<&IndicatorDescriptor> {
        self.live.get(index).map(|l| &l.descriptor)
    }

    /// Bring the live set in line with `descriptors`.
    ///
    /// Excess indicators are hidden and disposed from the back; missing ones are created. Every field of every indicator is
    /// then rewritten, reused or not. Malformed file patterns are reported here, once per sync.
    pub fn sync<U>(&mut self, ui: &U, descriptors: Vec<IndicatorDescriptor>) -> Vec<Diagnostic>
    where
        U: Ui + ?Sized,
    {
        self.release_from(descriptors.len());
        self.tracker.clear_bindings();
        let mut diagnostics = Vec::new();

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let pattern = FilePattern::compile(descriptor.file_pattern.as_deref())
                .unwrap_or_else(|diagnostic| {
                    debug!(index, %diagnostic, "malformed file pattern");
                    diagnostics.push(diagnostic);
                    FilePattern::Invalid
                });
            if let Some(task) = &descriptor.task {
                self.tracker.bind(task, index);
            }

            match self.live.get_mut(index) {
                Some(live) => {
                    live.descriptor = descriptor;
                    live.pattern = pattern;
                }
                None => {
                    trace!(index, "creating indicator");
                    self.live.push(LiveIndicator {
                        item: ui.create_item(),
                        descriptor,
                        pattern,
                        visible: false,
                    });
                }
            }
            self.paint(index);
        }
        diagnostics
    }

    /// Dispose every indicator and forget bindings, running tasks and the selection list.
    pub fn clear(&mut self) {
        self.release_from(0);
        self.tracker.clear();
        self.select_list.clear();
    }

    fn release_from(&mut self, len: usize) {
        while self.live.len() > len {
            if let Some(mut live) = self.live.pop() {
                trace!(index = self.live.len(), "disposing indicator");
                live.item.hide();
                live.item.dispose();
            }
        }
    }

    /// Mark `task` running. Returns `true` when a bound indicator was repainted.
    pub fn start_running(&mut self, task: &RuntimeTask) -> bool {
        match self.tracker.start(task) {
            Some(index) => {
                self.paint(index);
                true
            }
            None => false,
        }
    }

    /// Mark `task` idle again. Returns `true` when a bound indicator was repainted.
    pub fn end_running(&mut self, task: &RuntimeTask) -> bool {
        match self.tracker.end(task) {
            Some(index) => {
                self.paint(index);
                true
            }
            None => false,
        }
    }

    pub fn run_state(&self, index: usize) -> RunState {
        self.task_at(index)
            .map(|task| self.tracker.state_of(task))
            .unwrap_or_default()
    }

    /// Look currently painted on the indicator at `index`.
    pub fn current_look(&self, index: usize) -> Option<IndicatorLook> {
        let descriptor = &self.live.get(index)?.descriptor;
        Some(match self.run_state(index) {
            RunState::Idle => descriptor.idle.clone(),
            RunState::Running => IndicatorLook {
                text: format!("{}{}", self.marker, descriptor.running.text),
                ..descriptor.running.clone()
            },
        })
    }

    fn paint(&mut self, index: usize) {
        let Some(look) = self.current_look(index) else {
            return;
        };
        let Some(live) = self.live.get_mut(index) else {
            return;
        };

        let item = &mut live.item;
        item.set_text(&look.text);
        item.set_tooltip(look.tooltip.as_deref());
        item.set_color(look.color.as_ref());
        item.set_background(look.background.as_ref());
        item.set_command(live.descriptor.command);
    }

    pub fn snapshot(&self) -> Vec<IndicatorSnapshot> {
        self.live
            .iter()
            .enumerate()
            .filter_map(|(index, live)| {
                Some(IndicatorSnapshot {
                    index,
                    look: self.current_look(index)?,
                    command: live.descriptor.command,
                    visible: live.visible,
                    task: live.descriptor.task.as_ref().map(|t| t.name.clone()),
                })
            })
            .collect()
    }
}

impl Drop for PresentationState {
    fn drop(&mut self) {
        self.release_from(0);
    }
}
