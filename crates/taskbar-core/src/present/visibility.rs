use taskbar_model::PickEntry;
use tracing::trace;

use super::{FilePattern, PresentationState};

/// Outcome of one visibility recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityReport {
    pub shown: usize,
    /// Indicators moved to the selection list.
    pub overflow: usize,
    /// Indicators hidden by their file pattern.
    pub filtered: usize,
}

impl PresentationState {
    /// Show or hide every task indicator for `active`, filling the selection list past `max_visible`.
    ///
    /// An indicator with a file pattern is hidden when no document is active. The overflow selector is shown iff the
    /// selection list ends up non-empty.
    pub fn recompute_visibility(
        &mut self,
        active: Option<&str>,
        max_visible: Option<usize>,
    ) -> VisibilityReport {
        let mut report = VisibilityReport::default();
        self.select_list.clear();
        let mut selector = None;

        for (index, live) in self.live.iter_mut().enumerate() {
            if live.descriptor.is_selector() {
                selector = Some(index);
                continue;
            }

            let passes = match &live.pattern {
                FilePattern::None => true,
                FilePattern::Valid(re) => active.is_some_and(|path| re.is_match(path)),
                FilePattern::Invalid => false,
            };

            let show = if !passes {
                report.filtered += 1;
                false
            } else if max_visible.is_some_and(|max| report.shown >= max) {
                if let Some(task) = &live.descriptor.task {
                    self.select_list.push(PickEntry {
                        label: live.descriptor.idle.text.clone(),
                        detail: live.descriptor.idle.tooltip.clone(),
                        index,
                        task: task.clone(),
                    });
                }
                report.overflow += 1;
                false
            } else {
                report.shown += 1;
                true
            };

            set_visible(live, show);
        }

        if let Some(index) = selector {
            let show = !self.select_list.is_empty();
            if let Some(live) = self.live.get_mut(index) {
                set_visible(live, show);
            }
        }

        trace!(
            shown = report.shown,
            overflow = report.overflow,
            filtered = report.filtered,
            "visibility recomputed"
        );
        report
    }

    /// Whether the indicator at `index` is currently shown.
    pub fn is_visible(&self, index: usize) -> bool {
        self.live.get(index).is_some_and(|l| l.visible)
    }
}

fn set_visible(live: &mut super::LiveIndicator, show: bool) {
    if live.visible == show {
        return;
    }
    if show {
        live.item.show();
    } else {
        live.item.hide();
    }
    live.visible = show;
}
