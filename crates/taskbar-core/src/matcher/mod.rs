//! Pairing of declared tasks with runtime tasks.

use taskbar_model::{Diagnostic, RuntimeTask, TaskIdentity};
use tracing::{debug, trace};

use crate::attrs::AttributeResolver;
use crate::identity::{self, IdentityShape, RuntimeIdentity};
use crate::resolve::EffectiveTaskView;

/// A declared task and the runtime task it claimed.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub view: EffectiveTaskView,
    pub task: RuntimeTask,
}

/// Outcome of one matching run.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// Claimed pairs in declaration order.
    pub pairs: Vec<MatchedPair>,
    /// Declared tasks that claimed nothing.
    pub unmatched: Vec<EffectiveTaskView>,
    /// Workspace runtime tasks no declaration claimed, in host order.
    pub orphans: Vec<RuntimeTask>,
    /// Declared tasks skipped because they resolve to hidden.
    pub hidden: usize,
    pub diagnostics: Vec<Diagnostic>,
}

struct Candidate {
    task: RuntimeTask,
    identity: Option<RuntimeIdentity>,
}

/// How a declared task was found compatible with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compat {
    Identity,
    NameAndDetail,
}

/// Claims runtime tasks for declared tasks in declaration order.
pub struct TaskMatcher<'a> {
    attrs: AttributeResolver<'a>,
}

impl<'a> TaskMatcher<'a> {
    pub fn new(attrs: AttributeResolver<'a>) -> Self {
        Self { attrs }
    }

    /// Match `views` (resolver order) against the host's runtime tasks.
    ///
    /// Only `Workspace` runtime tasks enter the pool. Each claims at most one declaration.
    pub fn run(&self, views: Vec<EffectiveTaskView>, tasks: &[RuntimeTask]) -> MatchReport {
        let mut pool: Vec<Candidate> = tasks
            .iter()
            .filter(|t| t.source.is_workspace())
            .map(|t| Candidate {
                identity: identity::runtime_identity(t),
                task: t.clone(),
            })
            .collect();

        let mut report = MatchReport::default();

        for view in views {
            if self.attrs.is_hidden(&view) {
                trace!(task = %view.display_name(), "hidden; not matched");
                report.hidden += 1;
                continue;
            }

            let accepted = identity::accepted(&view);
            let found: Vec<(usize, Compat)> = pool
                .iter()
                .enumerate()
                .filter_map(|(i, c)| compatible(&view, &accepted, c).map(|how| (i, how)))
                .collect();

            let Some(&(index, how)) = found.first() else {
                debug!(task = %view.display_name(), scope = %view.scope(), "no runtime task matches");
                report.diagnostics.push(Diagnostic::TaskNotFound {
                    label: view.display_name(),
                    scope: view.scope().to_string(),
                });
                report.unmatched.push(view);
                continue;
            };

            if how == Compat::NameAndDetail {
                let candidates = found
                    .iter()
                    .filter(|(_, h)| *h == Compat::NameAndDetail)
                    .count();
                if candidates > 1 {
                    report.diagnostics.push(Diagnostic::AmbiguousMatch {
                        label: view.display_name(),
                        candidates,
                    });
                }
            }

            let claimed = pool.remove(index);
            debug!(task = %claimed.task.name, scope = %view.scope(), ?how, "matched");
            report.pairs.push(MatchedPair {
                view,
                task: claimed.task,
            });
        }

        for orphan in pool {
            debug!(task = %orphan.task.name, "runtime task has no configuration");
            report.diagnostics.push(Diagnostic::NoMatchingConfiguration {
                task: orphan.task.name.clone(),
            });
            report.orphans.push(orphan.task);
        }

        report
    }
}

/// Name a declaration is known by on the host side.
fn declared_name(view: &EffectiveTaskView) -> Option<String> {
    if identity::is_package_script(view.task_type()) {
        identity::package_script_name(view)
    } else {
        view.name().map(str::to_string)
    }
}

fn compatible(
    view: &EffectiveTaskView,
    accepted: &[TaskIdentity],
    candidate: &Candidate,
) -> Option<Compat> {
    let task = &candidate.task;

    if identity::shape(view) == IdentityShape::Empty || task.definition.is_placeholder() {
        let same_name = declared_name(view).as_deref() == Some(task.name.as_str());
        let same_detail = view.detail() == task.detail.as_deref();
        return (same_name && same_detail).then_some(Compat::NameAndDetail);
    }

    let runtime = candidate.identity.as_ref()?;
    let named = declared_name(view).is_some();
    accepted
        .iter()
        .any(|id| runtime.accepts(id, named))
        .then_some(Compat::Identity)
}
