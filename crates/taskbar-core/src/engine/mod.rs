//! Reconciliation passes and host event handling.

mod report;
pub use report::PassReport;

use std::sync::Arc;

use parking_lot::Mutex as SyncMutex;
use taskbar_model::{Diagnostic, RuntimeTask};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    attrs::AttributeResolver,
    config::EngineConfig,
    debounce::{Debouncer, Schedule},
    error::CoreError,
    host::{Host, HostEvent},
    matcher::TaskMatcher,
    present::{DescriptorBuilder, IndicatorSnapshot, PresentationState},
    resolve::ConfigResolver,
    sink::DiagnosticSink,
};

/// What the run command targets.
#[derive(Debug, Clone)]
pub enum RunTarget {
    /// Position in the live indicator array.
    Index(usize),
    Task(RuntimeTask),
}

/// Owns the presentation state and drives it from host events.
///
/// Passes never overlap: a pass holds the pass lock from fetch to apply. Document and execution events only touch settled
/// state.
pub struct Engine<H: Host> {
    host: Arc<H>,
    config: EngineConfig,
    sinks: Vec<Arc<dyn DiagnosticSink>>,
    debouncer: Debouncer,
    pass: Mutex<()>,
    state: Mutex<PresentationState>,
    active: SyncMutex<Option<String>>,
}

impl<H: Host + 'static> Engine<H> {
    pub fn new(host: Arc<H>, config: EngineConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.debounce()),
            state: Mutex::new(PresentationState::new(config.running_marker.as_str())),
            host,
            config,
            sinks: Vec::new(),
            pass: Mutex::new(()),
            active: SyncMutex::new(None),
        }
    }

    pub fn with_sinks(mut self, sinks: Vec<Arc<dyn DiagnosticSink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    pub fn with_active_document(self, path: Option<String>) -> Self {
        *self.active.lock() = path;
        self
    }

    #[inline]
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Activation: run the first pass and count it towards the debounce interval.
    pub async fn start(&self) -> PassReport {
        self.debouncer.mark_fired();
        info!("task indicators starting");
        self.reconcile().await
    }

    /// One full pass: resolve configuration, fetch runtime tasks, match, describe, sync, recompute visibility.
    #[instrument(level = "debug", skip(self))]
    pub async fn reconcile(&self) -> PassReport {
        let _pass = self.pass.lock().await;

        // 1) No folders: tear down and stop listening
        let folders = self
            .host
            .workspace_folders()
            .filter(|folders| !folders.is_empty());
        let Some(folders) = folders else {
            debug!("no workspace folders; clearing indicators");
            {
                let mut state = self.state.lock().await;
                state.clear();
                state.set_listening(false);
            }
            let report = PassReport::failed(Diagnostic::NoWorkspace);
            self.emit(&report.diagnostics);
            return report;
        };

        // 2) Configuration, then the single asynchronous fetch
        let views = ConfigResolver::new(self.config.platform).resolve(self.host.as_ref(), &folders);
        let tasks = match self.host.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "fetching runtime tasks failed; keeping current indicators");
                let report = PassReport::failed(Diagnostic::FetchFailed { reason: e.message });
                self.emit(&report.diagnostics);
                return report;
            }
        };
        trace!(views = views.len(), tasks = tasks.len(), "pass inputs ready");

        // 3) Match and describe
        let defaults = self.host.default_settings();
        let attrs = AttributeResolver::new(&defaults);
        let matched = TaskMatcher::new(attrs).run(views, &tasks);
        let descriptors = DescriptorBuilder::new(attrs, &self.config).build(&matched);

        // 4) Apply
        let active = self.active.lock().clone();
        let mut report = PassReport::from_match(&matched);
        {
            let mut state = self.state.lock().await;
            state.set_listening(true);
            let malformed = state.sync(self.host.as_ref(), descriptors);
            let visibility = state.recompute_visibility(active.as_deref(), self.config.max_visible);
            report.absorb(state.len(), visibility, malformed);
        }

        self.emit(&report.diagnostics);
        debug!(
            indicators = report.indicators,
            shown = report.shown,
            overflow = report.overflow,
            "pass applied"
        );
        report
    }

    /// Debounced pass.
    pub fn schedule(self: &Arc<Self>) -> Schedule {
        let engine = Arc::clone(self);
        self.debouncer.trigger(move || async move {
            engine.reconcile().await;
        })
    }

    pub async fn handle(self: &Arc<Self>, event: HostEvent) {
        trace!(?event, "host event");
        match event {
            HostEvent::ConfigurationChanged | HostEvent::WorkspaceFoldersChanged => {
                self.schedule();
            }
            HostEvent::ActiveDocumentChanged(path) => self.on_active_document(path).await,
            HostEvent::ExecutionStarted(task) => self.on_execution_started(&task).await,
            HostEvent::ExecutionEnded(task) => self.on_execution_ended(&task).await,
        }
    }

    pub async fn on_active_document(&self, path: Option<String>) {
        *self.active.lock() = path.clone();

        let mut state = self.state.lock().await;
        if state.is_listening() {
            state.recompute_visibility(path.as_deref(), self.config.max_visible);
        }
    }

    pub async fn on_execution_started(&self, task: &RuntimeTask) {
        let mut state = self.state.lock().await;
        if state.is_listening() && !state.start_running(task) {
            trace!(task = %task.name, "started task is not presented");
        }
    }

    pub async fn on_execution_ended(&self, task: &RuntimeTask) {
        let mut state = self.state.lock().await;
        if state.is_listening() && !state.end_running(task) {
            trace!(task = %task.name, "ended task is not presented");
        }
    }

    /// Execute a runtime task. Failures are shown to the user through the host.
    #[instrument(level = "debug", skip(self))]
    pub async fn run(&self, target: RunTarget) -> Result<RuntimeTask, CoreError> {
        let task = match target {
            RunTarget::Task(task) => task,
            RunTarget::Index(index) => {
                let state = self.state.lock().await;
                if index >= state.len() {
                    return Err(CoreError::InvalidIndex(index));
                }
                state.task_at(index).cloned().ok_or(CoreError::Unbound(index))?
            }
        };

        match self.host.execute(&task).await {
            Ok(()) => {
                debug!(task = %task.name, "task executed");
                Ok(task)
            }
            Err(e) => {
                self.host.warn(&e.message);
                self.emit(&[Diagnostic::ExecutionFailed {
                    task: task.name.clone(),
                    reason: e.message.clone(),
                }]);
                Err(CoreError::Execution {
                    task: task.name,
                    source: e,
                })
            }
        }
    }

    /// Open the selection list; a choice is run. Returns the executed task, or `None` when nothing was chosen.
    pub async fn select(&self) -> Result<Option<RuntimeTask>, CoreError> {
        let entries = self.state.lock().await.select_list().to_vec();
        if entries.is_empty() {
            trace!("selection list is empty");
            return Ok(None);
        }

        let Some(choice) = self.host.pick(&entries).await else {
            return Ok(None);
        };
        let entry = entries.get(choice).ok_or(CoreError::InvalidIndex(choice))?;
        self.run(RunTarget::Task(entry.task.clone())).await.map(Some)
    }

    /// Forward diagnostics to every sink.
    pub fn emit(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            trace!(kind = ?diagnostic.kind(), "{diagnostic}");
            for sink in &self.sinks {
                sink.on_diagnostic(diagnostic);
            }
        }
    }

    pub async fn snapshot(&self) -> Vec<IndicatorSnapshot> {
        self.state.lock().await.snapshot()
    }

    /// Cancel pending work and release every indicator.
    pub async fn dispose(&self) {
        self.debouncer.cancel();
        let mut state = self.state.lock().await;
        state.clear();
        state.set_listening(false);
        info!("task indicators disposed");
    }
}
