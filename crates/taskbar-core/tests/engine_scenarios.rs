//! End-to-end reconciliation scenarios against a recording host.

mod common;

use std::sync::Arc;

use serde_json::json;
use taskbar_core::{Collector, CoreError, DiagnosticSink, Engine, EngineConfig, HostEvent, RunTarget};
use taskbar_model::{
    ConfigScope, Diagnostic, DiagnosticKind, IndicatorColor, IndicatorCommand, Platform,
    UnmatchedPolicy,
};

use common::{MockHost, shell};

fn engine(host: &Arc<MockHost>, config: EngineConfig) -> (Arc<Engine<MockHost>>, Collector) {
    let collector = Collector::new();
    let sinks: Vec<Arc<dyn DiagnosticSink>> = vec![Arc::new(collector.clone())];
    let engine = Engine::new(Arc::clone(host), config.with_platform(Platform::Linux)).with_sinks(sinks);
    (Arc::new(engine), collector)
}

fn build_host() -> MockHost {
    MockHost::new()
        .with_workspace(json!({
            "version": "2.0.0",
            "tasks": [{
                "label": "build",
                "command": "make",
                "args": ["all"],
                "options": { "statusbar": { "color": "#ff0000" } }
            }]
        }))
        .with_tasks(vec![shell("build", "shell,make,all,")])
}

fn three_rust_tasks() -> MockHost {
    let task = |name: &str| {
        json!({
            "label": name,
            "type": "shell",
            "command": name,
            "options": { "statusbar": { "filePattern": "\\.rs$" } }
        })
    };
    MockHost::new()
        .with_workspace(json!({ "tasks": [task("a"), task("b"), task("c")] }))
        .with_tasks(vec![shell("a", "shell,a,"), shell("b", "shell,b,"), shell("c", "shell,c,")])
}

#[tokio::test]
async fn single_configured_task_gets_one_indicator() {
    let host = Arc::new(build_host());
    let (engine, diagnostics) = engine(&host, EngineConfig::default());

    let report = engine.start().await;

    assert!(report.applied);
    assert_eq!(report.indicators, 1);
    assert_eq!(report.matched, 1);
    assert!(diagnostics.snapshot().is_empty());

    let live = host.live();
    assert_eq!(live.len(), 2);
    assert_eq!(live[0].text, "build");
    assert_eq!(live[0].color, Some(IndicatorColor::Hex("#ff0000".into())));
    assert_eq!(live[0].command, Some(IndicatorCommand::Run { index: 0 }));
    assert!(live[0].shown);
    assert_eq!(live[1].command, Some(IndicatorCommand::Select));
    assert!(!live[1].shown);

    let ran = engine.run(RunTarget::Index(0)).await.expect("run by index");
    assert_eq!(ran.name, "build");
    assert_eq!(host.executed(), ["build"]);
}

#[tokio::test]
async fn overflow_beyond_max_visible() {
    let host = Arc::new(three_rust_tasks());
    let (engine, _) = engine(&host, EngineConfig::default().with_max_visible(2));
    engine.handle(HostEvent::ActiveDocumentChanged(Some("src/lib.rs".into()))).await;

    let report = engine.start().await;

    assert_eq!(report.shown, 2);
    assert_eq!(report.overflow, 1);
    assert_eq!(host.shown(), ["a", "b", "$(ellipsis)"]);

    host.choose(Some(0));
    let picked = engine.select().await.expect("select").expect("a choice");
    assert_eq!(picked.name, "c");
    assert_eq!(host.picks.lock()[0], ["c"]);
    assert_eq!(host.executed(), ["c"]);
}

#[tokio::test]
async fn active_document_drives_visibility() {
    let host = Arc::new(three_rust_tasks());
    let (engine, _) = engine(&host, EngineConfig::default());

    engine.start().await;
    assert!(host.shown().is_empty());

    engine.handle(HostEvent::ActiveDocumentChanged(Some("main.rs".into()))).await;
    assert_eq!(host.shown(), ["a", "b", "c"]);

    engine.handle(HostEvent::ActiveDocumentChanged(Some("README.md".into()))).await;
    assert!(host.shown().is_empty());
}

#[tokio::test]
async fn cancelled_selection_runs_nothing() {
    let host = Arc::new(three_rust_tasks());
    let (engine, _) = engine(&host, EngineConfig::default().with_max_visible(1));
    engine.on_active_document(Some("x.rs".into())).await;
    engine.start().await;

    host.choose(None);
    assert!(engine.select().await.expect("select").is_none());
    assert!(host.executed().is_empty());
}

#[tokio::test]
async fn execution_events_toggle_running_marker() {
    let host = Arc::new(
        MockHost::new()
            .with_workspace(json!({
                "tasks": [{
                    "label": "watch",
                    "type": "shell",
                    "command": "cargo watch",
                    "options": { "statusbar": {
                        "color": "blue",
                        "running": { "color": "red", "label": "watching" }
                    } }
                }]
            }))
            .with_tasks(vec![shell("watch", "shell,cargo watch,")]),
    );
    let (engine, _) = engine(&host, EngineConfig::default());
    engine.start().await;

    let task = shell("watch", "shell,cargo watch,");
    engine.handle(HostEvent::ExecutionStarted(task.clone())).await;
    let live = host.live();
    assert_eq!(live[0].text, "$(sync~spin) watching");
    assert_eq!(live[0].color, Some(IndicatorColor::Theme("red".into())));

    // a pass during execution keeps the running look
    engine.reconcile().await;
    assert_eq!(host.live()[0].text, "$(sync~spin) watching");

    engine.handle(HostEvent::ExecutionEnded(task)).await;
    let live = host.live();
    assert_eq!(live[0].text, "watch");
    assert_eq!(live[0].color, Some(IndicatorColor::Theme("blue".into())));

    // unknown tasks are ignored
    engine
        .handle(HostEvent::ExecutionStarted(shell("other", "shell,other,")))
        .await;
    assert_eq!(host.live()[0].text, "watch");
}

#[tokio::test]
async fn invalid_index_is_an_error_without_side_effects() {
    let host = Arc::new(build_host());
    let (engine, _) = engine(&host, EngineConfig::default());
    engine.start().await;

    assert!(matches!(
        engine.run(RunTarget::Index(7)).await,
        Err(CoreError::InvalidIndex(7))
    ));
    // the overflow selector is bound to no task
    assert!(matches!(
        engine.run(RunTarget::Index(1)).await,
        Err(CoreError::Unbound(1))
    ));
    assert!(host.executed().is_empty());
}

#[tokio::test]
async fn execution_failure_warns_user() {
    let host = Arc::new(build_host());
    let (engine, diagnostics) = engine(&host, EngineConfig::default());
    engine.start().await;
    host.fail_execution(Some("make: command not found"));

    let result = engine.run(RunTarget::Index(0)).await;

    assert!(matches!(result, Err(CoreError::Execution { .. })));
    assert_eq!(host.warnings(), ["make: command not found"]);
    assert!(diagnostics
        .snapshot()
        .iter()
        .any(|d| d.kind() == DiagnosticKind::ExecutionFailed));
    assert_eq!(host.live()[0].text, "build");
}

#[tokio::test]
async fn fetch_failure_keeps_previous_indicators() {
    let host = Arc::new(build_host());
    let (engine, diagnostics) = engine(&host, EngineConfig::default());
    engine.start().await;

    host.fail_fetch(Some("provider crashed"));
    let report = engine.reconcile().await;

    assert!(!report.applied);
    assert_eq!(
        diagnostics.snapshot(),
        [Diagnostic::FetchFailed {
            reason: "provider crashed".into()
        }]
    );
    assert_eq!(host.live().len(), 2);
}

#[tokio::test]
async fn closing_the_workspace_tears_down() {
    let host = Arc::new(build_host());
    let (engine, diagnostics) = engine(&host, EngineConfig::default());
    engine.start().await;

    host.set_folders(None);
    let report = engine.reconcile().await;

    assert!(report.has(DiagnosticKind::NoWorkspace));
    assert!(host.live().is_empty());
    assert!(diagnostics.snapshot().contains(&Diagnostic::NoWorkspace));

    // events are ignored until folders return
    engine
        .handle(HostEvent::ExecutionStarted(shell("build", "shell,make,all,")))
        .await;
    engine.on_active_document(Some("a.rs".into())).await;
    assert!(host.live().is_empty());

    host.set_folders(Some(vec!["root"]));
    engine.reconcile().await;
    assert_eq!(host.shown(), ["build"]);
}

#[tokio::test]
async fn unconfigured_and_missing_tasks_are_diagnosed() {
    let host = Arc::new(
        MockHost::new()
            .with_workspace(json!({
                "tasks": [
                    { "label": "build", "type": "shell", "command": "make" },
                    { "label": "ghost", "type": "shell", "command": "boo" }
                ]
            }))
            .with_tasks(vec![shell("build", "shell,make,"), shell("lint", "shell,eslint,")]),
    );
    let (engine, diagnostics) = engine(&host, EngineConfig::default());

    let report = engine.start().await;

    assert_eq!(report.indicators, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.orphans, 1);
    let seen = diagnostics.snapshot();
    assert!(seen.contains(&Diagnostic::TaskNotFound {
        label: "ghost".into(),
        scope: "workspace".into()
    }));
    assert!(seen.contains(&Diagnostic::NoMatchingConfiguration { task: "lint".into() }));
}

#[tokio::test]
async fn show_all_policy_presents_orphans() {
    let host = Arc::new(MockHost::new().with_tasks(vec![shell("lint", "shell,eslint,")]));
    let (engine, _) = engine(
        &host,
        EngineConfig::default().with_policy(UnmatchedPolicy::ShowAll),
    );

    let report = engine.start().await;

    assert_eq!(report.indicators, 1);
    assert_eq!(host.shown(), ["lint"]);
}

#[tokio::test]
async fn folder_and_platform_layers_apply() {
    let host = Arc::new(
        MockHost::new()
            .with_doc(
                ConfigScope::Folder("root".into()),
                json!({
                    "type": "shell",
                    "linux": { "options": { "statusbar": { "color": "#00ff00" } } },
                    "tasks": [{
                        "label": "test",
                        "command": "cargo test",
                        "windows": { "command": "cargo.exe test" },
                        "linux": { "options": { "statusbar": { "label": "Test (linux)" } } }
                    }]
                }),
            )
            .with_tasks(vec![shell("test", "shell,cargo test,")])
            .with_defaults(json!({ "color": "#0000ff" })),
    );
    let (engine, _) = engine(&host, EngineConfig::default());

    engine.start().await;

    let live = host.live();
    assert_eq!(live[0].text, "Test (linux)");
    assert_eq!(live[0].color, Some(IndicatorColor::Hex("#00ff00".into())));
}

#[tokio::test]
async fn shrinking_configuration_disposes_extra_indicators() {
    let host = Arc::new(three_rust_tasks());
    let (engine, _) = engine(&host, EngineConfig::default());
    engine.start().await;
    assert_eq!(host.live().len(), 4);

    host.set_doc(
        ConfigScope::Workspace,
        json!({ "tasks": [{ "label": "a", "type": "shell", "command": "a" }] }),
    );
    engine.reconcile().await;

    assert_eq!(host.live().len(), 2);
    assert_eq!(host.items().len(), 4);
    assert_eq!(host.live()[0].text, "a");
}

#[tokio::test]
async fn dispose_releases_everything() {
    let host = Arc::new(build_host());
    let (engine, _) = engine(&host, EngineConfig::default());
    engine.start().await;

    engine.dispose().await;

    assert!(host.live().is_empty());
    assert!(engine.snapshot().await.is_empty());
}

#[tokio::test]
async fn global_hide_default_suppresses_orphans_under_show_all() {
    let host = Arc::new(
        MockHost::new()
            .with_tasks(vec![shell("lint", "shell,eslint,")])
            .with_defaults(json!({ "hide": true })),
    );
    let (engine, _) = engine(
        &host,
        EngineConfig::default().with_policy(UnmatchedPolicy::ShowAll),
    );

    let report = engine.start().await;

    assert_eq!(report.orphans, 1);
    assert_eq!(report.indicators, 0);
    assert!(host.shown().is_empty());
}

#[tokio::test]
async fn tasks_differing_only_in_detail_run_independently() {
    let entry = json!({ "label": "t", "type": "shell", "command": "make" });
    let one = shell("t", "shell,make,").with_detail("one");
    let two = shell("t", "shell,make,").with_detail("two");
    let host = Arc::new(
        MockHost::new()
            .with_workspace(json!({ "tasks": [entry.clone(), entry] }))
            .with_tasks(vec![one.clone(), two]),
    );
    let (engine, _) = engine(&host, EngineConfig::default());
    engine.start().await;

    engine.handle(HostEvent::ExecutionStarted(one)).await;
    let texts = |host: &MockHost| -> Vec<String> { host.live().into_iter().map(|i| i.text).collect() };
    assert_eq!(texts(&host)[..2], ["$(sync~spin) t", "t"]);

    engine.reconcile().await;
    assert_eq!(texts(&host)[..2], ["$(sync~spin) t", "t"]);
}

#[tokio::test]
async fn malformed_pattern_is_diagnosed_once_per_pass() {
    let host = Arc::new(
        MockHost::new()
            .with_workspace(json!({
                "tasks": [{
                    "label": "bad",
                    "type": "shell",
                    "command": "make",
                    "options": { "statusbar": { "filePattern": "(unclosed" } }
                }]
            }))
            .with_tasks(vec![shell("bad", "shell,make,")]),
    );
    let (engine, diagnostics) = engine(&host, EngineConfig::default());

    let report = engine.start().await;
    assert!(report.has(DiagnosticKind::InvalidFilePattern));

    engine.on_active_document(Some("a.rs".into())).await;
    engine.on_active_document(Some("(unclosed".into())).await;

    let malformed = diagnostics
        .snapshot()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::InvalidFilePattern)
        .count();
    assert_eq!(malformed, 1);
    assert!(host.shown().is_empty());
}
