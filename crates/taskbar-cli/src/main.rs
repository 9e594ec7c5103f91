mod host;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use taskbar_api::{Dispatched, EngineAdapter, RUN_COMMAND, SELECT_COMMAND, dispatch};
use taskbar_core::{DiagnosticSink, Engine, EngineConfig, IndicatorSnapshot, PassReport};
use taskbar_model::IndicatorCommand;
use taskbar_observe::{Journal, LoggerConfig, LoggerFormat, LoggerLevel, logger_init};
use tracing::{debug, info};

use crate::host::FileHost;

#[derive(Parser, Debug)]
#[command(name = "taskbar")]
#[command(about = "Render task indicators from tasks.json-style files", long_about = None)]
struct Cli {
    #[arg(long, global = true, env = "TASKBAR_LOG", default_value = "warn")]
    log_level: LoggerLevel,
    #[arg(long, global = true, default_value = "text")]
    log_format: LoggerFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one pass and print every indicator
    Render {
        #[command(flatten)]
        inputs: Inputs,
        /// Print the pass report and indicators as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the task behind an indicator index or a JSON task handle
    Run {
        #[command(flatten)]
        inputs: Inputs,
        target: String,
    },
    /// Open the overflow list and run the chosen entry
    Select {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long)]
        pick: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    #[arg(long)]
    global: Option<PathBuf>,
    #[arg(long)]
    workspace: Option<PathBuf>,
    /// Workspace folder as NAME=FILE, repeatable
    #[arg(long = "folder", value_parser = parse_folder)]
    folders: Vec<(String, PathBuf)>,
    /// Global default statusbar settings
    #[arg(long)]
    defaults: Option<PathBuf>,
    /// Runtime task snapshot (JSON array)
    #[arg(long)]
    tasks: PathBuf,
    /// Active document path
    #[arg(long)]
    active: Option<String>,
    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_folder(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=FILE, got {raw:?}")),
    }
}

impl Inputs {
    fn host(&self, choice: Option<usize>) -> anyhow::Result<FileHost> {
        let mut host = FileHost::new().with_tasks(&self.tasks)?.with_choice(choice);
        if let Some(path) = &self.global {
            host = host.with_global(path)?;
        }
        if let Some(path) = &self.workspace {
            host = host.with_workspace(path)?;
        }
        for (name, path) in &self.folders {
            host = host.with_folder(name, path)?;
        }
        if let Some(path) = &self.defaults {
            host = host.with_defaults(path)?;
        }
        Ok(host)
    }

    fn config(&self) -> anyhow::Result<EngineConfig> {
        let Some(path) = &self.config else {
            return Ok(EngineConfig::default());
        };
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(EngineConfig::from_json(&text)?)
    }

    async fn engine(&self, choice: Option<usize>) -> anyhow::Result<(Arc<Engine<FileHost>>, PassReport)> {
        let host = Arc::new(self.host(choice)?);
        let sinks: Vec<Arc<dyn DiagnosticSink>> = vec![Arc::new(Journal::new())];
        let engine = Engine::new(host, self.config()?)
            .with_sinks(sinks)
            .with_active_document(self.active.clone());
        let engine = Arc::new(engine);
        let report = engine.start().await;
        Ok((engine, report))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logging = LoggerConfig::default()
        .with_format(cli.log_format)
        .with_level(cli.log_level);
    logger_init(&logging)?;

    match cli.command {
        Command::Render { inputs, json } => {
            let (engine, report) = inputs.engine(None).await?;
            let indicators = engine.snapshot().await;
            if json {
                let out = serde_json::json!({ "report": report, "indicators": indicators });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_report(&report, &indicators);
            }
            engine.dispose().await;
        }
        Command::Run { inputs, target } => {
            let (engine, _) = inputs.engine(None).await?;
            // bare indices and task objects are JSON; anything else goes through as a string
            let argument = serde_json::from_str(&target).unwrap_or(Value::String(target));
            let adapter = EngineAdapter::new(Arc::clone(&engine));
            let outcome = dispatch(&adapter, RUN_COMMAND, Some(argument)).await;
            engine.dispose().await;
            finish(outcome?);
        }
        Command::Select { inputs, pick } => {
            let (engine, _) = inputs.engine(pick).await?;
            let adapter = EngineAdapter::new(Arc::clone(&engine));
            let outcome = dispatch(&adapter, SELECT_COMMAND, None).await;
            engine.dispose().await;
            finish(outcome?);
        }
    }

    info!("done");
    Ok(())
}

fn print_report(report: &PassReport, indicators: &[IndicatorSnapshot]) {
    for ind in indicators {
        let mark = if ind.visible { '*' } else { ' ' };
        let target = match ind.command {
            IndicatorCommand::Run { .. } => ind.task.as_deref().unwrap_or("-"),
            IndicatorCommand::Select => "<select>",
        };
        print!("{mark} {:>2} {:<30} {target}", ind.index, ind.look.text);
        if let Some(color) = &ind.look.color {
            print!(" color={}", color.as_str());
        }
        println!();
    }
    println!(
        "matched={} unmatched={} orphans={} hidden={} shown={} overflow={}",
        report.matched, report.unmatched, report.orphans, report.hidden, report.shown, report.overflow
    );
    for diag in &report.diagnostics {
        println!("! {diag}");
    }
}

fn finish(outcome: Dispatched) {
    debug!(?outcome, "command finished");
    match outcome {
        Dispatched::Ran(_) => {}
        Dispatched::Cancelled => println!("cancelled"),
        Dispatched::Ignored => println!("ignored"),
    }
}
