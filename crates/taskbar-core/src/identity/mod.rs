//! Canonical task identities.
//!
//! The host assigns no stable id to a declared task, so one is derived from the fields that make two declarations the same
//! task: name, execution flavour, command line and arguments (or, for package scripts, script and path).

use std::fmt::Write as _;

use sha2::{Digest as _, Sha256};
use taskbar_model::{ConfigValue, RuntimeTask, TaskIdentity};

use crate::resolve::EffectiveTaskView;

/// Definition types of package-script tasks.
pub const PACKAGE_SCRIPT_TYPES: [&str; 2] = ["npm", "package-script"];

/// Type name recorded in package-script identities.
pub const SCRIPT_RUNNER: &str = "npm";

/// Sentinel pushed in place of type/command/args when no command resolves.
pub const EMPTY_MARKER: &str = "$empty";

/// Execution flavours a command task without a declared type may have on the host side.
pub const COMMAND_FLAVOURS: [&str; 2] = ["process", "shell"];

/// Shape of a declared task, as far as identity is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityShape {
    /// Shell or process invocation with a resolvable command.
    Command,
    /// Package-script task, identified by script and path.
    PackageScript,
    /// No resolvable execution signature (composite or placeholder tasks).
    Empty,
}

#[inline]
pub fn is_package_script(kind: &str) -> bool {
    PACKAGE_SCRIPT_TYPES.contains(&kind)
}

pub fn shape(view: &EffectiveTaskView) -> IdentityShape {
    if is_package_script(view.task_type()) {
        IdentityShape::PackageScript
    } else if view.get("command").and_then(command_line).is_some() {
        IdentityShape::Command
    } else {
        IdentityShape::Empty
    }
}

/// Identity of a declared task.
pub fn identity(view: &EffectiveTaskView) -> TaskIdentity {
    if is_package_script(view.task_type()) {
        return package_script_identity(view);
    }

    let mut id = TaskIdentity::new();
    if let Some(name) = view.name() {
        id.push(name);
    }

    match view.get("command").and_then(command_line) {
        Some(command) => {
            id.push(view.task_type());
            id.push(command);
            for arg in view.get("args").and_then(ConfigValue::as_seq).unwrap_or_default() {
                if let Some(arg) = arg_token(arg) {
                    id.push(arg);
                }
            }
        }
        None => id.push(EMPTY_MARKER),
    }
    id
}

/// Every identity a declared task accepts from the host.
///
/// A command task that declares no type defaults to `process` but is equally satisfied by a `shell` execution.
pub fn accepted(view: &EffectiveTaskView) -> Vec<TaskIdentity> {
    let id = identity(view);
    if shape(view) != IdentityShape::Command || view.type_declared() {
        return vec![id];
    }

    let type_index = usize::from(view.name().is_some());
    COMMAND_FLAVOURS
        .iter()
        .map(|flavour| id.replaced(type_index, *flavour))
        .collect()
}

/// Name a package-script task is known by: the declared one, or `"<script> - <path>"`.
pub fn package_script_name(view: &EffectiveTaskView) -> Option<String> {
    if let Some(name) = view.name() {
        return Some(name.to_string());
    }
    let script = view.get_str("script")?;
    let path = view
        .get_str("path")
        .map(|p| p.trim_end_matches(['/', '\\']))
        .filter(|p| !p.is_empty());

    Some(match path {
        Some(path) => format!("{script} - {path}"),
        None => script.to_string(),
    })
}

fn package_script_identity(view: &EffectiveTaskView) -> TaskIdentity {
    let mut id = TaskIdentity::new();
    if let Some(name) = package_script_name(view) {
        id.push(name);
    }
    if let Some(path) = view.get_str("path") {
        id.push("path");
        id.push(path);
    }
    if let Some(script) = view.get_str("script") {
        id.push("script");
        id.push(script);
    }
    id.push("type");
    id.push(SCRIPT_RUNNER);
    id
}

/// A runtime task as seen by the matcher: its name and its execution id, kept exactly as the host encoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeIdentity {
    pub name: String,
    pub execution: String,
}

impl RuntimeIdentity {
    /// Whether the declared identity names this task.
    ///
    /// A named declaration leads with its name, which is compared on its own; the remaining fields are compared in encoded
    /// form. An unnamed declaration is all execution fields.
    pub fn accepts(&self, declared: &TaskIdentity, named: bool) -> bool {
        if !named {
            return declared.encode() == self.execution;
        }
        declared.fields().first().is_some_and(|name| *name == self.name)
            && declared.tail().encode() == self.execution
    }
}

/// Identity of a runtime task, or `None` when the host supplied no usable execution id.
pub fn runtime_identity(task: &RuntimeTask) -> Option<RuntimeIdentity> {
    let definition = &task.definition;

    let execution = if is_package_script(&definition.kind) {
        let mut id = TaskIdentity::new();
        if let Some(path) = definition.field_str("path") {
            id.push("path");
            id.push(path);
        }
        if let Some(script) = definition.field_str("script") {
            id.push("script");
            id.push(script);
        }
        id.push("type");
        id.push(SCRIPT_RUNNER);
        id.encode()
    } else {
        definition.id.clone()?
    };

    Some(RuntimeIdentity {
        name: task.name.clone(),
        execution,
    })
}

/// Single command line: a string, or string tokens joined by one space.
pub fn command_line(command: &ConfigValue) -> Option<String> {
    match command {
        ConfigValue::String(s) if !s.is_empty() => Some(s.clone()),
        ConfigValue::Seq(tokens) => {
            let tokens: Vec<&str> = tokens.iter().filter_map(ConfigValue::as_str).collect();
            if tokens.is_empty() {
                None
            } else {
                Some(tokens.join(" "))
            }
        }
        _ => None,
    }
}

/// One argument token: a string verbatim, or the `value` of a quoted-argument object.
fn arg_token(arg: &ConfigValue) -> Option<&str> {
    match arg {
        ConfigValue::String(s) => Some(s),
        ConfigValue::Map(m) => m.get("value").and_then(ConfigValue::as_str),
        _ => None,
    }
}

/// Stable hex digest of an ordered field list. Field boundaries are part of the digest.
pub fn fingerprint<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }

    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
