use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a workspace folder, in the host's own terms (usually a URI).
pub type FolderId = String;

/// One configuration layer.
///
/// Scopes are ordered by precedence: `Global < Workspace < Folder`.
/// Resolution visits them in that order and folders keep the host's declared folder order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigScope {
    /// User-level settings.
    Global,
    /// Workspace file settings.
    Workspace,
    /// Settings of one workspace folder.
    Folder(FolderId),
}

impl ConfigScope {
    /// Short symbolic name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigScope::Global => "global",
            ConfigScope::Workspace => "workspace",
            ConfigScope::Folder(_) => "folder",
        }
    }

    /// Precedence rank; higher wins attribute conflicts.
    pub fn rank(&self) -> u8 {
        match self {
            ConfigScope::Global => 0,
            ConfigScope::Workspace => 1,
            ConfigScope::Folder(_) => 2,
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Folder(id) => write!(f, "folder:{id}"),
            other => f.write_str(other.kind()),
        }
    }
}
