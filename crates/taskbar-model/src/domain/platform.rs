use std::{str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::ModelError;

static CURRENT: OnceLock<Platform> = OnceLock::new();

/// Platform bucket selecting which overlay key of a configuration node is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Windows,
    Osx,
    Linux,
}

impl Platform {
    /// Every overlay key, active or not. None of them is inheritable.
    pub const OVERLAY_KEYS: [&'static str; 3] = ["windows", "osx", "linux"];

    /// Platform of the running process, decided once.
    pub fn current() -> Platform {
        *CURRENT.get_or_init(|| match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::Osx,
            _ => Platform::Linux,
        })
    }

    /// Overlay key in configuration documents.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Osx => "osx",
            Platform::Linux => "linux",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::current()
    }
}

impl FromStr for Platform {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Platform::Windows),
            "osx" | "macos" | "darwin" => Ok(Platform::Osx),
            "linux" => Ok(Platform::Linux),
            _ => Err(ModelError::InvalidPlatform(s.to_string())),
        }
    }
}
