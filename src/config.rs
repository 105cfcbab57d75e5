use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AplcdError, Result};

/// Default number of seconds a single interpreter invocation may run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The directive appended after every script to shut the interpreter down.
///
/// `⎕OFF` terminates a Dyalog session; tests substitute a shell-friendly
/// directive so the bridge can be exercised against `/bin/sh`.
pub const DEFAULT_SHUTDOWN_DIRECTIVE: &str = "⎕OFF";

/// Fixed installation locations probed when no interpreter is configured.
const DYALOG_CANDIDATES: &[&str] = &[
    "/Applications/Dyalog-19.0.app/Contents/Resources/Dyalog/mapl",
    "/opt/mdyalog/19.0/64/unicode/mapl",
];

/// Bare command names tried on `$PATH` after the fixed locations.
const DYALOG_COMMANDS: &[&str] = &["dyalog", "mapl"];

/// Configuration for the MCP adapter.
///
/// Controls where the APL interpreter lives, where it runs, and how long a
/// single invocation may take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Explicit path to the interpreter binary; auto-detected when absent.
    pub interpreter: Option<String>,
    /// Working directory for interpreter processes. Defaults to the parent
    /// of the adapter's own directory, matching the engine's repo layout.
    pub workdir: Option<PathBuf>,
    /// Maximum seconds a single invocation may run before being killed.
    pub timeout_secs: u64,
    /// Directive appended after the script to terminate the session.
    pub shutdown_directive: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            interpreter: None,
            workdir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            shutdown_directive: DEFAULT_SHUTDOWN_DIRECTIVE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file is not an error; defaults are returned so the adapter
    /// can run unconfigured.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| AplcdError::Config {
            message: format!("failed to read config file '{}': {}", path.display(), e),
        })?;

        let config: ServerConfig =
            serde_json::from_str(&contents).map_err(|e| AplcdError::Config {
                message: format!("failed to parse config file '{}': {}", path.display(), e),
            })?;

        Ok(config)
    }

    /// Resolves the interpreter command to launch.
    ///
    /// An explicit `interpreter` setting wins. Otherwise the fixed Dyalog
    /// installation paths are probed, then `$PATH`, and finally the bare
    /// command name is returned so a later spawn failure carries a useful
    /// message.
    pub fn resolve_interpreter(&self) -> String {
        if let Some(explicit) = &self.interpreter {
            return explicit.clone();
        }

        for candidate in DYALOG_CANDIDATES {
            if Path::new(candidate).exists() {
                debug!(path = candidate, "found interpreter at fixed location");
                return (*candidate).to_string();
            }
        }

        for command in DYALOG_COMMANDS {
            if let Ok(found) = which::which(command) {
                debug!(path = %found.display(), "found interpreter on PATH");
                return found.to_string_lossy().to_string();
            }
        }

        DYALOG_COMMANDS[0].to_string()
    }

    /// Resolves the working directory for interpreter processes.
    ///
    /// Defaults to the parent of the current directory, where the engine's
    /// wrapper workspace is expected to live.
    pub fn resolve_workdir(&self) -> PathBuf {
        match &self.workdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .ok()
                .and_then(|d| d.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
