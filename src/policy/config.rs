//! TOML configuration types for ToolShield.
//!
//! The top-level [`AppConfig`] is deserialized from `toolshield.toml` and
//! contains sections for the safety policies and the audit log. Every field
//! carries a default, so a missing or partial file yields the stock policy —
//! the guard must keep protecting even when nobody configured it.
//!
//! # Example `toolshield.toml`
//!
//! ```toml
//! [policy]
//! sensitive_file = ".env"
//! delete_suffix = ".delete"
//! sync_guard = false
//!
//! [audit]
//! enabled = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Policy configuration (`[policy]` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Name fragment of the sensitive environment file (e.g., `".env"`).
    pub sensitive_file: String,
    /// Suffix marking the shareable template variant (e.g., `".sample"`,
    /// exempting `.env.sample`).
    pub sample_suffix: String,
    /// Suffix appended when a deletion is converted into a rename.
    pub delete_suffix: String,
    /// Tools whose input carries a `file_path` field.
    pub file_tools: Vec<String>,
    /// Tools whose input carries a shell `command` field.
    pub shell_tools: Vec<String>,
    /// Whether the sensitive-file guard is active.
    pub env_guard: bool,
    /// Whether the deletion guard is active.
    pub rm_guard: bool,
    /// Whether the mirroring/sync guard is active.
    pub sync_guard: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sensitive_file: ".env".to_string(),
            sample_suffix: ".sample".to_string(),
            delete_suffix: ".delete".to_string(),
            file_tools: ["Read", "Edit", "MultiEdit", "Write"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            shell_tools: vec!["Bash".to_string()],
            env_guard: true,
            rm_guard: true,
            sync_guard: true,
        }
    }
}

impl PolicyConfig {
    /// The full name of the template variant (e.g., `".env.sample"`).
    pub fn sample_file(&self) -> String {
        format!("{}{}", self.sensitive_file, self.sample_suffix)
    }
}

/// Audit log configuration (`[audit]` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether intercepted calls are appended to the audit log.
    pub enabled: bool,
    /// Override for the log file location, resolved against the project
    /// root when relative.
    pub log_path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: None,
        }
    }
}

/// Top-level application configuration deserialized from `toolshield.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Safety policy settings.
    pub policy: PolicyConfig,
    /// Audit log settings.
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Load and parse the configuration from a TOML file at the given path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    ///
    /// The hook path must never refuse to run because of its own
    /// configuration: a broken config file degrades to the stock policy,
    /// which still guards everything.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
                Self::default()
            }
        }
    }
}
