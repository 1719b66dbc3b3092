//! Decision engine: one tool call in, one [`Verdict`] out.
//!
//! Policies are applied in fixed precedence order; the first one that
//! matches wins and nothing else runs:
//!
//! 1. sensitive-file access ([`EnvFileGuard`])
//! 2. destructive deletion ([`RmGuard`])
//! 3. destructive mirroring ([`SyncGuard`])
//!
//! If no policy matches — including every tool outside the configured file
//! and shell tool sets — the verdict is [`Verdict::Allow`]. The engine never
//! fails on malformed input: a missing command or path simply means "no
//! match for this policy".

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Verdict;
use super::config::AppConfig;
use super::env_guard::EnvFileGuard;
use super::rm_guard::RmGuard;
use super::sync_guard::SyncGuard;

/// One intercepted tool call, as delivered by the host agent.
///
/// `tool_input`'s shape depends on the tool: file tools carry `file_path`,
/// shell tools carry `command`. Unknown shapes deserialize fine and are
/// policy-inert.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolCallRecord {
    /// Name of the tool about to run (e.g., `"Bash"`, `"Read"`).
    #[serde(default)]
    pub tool_name: String,
    /// Tool parameters, kept as raw JSON.
    #[serde(default)]
    pub tool_input: serde_json::Value,
}

impl ToolCallRecord {
    /// The `file_path` parameter, when present and a string.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path")?.as_str()
    }

    /// The `command` parameter, when present and a string.
    pub fn command(&self) -> Option<&str> {
        self.tool_input.get("command")?.as_str()
    }
}

/// The decision engine, with per-policy guards compiled once per process.
pub struct Engine {
    file_tools: Vec<String>,
    shell_tools: Vec<String>,
    env_guard: Option<EnvFileGuard>,
    rm_guard: Option<RmGuard>,
    sync_guard: Option<SyncGuard>,
}

impl Engine {
    /// Build the engine from the effective configuration. Disabled policies
    /// are not compiled at all.
    pub fn new(config: &AppConfig) -> Self {
        let policy = &config.policy;
        Self {
            file_tools: policy.file_tools.clone(),
            shell_tools: policy.shell_tools.clone(),
            env_guard: policy.env_guard.then(|| EnvFileGuard::new(policy)),
            rm_guard: policy.rm_guard.then(|| RmGuard::new(policy)),
            sync_guard: policy.sync_guard.then(SyncGuard::new),
        }
    }

    /// Evaluate a tool call against every active policy, first match wins.
    pub fn evaluate(&self, record: &ToolCallRecord) -> Verdict {
        let is_file_tool = self.file_tools.iter().any(|t| t == &record.tool_name);
        let is_shell_tool = self.shell_tools.iter().any(|t| t == &record.tool_name);

        if let Some(guard) = &self.env_guard {
            if is_file_tool {
                if let Some(verdict) = record.file_path().and_then(|p| guard.check_path(p)) {
                    debug!(tool = %record.tool_name, "sensitive file access blocked");
                    return verdict;
                }
            }
            if is_shell_tool {
                if let Some(verdict) = record.command().and_then(|c| guard.check_command(c)) {
                    debug!(tool = %record.tool_name, "sensitive file access blocked");
                    return verdict;
                }
            }
        }

        if is_shell_tool {
            if let Some(command) = record.command() {
                if let Some(guard) = &self.rm_guard {
                    if let Some(verdict) = guard.check_command(command) {
                        debug!(verdict = verdict.label(), "deletion policy applied");
                        return verdict;
                    }
                }
                if let Some(guard) = &self.sync_guard {
                    if let Some(verdict) = guard.check_command(command) {
                        debug!("destructive sync blocked");
                        return verdict;
                    }
                }
            }
        }

        Verdict::Allow
    }
}
