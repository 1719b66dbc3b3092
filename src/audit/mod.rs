//! JSON-file audit log of intercepted tool calls.
//!
//! Every hook invocation appends its raw input record to a single JSON
//! array at `<project root>/.claude/logs/pre_tool_use.json` (overridable in
//! `[audit]`). The file is read-modify-written per invocation and treated as
//! a recoverable history cache, not a transactional store: missing or
//! unparseable content resets to the empty array instead of failing. Append
//! errors are the caller's to swallow — persistence must never influence a
//! verdict.
//!
//! The [`export`] submodule provides JSON and CSV export of all entries.

pub mod export;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;
use crate::policy::config::AuditConfig;

/// Location of the log file below the project root.
pub const DEFAULT_LOG_PATH: &str = ".claude/logs/pre_tool_use.json";

/// Handle to the audit log file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Open a handle to the log at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the log location for a project root, honoring the
    /// `[audit] log_path` override (absolute, or relative to the root).
    pub fn for_project_root(root: &Path, config: &AuditConfig) -> Self {
        let path = match &config.log_path {
            Some(override_path) => root.join(override_path),
            None => root.join(DEFAULT_LOG_PATH),
        };
        Self { path }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records. A missing, unreadable, or corrupt file is an empty
    /// log, never an error.
    pub fn load(&self) -> Vec<Value> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Append one raw record, creating the log directory on first use.
    pub fn append(&self, record: &Value) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut records = self.load();
        records.push(record.clone());
        let serialized = serde_json::to_string_pretty(&records)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }

    /// The most recent `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Value> {
        let mut records = self.load();
        records.reverse();
        records.truncate(limit);
        records
    }

    /// Aggregated per-tool counts over the whole log.
    pub fn stats(&self) -> AuditStats {
        let records = self.load();
        let mut by_tool: BTreeMap<String, usize> = BTreeMap::new();
        for record in &records {
            let tool = record
                .get("tool_name")
                .and_then(|v| v.as_str())
                .unwrap_or("(unknown)");
            *by_tool.entry(tool.to_string()).or_default() += 1;
        }
        AuditStats {
            total: records.len(),
            by_tool,
        }
    }
}

/// Aggregated audit counts.
#[derive(Debug, Clone, Default)]
pub struct AuditStats {
    /// Total number of intercepted calls on record.
    pub total: usize,
    /// Call counts keyed by tool name.
    pub by_tool: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_log(dir: &tempfile::TempDir) -> AuditLog {
        AuditLog::new(dir.path().join("logs/pre_tool_use.json"))
    }

    fn sample(tool: &str, command: &str) -> Value {
        json!({"tool_name": tool, "tool_input": {"command": command}})
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(temp_log(&dir).load().is_empty());
    }

    #[test]
    fn append_creates_directories_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = temp_log(&dir);
        log.append(&sample("Bash", "ls")).unwrap();
        log.append(&sample("Read", "")).unwrap();

        let records = log.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["tool_name"], "Bash");
        assert_eq!(records[1]["tool_name"], "Read");
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = temp_log(&dir);
        std::fs::create_dir_all(log.path().parent().unwrap()).unwrap();
        std::fs::write(log.path(), "{ not json ]").unwrap();

        assert!(log.load().is_empty());

        // appending over corruption starts a fresh array
        log.append(&sample("Bash", "ls")).unwrap();
        assert_eq!(log.load().len(), 1);
    }

    #[test]
    fn non_array_content_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = temp_log(&dir);
        std::fs::create_dir_all(log.path().parent().unwrap()).unwrap();
        std::fs::write(log.path(), r#"{"tool_name": "Bash"}"#).unwrap();
        assert!(log.load().is_empty());
    }

    #[test]
    fn recent_returns_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = temp_log(&dir);
        for i in 0..5 {
            log.append(&sample("Bash", &format!("cmd{i}"))).unwrap();
        }
        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0]["tool_input"]["command"], "cmd4");
        assert_eq!(recent[1]["tool_input"]["command"], "cmd3");
    }

    #[test]
    fn stats_count_by_tool() {
        let dir = tempfile::tempdir().unwrap();
        let log = temp_log(&dir);
        log.append(&sample("Bash", "ls")).unwrap();
        log.append(&sample("Bash", "pwd")).unwrap();
        log.append(&json!({"tool_input": {}})).unwrap();
        log.append(&json!({"tool_name": "Read", "tool_input": {"file_path": "a"}}))
            .unwrap();

        let stats = log.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_tool.get("Bash"), Some(&2));
        assert_eq!(stats.by_tool.get("Read"), Some(&1));
        assert_eq!(stats.by_tool.get("(unknown)"), Some(&1));
    }

    #[test]
    fn for_project_root_uses_default_location() {
        let root = Path::new("/work/repo");
        let log = AuditLog::for_project_root(root, &AuditConfig::default());
        assert_eq!(
            log.path(),
            Path::new("/work/repo/.claude/logs/pre_tool_use.json")
        );
    }

    #[test]
    fn for_project_root_honors_override() {
        let root = Path::new("/work/repo");
        let config = AuditConfig {
            enabled: true,
            log_path: Some(PathBuf::from("audit/calls.json")),
        };
        let log = AuditLog::for_project_root(root, &config);
        assert_eq!(log.path(), Path::new("/work/repo/audit/calls.json"));

        let config = AuditConfig {
            enabled: true,
            log_path: Some(PathBuf::from("/var/log/toolshield.json")),
        };
        let log = AuditLog::for_project_root(root, &config);
        assert_eq!(log.path(), Path::new("/var/log/toolshield.json"));
    }
}
