//! Hook entry point: stdin record in, exit code out.
//!
//! The host agent pipes one JSON tool-call record to `toolshield hook` and
//! interprets the exit status: 0 lets the tool call proceed, 2 blocks it
//! and relays stderr back to the agent.
//!
//! Failure directions are deliberately asymmetric. A recognized danger must
//! block even when its mitigation fails; the guard's own faults (unreadable
//! stdin, malformed JSON, config or audit I/O trouble) must never stall the
//! host, so they resolve to "proceed". Audit persistence is best-effort and
//! cannot change the exit code.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::audit::AuditLog;
use crate::policy::Verdict;
use crate::policy::config::AppConfig;
use crate::policy::engine::{Engine, ToolCallRecord};
use crate::project;

/// Exit status telling the host to run the tool call.
pub const EXIT_PROCEED: i32 = 0;

/// Exit status telling the host to block the tool call and show stderr to
/// the agent.
pub const EXIT_BLOCK: i32 = 2;

/// Read one record from stdin, evaluate it, and return the process exit
/// code.
pub fn run(config: &AppConfig) -> i32 {
    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() {
        return EXIT_PROCEED;
    }
    let root = project::resolve_root();
    run_with_input(config, &raw, &root)
}

/// Evaluate one raw input record against the policies and append it to the
/// project's audit log. Split from [`run`] so tests can drive it without a
/// process boundary.
pub fn run_with_input(config: &AppConfig, raw: &str, project_root: &Path) -> i32 {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "unparseable hook input, letting the call proceed");
            return EXIT_PROCEED;
        }
    };
    let record: ToolCallRecord = match serde_json::from_value(value.clone()) {
        Ok(record) => record,
        Err(err) => {
            debug!(error = %err, "unexpected input shape, letting the call proceed");
            return EXIT_PROCEED;
        }
    };

    let engine = Engine::new(config);
    let verdict = engine.evaluate(&record);
    debug!(tool = %record.tool_name, verdict = verdict.label(), "tool call evaluated");

    if config.audit.enabled {
        let log = AuditLog::for_project_root(project_root, &config.audit);
        if let Err(err) = log.append(&value) {
            warn!(path = %log.path().display(), error = %err, "audit log append failed");
        }
    }

    match verdict {
        Verdict::Allow => EXIT_PROCEED,
        Verdict::AllowWithAction { description, .. } => {
            eprintln!("{description}");
            EXIT_BLOCK
        }
        Verdict::Block { reason } => {
            eprintln!("BLOCKED: {reason}");
            EXIT_BLOCK
        }
    }
}
