//! Policy engine for ToolShield.
//!
//! This module provides the TOML-based configuration system ([`config`]) and
//! the decision engine ([`engine`]) that determines whether each intercepted
//! tool call may proceed. Each safety policy lives in its own module so it
//! can be unit-tested against adversarial command strings in isolation:
//!
//! - [`env_guard`] — blocks access to sensitive environment files
//! - [`rm_guard`] — converts single-file deletions into renames, blocks the rest
//! - [`sync_guard`] — blocks mirroring commands that delete at the destination

pub mod config;
pub mod engine;
pub mod env_guard;
pub mod rm_guard;
pub mod sync_guard;

use std::path::PathBuf;

/// Side effect performed by the engine on behalf of a blocked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTaken {
    /// No filesystem change was made.
    None,
    /// The deletion target was renamed instead of removed.
    PathRenamed {
        /// Original path of the file.
        from: PathBuf,
        /// Path the file now lives at.
        to: PathBuf,
    },
}

/// Outcome of evaluating one tool call against the safety policies.
///
/// Produced fresh per call and never stored. Both [`Verdict::AllowWithAction`]
/// and [`Verdict::Block`] must stop the original tool call: when a corrective
/// action was taken, the safe outcome has already been achieved and the
/// underlying command must not run on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The operation may proceed untouched.
    Allow,
    /// A corrective action replaced the operation; the original call is
    /// still stopped.
    AllowWithAction {
        /// Human-readable report of what was done.
        description: String,
        /// The side effect that was performed.
        action: ActionTaken,
    },
    /// The operation is refused.
    Block {
        /// Human-readable explanation shown to the invoking agent.
        reason: String,
    },
}

impl Verdict {
    /// Whether the host must stop the original tool call.
    pub fn blocks_tool_call(&self) -> bool {
        !matches!(self, Verdict::Allow)
    }

    /// Short label for log output (`"allow"`, `"allow-with-action"`, `"block"`).
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::AllowWithAction { .. } => "allow-with-action",
            Verdict::Block { .. } => "block",
        }
    }
}
