//! # ToolShield
//!
//! **Pre-execution safety guard for AI coding-agent tool calls.**
//!
//! ToolShield runs as a PreToolUse hook: the host agent pipes each
//! about-to-run tool call to `toolshield hook` as JSON on stdin, and the
//! exit code decides whether the call proceeds (0) or is blocked with an
//! explanation on stderr (2). Every intercepted call is appended to a
//! JSON audit log under the project root.
//!
//! ## Architecture
//!
//! - **[`policy`]** — TOML-based configuration and the decision engine with
//!   one module per safety policy (sensitive-file, deletion, sync)
//! - **[`hook`]** — stdin parsing and verdict-to-exit-code mapping
//! - **[`audit`]** — corruption-tolerant JSON audit log with JSON/CSV export
//! - **[`project`]** — project root discovery for the log location
//! - **[`cli`]** — command-line interface (clap)
//! - **[`error`]** — unified error types using `thiserror`
//!
//! ## Quick Start
//!
//! ```bash
//! # Write the default configuration and create the log directory
//! toolshield init
//!
//! # Wire it up as a PreToolUse hook, then inspect what it intercepted
//! toolshield logs --tail 20
//! toolshield status
//! ```

pub mod audit;
pub mod cli;
pub mod error;
pub mod hook;
pub mod policy;
pub mod project;
