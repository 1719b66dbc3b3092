use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "toolshield")]
#[command(about = "Pre-execution safety guard for AI coding-agent tool calls")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "toolshield.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one tool call from stdin (the hook entry point)
    Hook,
    /// View the audit log
    Logs {
        /// Show last N entries
        #[arg(long, default_value = "50")]
        tail: usize,
        /// Export the full log
        #[arg(long)]
        export: bool,
        /// Export format (json or csv)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Show audit statistics
    Status,
    /// Policy management
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
    /// Initialize ToolShield configuration
    Init,
}

#[derive(Subcommand)]
pub enum PolicyAction {
    /// Show the effective policy
    Show,
}
