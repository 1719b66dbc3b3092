use std::path::Path;

use clap::Parser;
use toolshield::audit::{self, AuditLog};
use toolshield::cli::{Cli, Commands, PolicyAction};
use toolshield::hook;
use toolshield::policy::config::AppConfig;
use toolshield::project;

fn main() -> anyhow::Result<()> {
    // stdout belongs to the hook protocol and the inspection commands;
    // diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hook => {
            let config = AppConfig::load_or_default(&cli.config);
            std::process::exit(hook::run(&config));
        }
        Commands::Logs {
            tail,
            export,
            format,
        } => {
            cmd_logs(&cli.config, tail, export, &format)?;
        }
        Commands::Status => {
            cmd_status(&cli.config)?;
        }
        Commands::Policy { action } => match action {
            PolicyAction::Show => cmd_policy_show(&cli.config)?,
        },
        Commands::Init => {
            cmd_init(&cli.config)?;
        }
    }

    Ok(())
}

fn open_audit_log(config_path: &Path) -> AuditLog {
    let config = AppConfig::load_or_default(config_path);
    AuditLog::for_project_root(&project::resolve_root(), &config.audit)
}

fn cmd_logs(config_path: &Path, tail: usize, export: bool, format: &str) -> anyhow::Result<()> {
    let log = open_audit_log(config_path);

    if export {
        match format {
            "csv" => print!("{}", audit::export::export_csv(&log)?),
            _ => println!("{}", audit::export::export_json(&log)?),
        }
        return Ok(());
    }

    let records = log.recent(tail);
    if records.is_empty() {
        println!("No audit entries found at {}.", log.path().display());
        return Ok(());
    }
    println!("{:<6} {:<12} {}", "#", "TOOL", "TARGET");
    println!("{}", "─".repeat(80));
    for (i, record) in records.iter().enumerate() {
        println!(
            "{:<6} {:<12} {}",
            i + 1,
            audit::export::tool_name(record),
            audit::export::target(record)
        );
    }
    Ok(())
}

fn cmd_status(config_path: &Path) -> anyhow::Result<()> {
    let log = open_audit_log(config_path);
    let stats = log.stats();

    println!("ToolShield Status");
    println!("─────────────────");
    println!("Audit log: {}", log.path().display());
    println!("Intercepted calls: {}", stats.total);
    for (tool, count) in &stats.by_tool {
        println!("  {:<12} {}", tool, count);
    }
    Ok(())
}

fn cmd_policy_show(config_path: &Path) -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(config_path);
    let policy = &config.policy;

    println!("Effective Policy ({})", config_path.display());
    println!("═══════════════════════════════════════");
    println!("Sensitive file:  {} (template: {})", policy.sensitive_file, policy.sample_file());
    println!("Delete suffix:   {}", policy.delete_suffix);
    println!("File tools:      {}", policy.file_tools.join(", "));
    println!("Shell tools:     {}", policy.shell_tools.join(", "));
    println!("Guards:");
    println!("  env_guard   {}", on_off(policy.env_guard));
    println!("  rm_guard    {}", on_off(policy.rm_guard));
    println!("  sync_guard  {}", on_off(policy.sync_guard));
    println!("Audit:           {}", on_off(config.audit.enabled));
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn cmd_init(config_path: &Path) -> anyhow::Result<()> {
    println!("Initializing ToolShield...");

    let root = project::resolve_root();
    let config = AppConfig::load_or_default(config_path);
    let log = AuditLog::for_project_root(&root, &config.audit);
    if let Some(dir) = log.path().parent() {
        std::fs::create_dir_all(dir)?;
        println!("  Created log dir: {}", dir.display());
    }

    if !config_path.exists() {
        let default_config = include_str!("../templates/default.toml");
        std::fs::write(config_path, default_config)?;
        println!("  Created config: {}", config_path.display());
    } else {
        println!("  Config already exists: {}", config_path.display());
    }

    println!("\nDone! Register the hook with your agent, e.g. for Claude Code:");
    println!("  .claude/settings.json -> PreToolUse -> \"toolshield hook\"");
    Ok(())
}
