use std::path::Path;

use serde_json::{Value, json};

use toolshield::audit::{AuditLog, export};
use toolshield::hook::{self, EXIT_BLOCK, EXIT_PROCEED};
use toolshield::policy::config::AppConfig;
use toolshield::policy::engine::{Engine, ToolCallRecord};
use toolshield::policy::{ActionTaken, Verdict};

fn engine() -> Engine {
    Engine::new(&AppConfig::default())
}

fn bash(command: &str) -> ToolCallRecord {
    ToolCallRecord {
        tool_name: "Bash".to_string(),
        tool_input: json!({"command": command}),
    }
}

// ===== Deletion mitigation end to end =====

#[test]
fn single_file_rm_renames_and_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"important").unwrap();

    let verdict = engine().evaluate(&bash(&format!("rm {}", path.display())));
    match verdict {
        Verdict::AllowWithAction {
            description,
            action: ActionTaken::PathRenamed { from, to },
        } => {
            assert_eq!(from, path);
            assert_eq!(to, dir.path().join("notes.txt.delete"));
            assert!(description.contains(&path.display().to_string()));
            assert!(description.contains(".delete"));
        }
        other => panic!("expected rename, got {:?}", other),
    }

    // content intact under the new name, suffix appended exactly once
    assert!(!path.exists());
    let renamed = dir.path().join("notes.txt.delete");
    assert_eq!(std::fs::read(&renamed).unwrap(), b"important");
    assert!(!dir.path().join("notes.txt.delete.delete").exists());
}

#[test]
fn recursive_rm_never_mutates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"x").unwrap();

    for flags in ["-r", "-rf", "-fr"] {
        let verdict = engine().evaluate(&bash(&format!("rm {} {}", flags, path.display())));
        assert!(
            matches!(verdict, Verdict::Block { .. }),
            "rm {flags} must block"
        );
    }
    assert!(path.exists(), "no rename may happen on recursive rm");
}

#[test]
fn multi_target_rm_blocks_without_renaming() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, b"a").unwrap();
    std::fs::write(&b, b"b").unwrap();

    let verdict = engine().evaluate(&bash(&format!("rm {} {}", a.display(), b.display())));
    assert!(matches!(verdict, Verdict::Block { .. }));
    assert!(a.exists() && b.exists());
}

#[test]
fn missing_target_is_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let verdict = engine().evaluate(&bash(&format!("rm {}/ghost.txt", dir.path().display())));
    assert_eq!(verdict, Verdict::Allow);
}

#[test]
fn directory_target_blocks_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("src");
    std::fs::create_dir(&sub).unwrap();

    let verdict = engine().evaluate(&bash(&format!("rm {}", sub.display())));
    assert!(matches!(verdict, Verdict::Block { .. }));
    assert!(sub.is_dir());
}

#[test]
fn evaluation_is_idempotent_modulo_rename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("once.txt");
    std::fs::write(&path, b"x").unwrap();
    let record = bash(&format!("rm {}", path.display()));

    // first call renames; the second sees a missing path and allows,
    // exactly the "command fails naturally" case
    assert!(matches!(
        engine().evaluate(&record),
        Verdict::AllowWithAction { .. }
    ));
    assert_eq!(engine().evaluate(&record), Verdict::Allow);

    // verdicts with no side effect are stable
    let blocked = bash("rm -rf whatever");
    assert_eq!(engine().evaluate(&blocked), engine().evaluate(&blocked));
}

// ===== Sensitive file and sync guards =====

#[test]
fn env_file_blocked_for_every_configured_tool() {
    for tool in ["Read", "Edit", "MultiEdit", "Write"] {
        let record = ToolCallRecord {
            tool_name: tool.to_string(),
            tool_input: json!({"file_path": "config/.env"}),
        };
        match engine().evaluate(&record) {
            Verdict::Block { reason } => {
                assert!(reason.contains(".env.sample"), "{tool}: {reason}")
            }
            other => panic!("{tool}: expected block, got {:?}", other),
        }
    }
}

#[test]
fn sample_file_allowed_for_every_configured_tool() {
    for tool in ["Read", "Edit", "MultiEdit", "Write"] {
        let record = ToolCallRecord {
            tool_name: tool.to_string(),
            tool_input: json!({"file_path": "config/.env.sample"}),
        };
        assert_eq!(engine().evaluate(&record), Verdict::Allow, "{tool}");
    }
}

#[test]
fn rsync_delete_blocked_in_any_shape() {
    for command in [
        "rsync -a --delete src/ dst/",
        "RSYNC -A --DELETE SRC/ DST/",
        "rsync   --delete-after\tsrc dst",
    ] {
        let verdict = engine().evaluate(&bash(command));
        assert!(matches!(verdict, Verdict::Block { .. }), "{command}");
    }
}

// ===== Hook runner: exit codes and audit trail =====

fn run_hook(root: &Path, record: &Value) -> i32 {
    hook::run_with_input(&AppConfig::default(), &record.to_string(), root)
}

#[test]
fn hook_end_to_end_rm_example() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"x").unwrap();

    let record = json!({
        "tool_name": "Bash",
        "tool_input": {"command": format!("rm {}", path.display())}
    });
    assert_eq!(run_hook(dir.path(), &record), EXIT_BLOCK);
    assert!(dir.path().join("notes.txt.delete").exists());
}

#[test]
fn hook_end_to_end_env_read_example() {
    let dir = tempfile::tempdir().unwrap();
    let record = json!({
        "tool_name": "Read",
        "tool_input": {"file_path": "config/.env"}
    });
    assert_eq!(run_hook(dir.path(), &record), EXIT_BLOCK);
}

#[test]
fn hook_end_to_end_rsync_example() {
    let dir = tempfile::tempdir().unwrap();
    let record = json!({
        "tool_name": "Bash",
        "tool_input": {"command": "rsync -a --delete src/ dst/"}
    });
    assert_eq!(run_hook(dir.path(), &record), EXIT_BLOCK);
}

#[test]
fn hook_allows_and_audits_inert_tools() {
    let dir = tempfile::tempdir().unwrap();
    let records = [
        json!({"tool_name": "Bash", "tool_input": {"command": "cargo test"}}),
        json!({"tool_name": "WebSearch", "tool_input": {"query": "rust"}}),
    ];
    for record in &records {
        assert_eq!(run_hook(dir.path(), record), EXIT_PROCEED);
    }

    let log = AuditLog::for_project_root(dir.path(), &AppConfig::default().audit);
    let stored = log.load();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["tool_name"], "Bash");
    assert_eq!(stored[1]["tool_name"], "WebSearch");
}

#[test]
fn hook_survives_corrupt_audit_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = AuditLog::for_project_root(dir.path(), &AppConfig::default().audit);
    std::fs::create_dir_all(log.path().parent().unwrap()).unwrap();
    std::fs::write(log.path(), "corrupt! [[[").unwrap();

    let record = json!({"tool_name": "Bash", "tool_input": {"command": "ls"}});
    assert_eq!(run_hook(dir.path(), &record), EXIT_PROCEED);

    // the corrupt store was reset to an empty sequence before the append
    assert_eq!(log.load().len(), 1);
}

// ===== Audit inspection over a real session =====

#[test]
fn audit_lifecycle_recent_stats_export() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    for i in 0..4 {
        let record = json!({
            "tool_name": if i % 2 == 0 { "Bash" } else { "Read" },
            "tool_input": {"command": format!("step {i}")}
        });
        run_hook(root, &record);
    }

    let log = AuditLog::for_project_root(root, &AppConfig::default().audit);

    let recent = log.recent(3);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["tool_input"]["command"], "step 3");

    let stats = log.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.by_tool.get("Bash"), Some(&2));
    assert_eq!(stats.by_tool.get("Read"), Some(&2));

    let json = export::export_json(&log).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 4);

    let csv = export::export_csv(&log).unwrap();
    assert_eq!(csv.lines().count(), 5); // header + 4 rows
}
