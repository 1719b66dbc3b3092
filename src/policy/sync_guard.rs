//! Mirroring/sync guard.
//!
//! `rsync --delete` removes destination files that are absent from the
//! source, which makes a mistyped source directory an instant data loss.
//! The command text is normalized (lowercased, whitespace collapsed) before
//! matching, so casing and spacing tricks do not slip through. All
//! `--delete` variants (`--delete-after`, `--delete-excluded`, ...) match.

use regex::Regex;

use super::Verdict;

/// Guard blocking mirroring commands that delete at the destination.
pub struct SyncGuard {
    sync_word: Regex,
    delete_flag: Regex,
}

impl SyncGuard {
    /// Build the guard.
    pub fn new() -> Self {
        Self {
            sync_word: Regex::new(r"\brsync\b").unwrap(),
            delete_flag: Regex::new(r"--delete").unwrap(),
        }
    }

    /// Check a shell command for a destructive sync.
    pub fn check_command(&self, command: &str) -> Option<Verdict> {
        let normalized = normalize(command);
        if self.sync_word.is_match(&normalized) && self.delete_flag.is_match(&normalized) {
            return Some(Verdict::Block {
                reason: "Dangerous rsync --delete command detected and prevented.".to_string(),
            });
        }
        None
    }
}

impl Default for SyncGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and collapse runs of whitespace to single spaces.
fn normalize(command: &str) -> String {
    command
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
