//! Destructive-deletion guard.
//!
//! `rm` is never allowed to destroy data on its own. A single existing
//! regular file is renamed with the configured marker suffix instead of
//! being removed, so the agent's turn is interrupted but nothing is lost.
//! Everything harder to undo — recursive flags, directories, wildcards,
//! multiple targets — is blocked outright and left for a human.
//!
//! Paths are extracted by whitespace tokenization, so quoted paths with
//! spaces are misparsed into several candidates and blocked as a bulk
//! deletion. That is the conservative direction and is left as is.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::config::PolicyConfig;
use super::{ActionTaken, Verdict};

/// Guard rewriting or blocking `rm` commands.
pub struct RmGuard {
    delete_suffix: String,
    rm_word: Regex,
    recursive_flag: Regex,
}

impl RmGuard {
    /// Build the guard for the configured rename suffix.
    pub fn new(policy: &PolicyConfig) -> Self {
        Self {
            delete_suffix: policy.delete_suffix.clone(),
            rm_word: Regex::new(r"\brm\b").unwrap(),
            // any short-flag cluster containing `r`, plus --recursive
            recursive_flag: Regex::new(r"\brm\b.*-[a-z]*r").unwrap(),
        }
    }

    /// Check a shell command for a deletion.
    ///
    /// Returns `None` when the command contains no `rm` word, a blocking
    /// verdict for unsafe deletions, and [`Verdict::AllowWithAction`] after
    /// a successful rename. Path existence is checked against the live
    /// filesystem; a missing target is allowed to fail on its own.
    pub fn check_command(&self, command: &str) -> Option<Verdict> {
        if !self.rm_word.is_match(command) {
            return None;
        }

        if self.recursive_flag.is_match(command) {
            return Some(Verdict::Block {
                reason: "Cannot delete directories recursively. Delete manually if needed."
                    .to_string(),
            });
        }

        let paths = candidate_paths(command);

        if paths.is_empty() {
            return Some(Verdict::Block {
                reason: "No file path detected in rm command.".to_string(),
            });
        }
        if paths.len() > 1 {
            return Some(Verdict::Block {
                reason: "Cannot delete multiple files. Delete them one at a time or manually."
                    .to_string(),
            });
        }

        let raw = paths[0];
        let path = Path::new(raw);

        if !path.exists() {
            // the command will no-op or error on its own
            return Some(Verdict::Allow);
        }
        if path.is_dir() {
            return Some(Verdict::Block {
                reason: "Cannot delete directories. Delete manually if needed.".to_string(),
            });
        }
        if raw.contains('*') || raw.contains('?') {
            return Some(Verdict::Block {
                reason: "Cannot use wildcards with rm. Delete files individually or manually."
                    .to_string(),
            });
        }

        Some(self.rename_instead(path))
    }

    fn rename_instead(&self, path: &Path) -> Verdict {
        let renamed = PathBuf::from(format!("{}{}", path.display(), self.delete_suffix));
        match std::fs::rename(path, &renamed) {
            Ok(()) => Verdict::AllowWithAction {
                description: format!(
                    "File marked for deletion: {} -> {}",
                    path.display(),
                    renamed.display()
                ),
                action: ActionTaken::PathRenamed {
                    from: path.to_path_buf(),
                    to: renamed,
                },
            },
            // the danger is unmitigated, so fail closed
            Err(err) => Verdict::Block {
                reason: format!("Could not rename {}: {}", path.display(), err),
            },
        }
    }
}

/// Tokenize a command and keep the tokens that look like deletion targets:
/// everything after the leading word that does not start with a flag marker.
fn candidate_paths(command: &str) -> Vec<&str> {
    command
        .split_whitespace()
        .skip(1)
        .filter(|token| !token.starts_with('-'))
        .collect()
}
