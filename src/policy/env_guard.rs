//! Sensitive environment-file access guard.
//!
//! Blocks any tool call that reads or writes the configured sensitive file
//! (default `.env`), whether through a file-path tool or a shell command.
//! The shareable template variant (default `.env.sample`) is always exempt.
//!
//! Shell commands are matched against a named table of access patterns:
//!
//! | Pattern | Shape |
//! |---------|-------|
//! | `direct-mention` | the file name as a standalone token |
//! | `read` | `cat ... .env` |
//! | `redirect-write` | `echo ... > .env` |
//! | `touch` | `touch ... .env` |
//! | `copy` | `cp ... .env` |
//! | `move` | `mv ... .env` |
//!
//! Matching is shallow and lexical. A false positive costs one blocked
//! command; a false negative leaks credentials.

use regex::Regex;

use super::Verdict;
use super::config::PolicyConfig;

/// Guard detecting access to the sensitive environment file.
///
/// Compiled once per invocation from [`PolicyConfig`]; both checks return
/// `None` when the policy does not apply, letting the engine fall through.
pub struct EnvFileGuard {
    sensitive_file: String,
    sample_suffix: String,
    sample_file: String,
    patterns: Vec<(&'static str, Regex)>,
}

impl EnvFileGuard {
    /// Build the guard, compiling the access-pattern table for the
    /// configured file name.
    pub fn new(policy: &PolicyConfig) -> Self {
        let file = regex::escape(&policy.sensitive_file);
        let patterns = vec![
            ("direct-mention", Regex::new(&format!(r"{file}\b")).unwrap()),
            ("read", Regex::new(&format!(r"cat\s+.*?{file}\b")).unwrap()),
            (
                "redirect-write",
                Regex::new(&format!(r"echo\s+.*?>\s*{file}\b")).unwrap(),
            ),
            ("touch", Regex::new(&format!(r"touch\s+.*?{file}\b")).unwrap()),
            ("copy", Regex::new(&format!(r"cp\s+.*?{file}\b")).unwrap()),
            ("move", Regex::new(&format!(r"mv\s+.*?{file}\b")).unwrap()),
        ];
        Self {
            sensitive_file: policy.sensitive_file.clone(),
            sample_suffix: policy.sample_suffix.clone(),
            sample_file: policy.sample_file(),
            patterns,
        }
    }

    fn block(&self) -> Verdict {
        Verdict::Block {
            reason: format!(
                "Access to {} files containing sensitive data is prohibited. \
                 Use {} for template files instead.",
                self.sensitive_file, self.sample_file
            ),
        }
    }

    /// Check the `file_path` of a file-affecting tool call.
    pub fn check_path(&self, file_path: &str) -> Option<Verdict> {
        if file_path.contains(&self.sensitive_file) && !file_path.ends_with(&self.sample_file) {
            return Some(self.block());
        }
        None
    }

    /// Check the command text of a shell tool call.
    ///
    /// Every occurrence of every pattern is inspected; an occurrence is
    /// exempt only when the text immediately after the file name is the
    /// sample suffix.
    pub fn check_command(&self, command: &str) -> Option<Verdict> {
        for (name, pattern) in &self.patterns {
            for found in pattern.find_iter(command) {
                if command[found.end()..].starts_with(&self.sample_suffix) {
                    continue;
                }
                tracing::debug!(pattern = name, "sensitive file access in command");
                return Some(self.block());
            }
        }
        None
    }
}
