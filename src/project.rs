//! Project root discovery.
//!
//! The audit log lives under the project root, which is resolved once per
//! invocation: an explicit `TOOLSHIELD_PROJECT_ROOT` override wins,
//! otherwise the working directory and its ancestors are searched for a
//! `.claude` marker directory, and as a last resort the working directory
//! itself is used.

use std::path::{Path, PathBuf};

/// Environment variable overriding project root discovery.
pub const ROOT_ENV_VAR: &str = "TOOLSHIELD_PROJECT_ROOT";

/// Directory whose presence marks a project root.
pub const MARKER_DIR: &str = ".claude";

/// Resolve the project root from the process environment.
pub fn resolve_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let override_root = std::env::var(ROOT_ENV_VAR).ok();
    resolve_from(override_root.as_deref(), &cwd)
}

/// Resolve the project root from an explicit override and working directory.
pub fn resolve_from(override_root: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(root) = override_root {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }
    for dir in cwd.ancestors() {
        if dir.join(MARKER_DIR).is_dir() {
            return dir.to_path_buf();
        }
    }
    cwd.to_path_buf()
}
