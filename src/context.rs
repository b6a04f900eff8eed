//! Session context resolution for aftercare.
//!
//! Every stage works relative to a single session root: the directory the
//! automated session edited. It comes from `AFTERCARE_PROJECT_DIR` when set,
//! otherwise from the current working directory.

use crate::error::{AftercareError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the session root directory.
pub const SESSION_ROOT_ENV: &str = "AFTERCARE_PROJECT_DIR";

/// Environment variable enabling verbose diagnostics on stderr.
pub const DEBUG_ENV: &str = "AFTERCARE_DEBUG";

/// Configuration directory relative to the session root.
pub const CONFIG_DIR: &str = ".aftercare";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Resolved paths for one aftercare invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Absolute path to the session root.
    pub root: PathBuf,
}

impl SessionContext {
    /// Resolve the session root from the environment, falling back to the cwd.
    pub fn resolve() -> Result<Self> {
        match env::var_os(SESSION_ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::resolve_from(PathBuf::from(root)),
            _ => {
                let cwd = env::current_dir().map_err(|e| {
                    AftercareError::io("failed to get current working directory", ".", e)
                })?;
                Self::resolve_from(cwd)
            }
        }
    }

    /// Build a context rooted at `root`. Relative roots are made absolute
    /// against the current working directory.
    pub fn resolve_from<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            env::current_dir()
                .map_err(|e| AftercareError::io("failed to get current working directory", ".", e))?
                .join(root)
        };

        Ok(Self { root })
    }

    /// Path to `.aftercare/config.yaml`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Join a root-relative path onto the session root.
    pub fn join(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Render `path` relative to the session root with forward slashes.
    ///
    /// Paths outside the root are rendered as-is.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}

/// Whether `AFTERCARE_DEBUG` asks for verbose diagnostics.
pub fn debug_enabled() -> bool {
    env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty() && v != "0")
}
