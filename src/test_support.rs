use crate::config::ProjectDescriptor;
use std::path::{Path, PathBuf};

/// Write `content` to `root/rel`, creating parent directories.
pub(crate) fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Create `root/name` with a package manifest.
pub(crate) fn create_project(root: &Path, name: &str) -> PathBuf {
    write_file(root, &format!("{}/package.json", name), "{\"name\": \"fixture\"}\n");
    root.join(name)
}

/// A project whose lint and type-check commands run the given shell scripts.
pub(crate) fn shell_project(
    name: &str,
    path: &str,
    lint_script: &str,
    typecheck_script: &str,
) -> ProjectDescriptor {
    ProjectDescriptor {
        name: name.to_string(),
        path: path.to_string(),
        lint_command: sh(lint_script),
        format_command: None,
        typecheck_command: sh(typecheck_script),
        extensions: crate::config::types::default_extensions(),
    }
}

fn sh(script: &str) -> String {
    format!("sh -c {}", shell_words::quote(script))
}
