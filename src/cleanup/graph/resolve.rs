//! Module specifier resolution.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Specifier prefix resolved against the alias root.
pub const ALIAS_MARKER: &str = "@/";

/// Suffixes tried after the bare path, in order.
pub const RESOLVE_SUFFIXES: [&str; 4] = [".ts", ".tsx", "/index.ts", "/index.tsx"];

/// Resolve `specifier` as imported from `importer`.
///
/// Returns `None` for external specifiers and for local ones that do not
/// resolve to an existing file.
pub fn resolve_specifier(specifier: &str, importer: &Path, alias_root: &Path) -> Option<PathBuf> {
    let base = if let Some(rest) = specifier.strip_prefix(ALIAS_MARKER) {
        alias_root.join(rest)
    } else if specifier.starts_with('.') {
        importer.parent()?.join(specifier)
    } else {
        return None;
    };

    let base = normalize_lexically(&base);
    candidates(&base).into_iter().find(|candidate| candidate.is_file())
}

fn candidates(base: &Path) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(RESOLVE_SUFFIXES.len() + 1);
    out.push(base.to_path_buf());
    for suffix in RESOLVE_SUFFIXES {
        let mut joined: OsString = base.as_os_str().to_os_string();
        joined.push(suffix);
        out.push(PathBuf::from(joined));
    }
    out
}

/// Remove `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
