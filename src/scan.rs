//! Filesystem discovery: known checkout directories and nested bundle files.
//!
//! Bundles may sit at any depth inside a checkout (a module subdirectory,
//! for example), so a flat listing is not enough. Traversal uses an explicit
//! stack to keep deep trees off the call stack.

use anyhow::Context;
use std::path::{Path, PathBuf};

/// A bundle file discovered inside a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// File name, one of the recognized bundle names.
    pub name: String,
    /// Absolute path of the bundle file.
    pub path: PathBuf,
    /// The checkout directory the bundle belongs to.
    pub repo: PathBuf,
}

/// Returns the immediate children of `base` whose name is in `allow_list`.
///
/// Matching entries are returned whether they are directories or plain
/// files; the allow-list is trusted to name directories. An unreadable
/// `base` is a fatal error, there is no partial-result fallback.
pub fn find_known_repo_dirs(base: &Path, allow_list: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(base)
        .with_context(|| format!("Failed to read base directory <{}>", base.display()))?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in <{}>", base.display()))?;
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| allow_list.contains(&name))
        {
            repos.push(entry.path());
        }
    }
    Ok(repos)
}

/// Lists every regular file under `dir`, depth-first.
///
/// Only files are returned, never directory entries. A non-existent or
/// non-directory input yields an empty list; not finding anything is not an
/// error here, unlike the base-directory scan. Order is platform-defined.
pub fn list_files_recursively(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files
}

/// Finds the first regular file named `target` anywhere under `dir`,
/// short-circuiting as soon as a match turns up.
///
/// Returns `None` when the subtree holds no such file, at any depth.
pub fn find_first_file_by_name(target: &str, dir: &Path) -> Option<PathBuf> {
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                if entry.file_name() == *target {
                    return Some(path);
                }
            } else if path.is_dir() {
                stack.push(path);
            }
        }
    }
    None
}

/// Looks up each recognized bundle file name in every checkout and collects
/// the ones that exist, keyed to their owning checkout.
pub fn find_bundles(repos: &[PathBuf], bundle_names: &[&str]) -> Vec<Bundle> {
    let mut bundles = Vec::new();
    for repo in repos {
        if !repo.is_dir() {
            continue;
        }
        for name in bundle_names {
            if let Some(path) = find_first_file_by_name(name, repo) {
                bundles.push(Bundle {
                    name: (*name).to_string(),
                    path,
                    repo: repo.clone(),
                });
            }
        }
    }
    bundles
}
