//! Runtime configuration resolved from CLI arguments and the environment.

use crate::constants::{BUNDLE_FILES, KNOWN_REPOS, REPO_DIR_ENV};
use anyhow::Context;
use std::path::PathBuf;

/// Runtime configuration for one crawler run.
///
/// The allow-lists live here rather than being read from `constants` inside
/// the core functions, so tests can substitute their own sets.
#[derive(Debug, Clone)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    /// Directory whose immediate children are matched against `known_repos`.
    pub base_dir: PathBuf,
    /// Directory holding the helper scripts.
    pub scripts_dir: PathBuf,
    /// Checkout directory names to manage.
    pub known_repos: Vec<String>,
    /// Bundle file names to search for inside each checkout.
    pub bundle_files: Vec<String>,
    /// Skip the upstream update phase.
    pub skip_update: bool,
    /// Skip bundle discovery and execution.
    pub skip_bundles: bool,
}

impl Config {
    /// Builds a config with the compiled-in allow-lists for the given paths.
    #[must_use]
    pub fn new(base_dir: PathBuf, scripts_dir: PathBuf) -> Self {
        Self {
            verbosity: Verbosity::default(),
            base_dir,
            scripts_dir,
            known_repos: KNOWN_REPOS.iter().map(|s| (*s).to_string()).collect(),
            bundle_files: BUNDLE_FILES.iter().map(|s| (*s).to_string()).collect(),
            skip_update: false,
            skip_bundles: false,
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Resolves the discovery base directory.
///
/// An explicit override wins; otherwise the base directory is the parent of
/// the path named by the REPO_CRAWLER_DIR environment variable. A missing
/// variable or a parent-less value is fatal.
pub fn resolve_base_dir(override_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    let value = std::env::var(REPO_DIR_ENV)
        .with_context(|| format!("Cannot find '{}' variable", REPO_DIR_ENV))?;
    base_dir_from(&value)
}

/// Extracts the base directory from an environment value: the value names a
/// path inside the checkout area, so its parent is the directory to scan.
fn base_dir_from(value: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(value);
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .with_context(|| format!("'{}' points to a path with no parent: {}", REPO_DIR_ENV, value))?;
    Ok(parent.to_path_buf())
}
