//! Application-wide constants.
//!
//! Centralized configuration values to avoid magic strings throughout the codebase.

use std::path::PathBuf;

/// Environment variable naming a path inside the checkout area.
/// The discovery base directory is that path's *parent*.
pub const REPO_DIR_ENV: &str = "REPO_CRAWLER_DIR";

/// Environment variable overriding the helper-scripts directory.
pub const SCRIPTS_DIR_ENV: &str = "REPO_CRAWLER_SCRIPTS";

/// Checkout directory names the crawler manages. Anything else under the
/// base directory is ignored.
pub const KNOWN_REPOS: &[&str] = &[
    "codeforces-commons",
    "commons-ext",
    "csrf-prevention-filter",
    "docker-agent",
    "interop",
    "invoker-and-control",
    "jacuzzi",
    "jquery-drafts",
    "jrun",
    "nocturne",
    "riorita",
];

/// Recognized bundle file names, searched recursively inside each checkout.
pub const BUNDLE_FILES: &[&str] = &["bundle", "bundle-skip-tests"];

/// Helper script that syncs a checkout with its upstream main branch.
pub const UPDATE_SCRIPT: &str = "update";

/// Helper script that runs one bundle inside a target directory.
pub const BUILD_SCRIPT: &str = "build";

/// Script identifiers the runner accepts. The identifier doubles as the
/// helper script's file name inside the scripts directory.
pub const KNOWN_SCRIPTS: &[&str] = &[UPDATE_SCRIPT, BUILD_SCRIPT];

/// Literal marker that classifies a script output line as a failure.
pub const ERROR_MARKER: &str = "[ERROR]";

/// Progress spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;

/// Returns the helper-scripts directory.
///
/// Can be customized via the REPO_CRAWLER_SCRIPTS environment variable.
/// Falls back to `~/.repo-crawler/scripts`.
///
/// Example: `REPO_CRAWLER_SCRIPTS=/opt/crawler/scripts repo-crawler`
pub fn default_scripts_dir() -> PathBuf {
    std::env::var_os(SCRIPTS_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".repo-crawler/scripts"))
        })
        .unwrap_or_else(|| PathBuf::from("scripts"))
}
