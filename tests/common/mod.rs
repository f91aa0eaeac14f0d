//! Test infrastructure for repo-crawler integration tests.

use anyhow::Result;
use repo_crawler::config::{Config, Verbosity};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary checkout area plus a scripts directory with fake helpers.
/// Automatically cleaned up when dropped.
pub struct TestWorkspace {
    _temp_dir: TempDir,
    base: PathBuf,
    scripts: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base = temp_dir.path().join("checkouts");
        let scripts = temp_dir.path().join("scripts");
        fs::create_dir_all(&base)?;
        fs::create_dir_all(&scripts)?;

        Ok(Self {
            _temp_dir: temp_dir,
            base,
            scripts,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn scripts(&self) -> &Path {
        &self.scripts
    }

    /// Creates a checkout directory under the base.
    pub fn add_repo(&self, name: &str) -> Result<PathBuf> {
        let path = self.base.join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Creates a file under the base, making parent directories as needed.
    pub fn add_file(&self, relative: &str) -> Result<PathBuf> {
        let path = self.base.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, "")?;
        Ok(path)
    }

    /// Installs an executable helper script that echoes `lines` to stdout.
    pub fn add_script(&self, name: &str, lines: &[&str]) -> Result<PathBuf> {
        let mut body = String::new();
        for line in lines {
            body.push_str(&format!("echo '{}'\n", line));
        }
        self.add_raw_script(name, &body)
    }

    /// Installs an executable helper script with a raw shell body.
    pub fn add_raw_script(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.scripts.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body))?;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)?;
        Ok(path)
    }

    /// A quiet config pointed at this workspace, with a test allow-list.
    pub fn config(&self, known_repos: &[&str]) -> Config {
        let mut config = Config::new(self.base.clone(), self.scripts.clone());
        config.verbosity = Verbosity::Quiet;
        config.known_repos = known_repos.iter().map(|s| (*s).to_string()).collect();
        config
    }
}
