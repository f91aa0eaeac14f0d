// Run orchestration: update known checkouts, then find and run their bundles.
// Strictly sequential, in discovery order.

use crate::config::Config;
use crate::constants::{BUILD_SCRIPT, KNOWN_SCRIPTS, UPDATE_SCRIPT};
use crate::output;
use crate::runner::{ExecutionReport, ExecutionRequest, Runner};
use crate::scan::{self, Bundle};
use std::path::PathBuf;

/// Collected reports from one full crawl.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ExecutionReport>,
}

impl RunSummary {
    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.reports.iter().filter(|r| r.success).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.reports.len() - self.succeeded_count()
    }
}

/// Runs one full crawl: discover checkouts, pull updates, run bundles.
///
/// A failed script is recorded and the crawl moves on; discovery and
/// process-level errors abort the whole run.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let runner = Runner::new(&config.scripts_dir, KNOWN_SCRIPTS);
    let allow_list: Vec<&str> = config.known_repos.iter().map(String::as_str).collect();
    let repos = scan::find_known_repo_dirs(&config.base_dir, &allow_list)?;

    if repos.is_empty() {
        output::print_no_repos(config);
        return Ok(RunSummary::default());
    }

    let mut summary = RunSummary::default();

    if !config.skip_update {
        output::print_section("Pulling updates from main", config);
        summary
            .reports
            .extend(update_repos(&runner, &repos, config)?);
    }

    if !config.skip_bundles {
        output::print_section("Running bundles", config);
        let bundle_names: Vec<&str> = config.bundle_files.iter().map(String::as_str).collect();
        let bundles = scan::find_bundles(&repos, &bundle_names);

        if bundles.is_empty() {
            output::print_no_bundles(config);
        } else {
            for bundle in &bundles {
                output::print_found_bundle(bundle, config);
            }
            summary
                .reports
                .extend(run_bundles(&runner, &bundles, config)?);
        }
    }

    Ok(summary)
}

/// Syncs each checkout with its upstream main branch, one at a time.
pub fn update_repos(
    runner: &Runner,
    repos: &[PathBuf],
    config: &Config,
) -> anyhow::Result<Vec<ExecutionReport>> {
    let mut reports = Vec::with_capacity(repos.len());
    for repo in repos {
        let request = ExecutionRequest::new(UPDATE_SCRIPT, repo, &[]);
        reports.push(execute_and_report(runner, request, config)?);
    }
    Ok(reports)
}

/// Runs each discovered bundle in its containing directory, one at a time.
pub fn run_bundles(
    runner: &Runner,
    bundles: &[Bundle],
    config: &Config,
) -> anyhow::Result<Vec<ExecutionReport>> {
    let mut reports = Vec::with_capacity(bundles.len());
    for bundle in bundles {
        let target = bundle.path.parent().unwrap_or(&bundle.repo);
        let request = ExecutionRequest::new(BUILD_SCRIPT, target, &[bundle.name.as_str()]);
        reports.push(execute_and_report(runner, request, config)?);
    }
    Ok(reports)
}

fn execute_and_report(
    runner: &Runner,
    request: ExecutionRequest,
    config: &Config,
) -> anyhow::Result<ExecutionReport> {
    output::print_execution_start(&request, config);
    let progress = output::create_script_progress(&request, config);

    let report = runner.execute(request)?;

    progress.finish();
    output::print_report(&report, config);
    Ok(report)
}
