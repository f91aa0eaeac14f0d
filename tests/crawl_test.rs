mod common;

use common::TestWorkspace;
use repo_crawler::constants::KNOWN_SCRIPTS;
use repo_crawler::runner::Runner;
use repo_crawler::{crawl, scan};

#[test]
fn test_full_crawl_updates_and_builds() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_file("alpha/modules/x/bundle")?;
    workspace.add_file("alpha/bundle-skip-tests")?;
    workspace.add_repo("beta")?;
    workspace.add_script("update", &["Already up to date."])?;
    workspace.add_script("build", &["BUILD SUCCESS"])?;

    let config = workspace.config(&["alpha", "beta"]);
    let summary = crawl::run(&config)?;

    // Two updates plus two bundle builds
    assert_eq!(summary.reports.len(), 4);
    assert_eq!(summary.succeeded_count(), 4);
    assert_eq!(summary.failed_count(), 0);
    Ok(())
}

#[test]
fn test_crawl_ignores_unlisted_directories() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_repo("stray")?;
    workspace.add_script("update", &["ok"])?;
    workspace.add_script("build", &["ok"])?;

    let config = workspace.config(&["alpha"]);
    let summary = crawl::run(&config)?;

    // One update for alpha, no bundles anywhere
    assert_eq!(summary.reports.len(), 1);
    assert!(summary.reports[0].request.working_dir.ends_with("alpha"));
    Ok(())
}

#[test]
fn test_bundle_requests_target_the_containing_directory() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    let alpha = workspace.add_repo("alpha")?;
    workspace.add_file("alpha/modules/x/bundle")?;
    workspace.add_file("alpha/bundle-skip-tests")?;
    workspace.add_script("build", &["BUILD SUCCESS"])?;

    let config = workspace.config(&["alpha"]);
    let runner = Runner::new(workspace.scripts(), KNOWN_SCRIPTS);

    let bundle_names: Vec<&str> = config.bundle_files.iter().map(String::as_str).collect();
    let bundles = scan::find_bundles(&[alpha.clone()], &bundle_names);
    let reports = crawl::run_bundles(&runner, &bundles, &config)?;

    assert_eq!(reports.len(), 2);
    assert!(
        reports
            .iter()
            .any(|r| r.request.working_dir == alpha.join("modules/x")
                && r.request.args == vec!["bundle"])
    );
    assert!(
        reports
            .iter()
            .any(|r| r.request.working_dir == alpha && r.request.args == vec!["bundle-skip-tests"])
    );
    Ok(())
}

#[test]
fn test_failed_build_does_not_stop_the_crawl() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_file("alpha/bundle")?;
    workspace.add_repo("beta")?;
    workspace.add_file("beta/bundle")?;
    workspace.add_script("update", &["ok"])?;
    workspace.add_raw_script(
        "build",
        "case \"$1\" in\n*alpha*) echo '[ERROR] BUILD FAILURE' ;;\n*) echo 'BUILD SUCCESS' ;;\nesac\n",
    )?;

    let config = workspace.config(&["alpha", "beta"]);
    let summary = crawl::run(&config)?;

    assert_eq!(summary.reports.len(), 4);
    assert_eq!(summary.failed_count(), 1);
    assert_eq!(summary.succeeded_count(), 3);
    Ok(())
}

#[test]
fn test_update_transcript_is_retained_on_success() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_script("update", &["Fetching origin", "Fast-forwarded main"])?;

    let mut config = workspace.config(&["alpha"]);
    config.skip_bundles = true;
    let summary = crawl::run(&config)?;

    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert!(report.success);
    assert_eq!(report.transcript, vec!["Fetching origin", "Fast-forwarded main"]);
    Ok(())
}

#[test]
fn test_skip_flags_disable_phases() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_file("alpha/bundle")?;
    workspace.add_script("update", &["ok"])?;
    workspace.add_script("build", &["ok"])?;

    let mut config = workspace.config(&["alpha"]);
    config.skip_update = true;
    let summary = crawl::run(&config)?;
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].request.script, "build");

    let mut config = workspace.config(&["alpha"]);
    config.skip_bundles = true;
    let summary = crawl::run(&config)?;
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].request.script, "update");
    Ok(())
}

#[test]
fn test_empty_base_directory_is_a_clean_no_op() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_script("update", &["ok"])?;
    workspace.add_script("build", &["ok"])?;

    let config = workspace.config(&["alpha"]);
    let summary = crawl::run(&config)?;

    assert!(summary.reports.is_empty());
    Ok(())
}

#[test]
fn test_missing_base_directory_aborts_the_run() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    let mut config = workspace.config(&["alpha"]);
    config.base_dir = workspace.base().join("no-such-dir");

    assert!(crawl::run(&config).is_err());
    Ok(())
}

#[test]
fn test_no_bundles_found_is_not_an_error() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.add_repo("alpha")?;
    workspace.add_script("update", &["ok"])?;

    let config = workspace.config(&["alpha"]);
    let summary = crawl::run(&config)?;

    // Only the update ran; the empty bundle phase reported nothing
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].request.script, "update");
    Ok(())
}
