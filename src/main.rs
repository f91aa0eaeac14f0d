use clap::Parser;
use repo_crawler::config::{self, Config, Verbosity};
use repo_crawler::constants::default_scripts_dir;
use repo_crawler::{crawl, output};
use std::path::PathBuf;
use std::time::Instant;

/// Updates known checkouts from upstream and runs their bundle scripts.
#[derive(Parser)]
#[command(name = "repo-crawler", version)]
struct Cli {
    /// Base directory containing the checkouts
    /// (defaults to the parent of $REPO_CRAWLER_DIR)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Directory holding the helper scripts
    #[arg(long)]
    scripts_dir: Option<PathBuf>,

    /// Skip the upstream update phase
    #[arg(long)]
    skip_update: bool,

    /// Skip bundle discovery and execution
    #[arg(long)]
    skip_bundles: bool,

    /// Only print the final counts
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print every execution step
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = config::resolve_base_dir(cli.base_dir.clone())?;
    let scripts_dir = cli.scripts_dir.clone().unwrap_or_else(default_scripts_dir);

    let mut config = Config::new(base_dir, scripts_dir);
    config.verbosity = cli.verbosity();
    config.skip_update = cli.skip_update;
    config.skip_bundles = cli.skip_bundles;

    let started = Instant::now();
    output::print_working_base(&config.base_dir, &config);

    let summary = crawl::run(&config)?;
    output::print_summary(&summary.reports, started.elapsed(), &config);

    if summary.failed_count() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
