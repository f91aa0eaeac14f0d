//! Colored status output, transcripts, and progress display.
//!
//! All user-facing text goes through this module: discovery announcements,
//! per-script transcripts, timing lines, and the final summary.

use crate::config::Config;
use crate::constants::{PROGRESS_TICK_MS, UPDATE_SCRIPT};
use crate::runner::{ExecutionReport, ExecutionRequest};
use crate::scan::Bundle;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub fn print_working_base(path: &Path, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} {}",
        "Working in:".cyan(),
        path.display().to_string().white().bold()
    )
}

pub fn print_section(title: &str, config: &Config) {
    if config.is_quiet() {
        return;
    }
    let line = "=".repeat(50).cyan().dimmed();
    let padding = (50 - title.len()) / 2;
    let centered = format!("{:>width$}", title, width = padding + title.len());
    println!("\n{}\n{}\n{}\n", line, centered.cyan().bold(), line);
}

pub fn print_no_repos(config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!("{}", "No known checkouts found".yellow().bold())
}

pub fn print_found_bundle(bundle: &Bundle, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} {}",
        "Found".green(),
        format!("'{}' in <{}>", bundle.name, bundle.path.display()).green()
    )
}

pub fn print_no_bundles(config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!("{}", "No bundles found".red().bold())
}

/// Prints a per-execution header in verbose mode.
pub fn print_execution_start(request: &ExecutionRequest, config: &Config) {
    if !config.is_verbose() {
        return;
    }
    eprintln!(
        "\n{}",
        format!("[{} in {}]", request.script, request.working_dir.display())
            .white()
            .bold()
    );
}

/// Prints the report for one finished execution.
///
/// Failures always show the full transcript. Successful update runs show it
/// too, so the upstream sync log is never hidden; successful builds collapse
/// to a one-line summary. The timing line closes every report.
pub fn print_report(report: &ExecutionReport, config: &Config) {
    if config.is_quiet() {
        return;
    }

    if !report.success || report.request.script == UPDATE_SCRIPT {
        print_transcript(&report.transcript);
    } else {
        let built = report
            .request
            .args
            .first()
            .map(String::as_str)
            .unwrap_or(report.request.script.as_str());
        println!(
            "{}",
            format!(
                "Successfully built '{}' in <{}>",
                built,
                report.request.working_dir.display()
            )
            .green()
        );
    }

    println!(
        "{}",
        format!(
            "Finished '{}' in <{}> in [{}] ms",
            report.request.script,
            report.request.working_dir.display(),
            report.duration.as_millis()
        )
        .dimmed()
    );
    println!();
}

fn print_transcript(lines: &[String]) {
    // A script may legitimately produce no output at all.
    if lines.is_empty() {
        println!("{}", "(no output)".dimmed());
        return;
    }
    for line in lines {
        println!("{} {}", "[CMD OUTPUT]".magenta(), line.blue());
    }
}

/// Progress wrapper for one running script.
/// Uses `Option` to avoid allocation when progress is hidden (quiet/verbose modes).
pub struct ScriptProgress {
    spinner: Option<ProgressBar>,
}

impl ScriptProgress {
    /// Clears the spinner so the transcript prints on a clean line.
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Creates a spinner shown while an external script runs.
/// Returns a hidden one in quiet or verbose mode.
#[must_use]
pub fn create_script_progress(request: &ExecutionRequest, config: &Config) -> ScriptProgress {
    let spinner = if config.is_quiet() || config.is_verbose() {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!(
            "Running '{}' in <{}>...",
            request.script,
            request.working_dir.display()
        ));
        spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Some(spinner)
    };

    ScriptProgress { spinner }
}

pub fn print_summary(reports: &[ExecutionReport], duration: Duration, config: &Config) {
    if config.is_quiet() {
        print_quiet_summary(reports);
    } else {
        print_normal_summary(reports, duration, config);
    }
}

fn print_quiet_summary(reports: &[ExecutionReport]) {
    let (successes, failures): (Vec<_>, Vec<_>) = reports.iter().partition(|r| r.success);

    // Always print the count to stdout
    println!("{}/{} executions succeeded", successes.len(), reports.len());

    // Print failures to stderr
    for report in &failures {
        eprintln!(
            "error: '{}' in <{}> failed",
            report.request.script,
            report.request.working_dir.display()
        );
    }
}

fn print_normal_summary(reports: &[ExecutionReport], duration: Duration, config: &Config) {
    print_section("Summary", config);
    let (successes, failures): (Vec<_>, Vec<_>) = reports.iter().partition(|r| r.success);

    print_failures(&failures);

    println!(
        "{}: {}/{} executions in {}",
        "Total".white().bold(),
        successes.len(),
        reports.len(),
        format_duration(duration)
    );
}

fn print_failures(failures: &[&ExecutionReport]) {
    if failures.is_empty() {
        return;
    }

    println!("{}", format!("Failed ({}):", failures.len()).red().bold());

    for report in failures {
        println!(
            "  {} {} {} in {}",
            "FAIL".red().bold(),
            report.request.script.white(),
            format!("<{}>", report.request.working_dir.display()).red(),
            format_duration(report.duration).dimmed(),
        );
    }
    println!();
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}
