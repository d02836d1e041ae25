//! Command handler functions for the deltacov CLI.
//!
//! Each `cmd_*` function returns its output as a `String` (or the data the
//! caller publishes), making them easy to test without capturing stdout.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::badge;
use crate::checks::{self, CheckRunSettings, CheckRunSink};
use crate::model::CheckRun;
use crate::report::{build_report, ReportOptions};
use crate::summaries::{self, Mode};

/// Aggregate the summary files of one mode; returns the written path.
pub fn cmd_read_summaries(dir: &Path, full_coverage: bool, out_dir: &Path) -> Result<String> {
    let mode = Mode::from_full_coverage(full_coverage);
    let views = summaries::read_summaries(dir, mode)
        .with_context(|| format!("Failed to read summaries from {}", dir.display()))?;
    let path = summaries::write_summaries(out_dir, mode, &views)
        .context("Failed to write aggregated summaries")?;
    Ok(format!("{}\n", path.display()))
}

/// Create one check run per view and write the resulting records to
/// `output`. Returns the workflow annotations followed by a status line.
pub fn cmd_check_runs(
    summaries_file: &Path,
    settings: &CheckRunSettings,
    sink: &dyn CheckRunSink,
    output: &Path,
) -> Result<String> {
    let views = summaries::load_summaries(summaries_file)
        .with_context(|| format!("Failed to load {}", summaries_file.display()))?;
    let outcome = checks::create_check_runs(&views, settings, sink)
        .context("Failed to create check runs")?;

    let json = serde_json::to_string_pretty(&outcome.check_runs)?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let mut out = String::new();
    for message in &outcome.annotations {
        writeln!(out, "{}", checks::workflow_error_command(message))?;
    }
    writeln!(
        out,
        "Created {} check runs → {}",
        outcome.check_runs.len(),
        output.display()
    )?;
    Ok(out)
}

/// Render the folded summary table for the check runs in `check_runs_file`.
pub fn cmd_comment(check_runs_file: &Path, options: &ReportOptions) -> Result<String> {
    let content = std::fs::read_to_string(check_runs_file)
        .with_context(|| format!("Failed to read {}", check_runs_file.display()))?;
    let check_runs: Vec<CheckRun> =
        serde_json::from_str(&content).context("Failed to parse check runs JSON")?;
    Ok(build_report(&check_runs, options))
}

/// Write one badge per view; returns `(view, path)` pairs.
pub fn cmd_badges(summaries_file: &Path, out_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let views = summaries::load_summaries(summaries_file)
        .with_context(|| format!("Failed to load {}", summaries_file.display()))?;
    badge::write_badges(out_dir, &views)
        .with_context(|| format!("Failed to write badges to {}", out_dir.display()))
}

/// Markdown embedding the given badge files.
pub fn badges_summary(paths: &[PathBuf]) -> Result<String> {
    badge::render_badges_markdown(paths).context("Failed to read badge files")
}
