//! Check-run construction for each coverage view.
//!
//! The GitHub side is reached through [`CheckRunSink`], so building the
//! requests and collecting the resulting [`CheckRun`] records stays
//! testable without a network.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::{CheckRun, Conclusion, ViewSummary};

/// Default location of the per-view markdown reports.
pub const DEFAULT_REPORTS_DIR: &str = "build/reports/coverage-reports/delta-coverage";

const CHECK_RUN_MARKER: &str = "<!-- This is Delta Coverage CheckRun -->";

/// Something that can create a check run and return its HTML URL.
pub trait CheckRunSink {
    fn create_check_run(&self, request: &CheckRunRequest) -> Result<String>;
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckRunRequest {
    pub name: String,
    pub head_sha: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub conclusion: Conclusion,
    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
}

/// Settings shared by every check run of one invocation.
#[derive(Debug, Clone)]
pub struct CheckRunSettings {
    pub head_sha: String,
    pub external_id: Option<String>,
    pub ignore_coverage_failure: bool,
    pub reports_dir: PathBuf,
}

/// Upper-case the first character of a view name.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A view fails only if it has violations and failures are not ignored.
pub fn conclusion(view: &ViewSummary, ignore_coverage_failure: bool) -> Conclusion {
    if !ignore_coverage_failure && view.has_violations() {
        Conclusion::Failure
    } else {
        Conclusion::Success
    }
}

/// Error annotation text for a view with violations.
pub fn annotation(view: &ViewSummary) -> Option<String> {
    if !view.has_violations() {
        return None;
    }
    let violations: Vec<&str> = view
        .verifications
        .iter()
        .map(|v| v.violation.as_str())
        .collect();
    Some(format!(
        "[{}]: Code Coverage check failed:\n{}",
        capitalize(&view.view),
        violations.join(";\n")
    ))
}

/// Format an annotation as a GitHub workflow `::error::` command.
pub fn workflow_error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}

/// Path of the markdown report of a view.
pub fn report_path(reports_dir: &Path, view: &str) -> PathBuf {
    reports_dir.join(view).join("report.md")
}

/// Read the view's markdown report, or a placeholder if it is missing.
pub fn read_view_report(reports_dir: &Path, view: &str) -> String {
    let path = report_path(reports_dir, view);
    match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("could not read {}: {e}", path.display());
            format!("NO REPORT by path: {}", path.display())
        }
    }
}

/// Build the check-run request for a view.
pub fn build_request(
    view: &ViewSummary,
    report_markdown: &str,
    settings: &CheckRunSettings,
) -> CheckRunRequest {
    let view_name = capitalize(&view.view);
    CheckRunRequest {
        name: format!("📈{view_name} Coverage"),
        head_sha: settings.head_sha.clone(),
        status: "completed",
        external_id: settings.external_id.clone(),
        conclusion: conclusion(view, settings.ignore_coverage_failure),
        output: CheckRunOutput {
            title: format!("{view_name} Coverage"),
            summary: format!("{report_markdown}\n\n{CHECK_RUN_MARKER}"),
        },
    }
}

/// Result of creating check runs for a set of views.
#[derive(Debug, Clone, Default)]
pub struct CheckRunsOutcome {
    pub check_runs: Vec<CheckRun>,
    /// Error annotations, one per view with violations.
    pub annotations: Vec<String>,
}

/// Create a check run per view, in the supplied order.
pub fn create_check_runs(
    views: &[ViewSummary],
    settings: &CheckRunSettings,
    sink: &dyn CheckRunSink,
) -> Result<CheckRunsOutcome> {
    let mut outcome = CheckRunsOutcome::default();
    for view in views {
        if let Some(message) = annotation(view) {
            outcome.annotations.push(message);
        }
        let report = read_view_report(&settings.reports_dir, &view.view);
        let request = build_request(view, &report, settings);
        let url = sink.create_check_run(&request)?;
        log::info!("Created check run '{}' ({:?}): {url}", request.name, request.conclusion);
        outcome.check_runs.push(CheckRun {
            view_name: capitalize(&view.view),
            review_url: url,
            coverage_rules: view.coverage_rules_config.clone(),
            coverage_info: view.coverage_info.clone(),
            verifications: view.verifications.clone(),
            conclusion: Some(request.conclusion),
        });
    }
    Ok(outcome)
}
