//! Assembly of the folded coverage summary table.

use crate::model::{CheckRun, ViewReport};
use crate::render::{view_rows, ColorPolicy};
use crate::table::{escape, header_row_html};
use crate::violation::evaluate;

pub const DEFAULT_TITLE: &str = "Delta Coverage Summary";

/// Hidden marker used to find a previously posted report.
pub const DEFAULT_MARKER: &str = "<!-- delta-coverage-comment -->";

const HEADERS: [&str; 4] = ["Check", "Expected", "Entity", "Actual"];

/// Presentation options of the summary report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub marker: String,
    pub color_policy: ColorPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            color_policy: ColorPolicy::default(),
        }
    }
}

/// Evaluated views, in the order they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub views: Vec<ViewReport>,
}

impl SummaryReport {
    #[must_use]
    pub fn from_check_runs(check_runs: &[CheckRun]) -> Self {
        Self {
            views: check_runs.iter().map(evaluate).collect(),
        }
    }

    /// Whether any view failed its coverage rules.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.views.iter().any(|v| v.has_any_violation)
    }

    /// Render heading, marker and table.
    #[must_use]
    pub fn render(&self, options: &ReportOptions) -> String {
        let mut out = String::new();
        out.push_str(&format!("<h2>{}</h2>\n", escape(&options.title)));
        out.push_str(&options.marker);
        out.push_str("\n\n");
        out.push_str("<table><tbody>");
        out.push_str(&header_row_html(&HEADERS));
        for view in &self.views {
            let rows: Vec<String> = view_rows(view, &options.color_policy)
                .iter()
                .map(|r| r.to_html())
                .collect();
            out.push_str(&rows.join("\n"));
            out.push('\n');
        }
        out.push_str("</tbody></table>");
        out
    }
}

/// Evaluate and render check runs in one go.
#[must_use]
pub fn build_report(check_runs: &[CheckRun], options: &ReportOptions) -> String {
    SummaryReport::from_check_runs(check_runs).render(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str) -> CheckRun {
        CheckRun {
            view_name: name.to_string(),
            review_url: format!("https://example.com/{name}"),
            coverage_rules: None,
            coverage_info: vec![],
            verifications: vec![],
            conclusion: None,
        }
    }

    #[test]
    fn test_render_frame() {
        let out = build_report(&[], &ReportOptions::default());
        assert!(out.starts_with("<h2>Delta Coverage Summary</h2>\n<!-- delta-coverage-comment -->\n\n"));
        assert!(out.contains(
            "<table><tbody><tr><th>Check</th>\n<th>Expected</th>\n<th>Entity</th>\n<th>Actual</th></tr>"
        ));
        assert!(out.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_render_custom_title_and_marker() {
        let options = ReportOptions {
            title: "Coverage & more".to_string(),
            marker: "<!-- mine -->".to_string(),
            ..Default::default()
        };
        let out = build_report(&[run("a")], &options);
        assert!(out.starts_with("<h2>Coverage &amp; more</h2>\n<!-- mine -->"));
    }

    #[test]
    fn test_views_keep_supplied_order() {
        let out = build_report(&[run("b-view"), run("a-view")], &ReportOptions::default());
        let b = out.find(">b-view</a>").unwrap();
        let a = out.find(">a-view</a>").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_three_rows_per_view() {
        let out = build_report(&[run("x"), run("y")], &ReportOptions::default());
        assert_eq!(out.matches("<tr>\n").count(), 6);
    }

    #[test]
    fn test_has_failures() {
        let report = SummaryReport::from_check_runs(&[run("x")]);
        assert!(!report.has_failures());
    }
}
