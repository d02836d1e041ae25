//! Line-coverage badges: one gradient SVG per view, plus their inline
//! markdown rendering for the job summary.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::Result;
use crate::model::ViewSummary;
use crate::render::format_percent;
use crate::table::escape;

/// End colour of every badge gradient.
pub const SECOND_COLOR: &str = "11cbfa";

/// Start colours, assigned round-robin in view-name order.
pub const FIRST_COLORS: [&str; 5] = ["ea00ff", "00ff0d", "2200ff", "ff1500", "ffcc00"];

const CHAR_WIDTH: usize = 7;
const PADDING: usize = 10;

/// A two-part badge: subject on grey, status on a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub subject: String,
    pub status: String,
    pub gradient: [&'static str; 2],
}

impl Badge {
    /// Badge for the view at `index` in name order.
    pub fn for_view(index: usize, summary: &ViewSummary) -> Self {
        let status = match summary.line_percents() {
            Some(p) => format!("{}%", format_percent(p)),
            None => "n/a".to_string(),
        };
        Self {
            subject: summary.view.clone(),
            status,
            gradient: [FIRST_COLORS[index % FIRST_COLORS.len()], SECOND_COLOR],
        }
    }

    pub fn to_svg(&self) -> String {
        let subject = escape(&self.subject);
        let status = escape(&self.status);
        let subject_width = self.subject.chars().count() * CHAR_WIDTH + PADDING;
        let status_width = self.status.chars().count() * CHAR_WIDTH + PADDING;
        let total_width = subject_width + status_width;
        let subject_x = subject_width * 5;
        let status_x = subject_width * 10 + status_width * 5;
        let [from, to] = self.gradient;

        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total}\" height=\"20\" role=\"img\" aria-label=\"{subject}: {status}\">",
                "<title>{subject}: {status}</title>",
                "<linearGradient id=\"g\" x2=\"100%\" y2=\"0\"><stop offset=\"0\" stop-color=\"#{from}\"/>",
                "<stop offset=\"1\" stop-color=\"#{to}\"/></linearGradient>",
                "<linearGradient id=\"s\" x2=\"0\" y2=\"100%\"><stop offset=\"0\" stop-color=\"#bbb\" stop-opacity=\".1\"/>",
                "<stop offset=\"1\" stop-opacity=\".1\"/></linearGradient>",
                "<clipPath id=\"r\"><rect width=\"{total}\" height=\"20\" rx=\"3\" fill=\"#fff\"/></clipPath>",
                "<g clip-path=\"url(#r)\">",
                "<rect width=\"{subject_width}\" height=\"20\" fill=\"#555\"/>",
                "<rect x=\"{subject_width}\" width=\"{status_width}\" height=\"20\" fill=\"url(#g)\"/>",
                "<rect width=\"{total}\" height=\"20\" fill=\"url(#s)\"/>",
                "</g>",
                "<g fill=\"#fff\" text-anchor=\"middle\" font-family=\"Verdana,Geneva,DejaVu Sans,sans-serif\" text-rendering=\"geometricPrecision\" font-size=\"110\">",
                "<text aria-hidden=\"true\" x=\"{subject_x}\" y=\"150\" fill=\"#010101\" fill-opacity=\".3\" transform=\"scale(.1)\">{subject}</text>",
                "<text x=\"{subject_x}\" y=\"140\" transform=\"scale(.1)\">{subject}</text>",
                "<text aria-hidden=\"true\" x=\"{status_x}\" y=\"150\" fill=\"#010101\" fill-opacity=\".3\" transform=\"scale(.1)\">{status}</text>",
                "<text x=\"{status_x}\" y=\"140\" transform=\"scale(.1)\">{status}</text>",
                "</g></svg>"
            ),
            total = total_width,
            subject = subject,
            status = status,
            from = from,
            to = to,
            subject_width = subject_width,
            status_width = status_width,
            subject_x = subject_x,
            status_x = status_x,
        )
    }
}

/// Badges for all views, sorted by view name.
pub fn badges(summaries: &[ViewSummary]) -> Vec<Badge> {
    let mut sorted: Vec<&ViewSummary> = summaries.iter().collect();
    sorted.sort_by(|a, b| a.view.cmp(&b.view));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, s)| Badge::for_view(i, s))
        .collect()
}

/// Write one `{view}.svg` per view into `out_dir`. Returns `(view, path)`
/// pairs in view-name order.
pub fn write_badges(out_dir: &Path, summaries: &[ViewSummary]) -> Result<Vec<(String, PathBuf)>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    for badge in badges(summaries) {
        let path = out_dir.join(format!("{}.svg", badge.subject));
        std::fs::write(&path, badge.to_svg())?;
        log::debug!("wrote badge {}", path.display());
        written.push((badge.subject, path));
    }
    Ok(written)
}

/// Markdown block embedding each badge file as a base64 data URI, in the
/// order given.
pub fn render_badges_markdown(paths: &[PathBuf]) -> Result<String> {
    let mut out = String::from("<h4>Coverage Badges</h4>\n\n");
    for path in paths {
        let svg = std::fs::read(path)?;
        let data = base64::engine::general_purpose::STANDARD.encode(svg);
        out.push_str(&format!("![badge](data:image/svg+xml;base64,{data})\n"));
    }
    Ok(out)
}
