//! Per-entity table rows of a view block.

use crate::fold::FoldDecision;
use crate::model::{EntitySummary, ViewReport};
use crate::table::{BarColor, Cell, Inline, ProgressBar, Row};

/// Rows per view block, one per coverage entity.
pub const VIEW_ROWS: usize = 3;

/// Default shortfall (in percentage points) still drawn as a near miss.
pub const DEFAULT_NEAR_MISS_BAND: f64 = 10.0;

const PASS_GLYPH: &str = "🟢";
const FAIL_GLYPH: &str = "🔴";
const TARGET_GLYPH: &str = "🎯";

/// How the colour of a measured progress bar is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorPolicy {
    /// Success when actual >= expected (or nothing is expected), failure
    /// otherwise.
    #[default]
    TwoTier,
    /// Like `TwoTier`, but a shortfall smaller than `near_miss_band` points
    /// is drawn in the near-miss colour.
    ThreeTier { near_miss_band: f64 },
}

impl ColorPolicy {
    /// Three-tier policy, with [`DEFAULT_NEAR_MISS_BAND`] when no band is
    /// given.
    #[must_use]
    pub fn near_miss(band: Option<f64>) -> Self {
        ColorPolicy::ThreeTier {
            near_miss_band: band.unwrap_or(DEFAULT_NEAR_MISS_BAND),
        }
    }

    #[must_use]
    pub fn color(&self, expected: Option<f64>, actual: f64) -> BarColor {
        let Some(expected) = expected else {
            return BarColor::Success;
        };
        let diff = actual - expected;
        if diff >= 0.0 {
            return BarColor::Success;
        }
        match self {
            ColorPolicy::ThreeTier { near_miss_band } if diff > -near_miss_band => {
                BarColor::NearMiss
            }
            _ => BarColor::Failure,
        }
    }
}

/// Format a percentage for display: at most two decimals, no trailing
/// zeros (so `0.8 * 100` shows as `80`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Build the rows of one view. Folding is decided once, up front, and
/// shared by every row.
#[must_use]
pub fn view_rows(view: &ViewReport, policy: &ColorPolicy) -> Vec<Row> {
    let fold = FoldDecision::for_view(view);
    view.entities
        .iter()
        .enumerate()
        .map(|(index, summary)| entity_row(view, summary, index, &fold, policy))
        .collect()
}

fn entity_row(
    view: &ViewReport,
    summary: &EntitySummary,
    index: usize,
    fold: &FoldDecision,
    policy: &ColorPolicy,
) -> Row {
    let mut cells = Vec::with_capacity(4);

    if index == 0 {
        cells.push(status_cell(view));
    }

    if !fold.skips_expected(index) {
        let cell = expected_cell(summary.expected);
        cells.push(if fold.fold_expected {
            cell.spanning(VIEW_ROWS)
        } else {
            cell
        });
    }

    cells.push(Cell::new(vec![Inline::Tooltip {
        title: summary.entity.tooltip().to_string(),
        text: summary.entity.as_str().to_string(),
    }]));

    if !fold.skips_actual(index) {
        let cell = Cell::new(vec![Inline::Progress(progress_bar(summary, policy))]);
        cells.push(if fold.fold_actual {
            cell.spanning(VIEW_ROWS)
        } else {
            cell
        });
    }

    Row { cells }
}

fn status_cell(view: &ViewReport) -> Cell {
    let glyph = if view.has_any_violation {
        FAIL_GLYPH
    } else {
        PASS_GLYPH
    };
    Cell::new(vec![
        Inline::Text(format!("{glyph} ")),
        Inline::Link {
            href: view.review_url.clone(),
            text: view.view_name.clone(),
        },
    ])
    .spanning(VIEW_ROWS)
}

fn expected_cell(expected: Option<f64>) -> Cell {
    let text = match expected {
        Some(v) => format!("{TARGET_GLYPH} {}% {TARGET_GLYPH}", format_percent(v)),
        None => String::new(),
    };
    Cell::new(vec![Inline::Text(text)])
}

/// Progress bar for an entity's actual coverage.
#[must_use]
pub fn progress_bar(summary: &EntitySummary, policy: &ColorPolicy) -> ProgressBar {
    match summary.actual {
        Some(actual) => ProgressBar::Measured {
            fill: actual.round() as i64,
            color: policy.color(summary.expected, actual),
        },
        None => ProgressBar::NoData,
    }
}
