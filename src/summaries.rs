//! Selection and aggregation of per-view summary files.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::ViewSummary;

const SUMMARY_SUFFIX: &str = "-summary.json";
const FULL_COVERAGE_TAG: &str = "full-coverage-";

/// Which summaries a build produced and which should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Coverage of the changed code only.
    Delta,
    /// Coverage of the whole code base.
    Full,
}

impl Mode {
    pub fn from_full_coverage(full: bool) -> Self {
        if full {
            Mode::Full
        } else {
            Mode::Delta
        }
    }

    /// Whether a summary file name belongs to this mode.
    pub fn accepts(&self, file_name: &str) -> bool {
        if !file_name.contains(SUMMARY_SUFFIX) {
            return false;
        }
        let is_full = file_name.contains(FULL_COVERAGE_TAG);
        match self {
            Mode::Full => is_full,
            Mode::Delta => !is_full,
        }
    }

    /// File name of the aggregated summaries.
    pub fn aggregate_file_name(&self) -> &'static str {
        match self {
            Mode::Full => "full-cov-summaries.json",
            Mode::Delta => "delta-cov-summaries.json",
        }
    }
}

/// List the summary files of `mode` in `dir`, sorted by name.
pub fn find_summary_files(dir: &Path, mode: Mode) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if mode.accepts(name) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse every summary file of `mode` in `dir`.
pub fn read_summaries(dir: &Path, mode: Mode) -> Result<Vec<ViewSummary>> {
    let files = find_summary_files(dir, mode)?;
    log::info!(
        "Reading {} summaries from {}: {:?}",
        files.len(),
        dir.display(),
        files
            .iter()
            .filter_map(|f| f.file_name()?.to_str())
            .collect::<Vec<_>>()
    );
    let mut summaries = Vec::with_capacity(files.len());
    for path in &files {
        summaries.push(load_summary(path)?);
    }
    Ok(summaries)
}

fn load_summary(path: &Path) -> Result<ViewSummary> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the aggregated summaries of `mode` into `out_dir`, returning the
/// path of the written file.
pub fn write_summaries(out_dir: &Path, mode: Mode, summaries: &[ViewSummary]) -> Result<PathBuf> {
    let path = out_dir.join(mode.aggregate_file_name());
    std::fs::write(&path, serde_json::to_string(summaries)?)?;
    Ok(path)
}

/// Load an aggregated summaries file.
pub fn load_summaries(path: &Path) -> Result<Vec<ViewSummary>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
