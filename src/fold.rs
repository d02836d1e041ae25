//! Column folding: collapsing a view's three per-entity cells into a single
//! cell spanning all rows when the values are identical.

use crate::model::ViewReport;
use crate::render::format_percent;

/// Which columns of a view block are folded. Computed once per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldDecision {
    pub fold_expected: bool,
    pub fold_actual: bool,
}

impl FoldDecision {
    /// Unset counts as a value: three missing rules fold just like three
    /// equal ones. Expected values are compared as displayed, so rules that
    /// only differ past the second decimal still fold. Actual values are
    /// compared exactly, and the actual column only folds under a folded
    /// expected column, or when there is nothing measured at all.
    #[must_use]
    pub fn for_view(view: &ViewReport) -> Self {
        let [first, rest @ ..] = &view.entities;
        let shown = |expected: Option<f64>| expected.map(format_percent);
        let first_expected = shown(first.expected);
        let fold_expected = rest.iter().all(|e| shown(e.expected) == first_expected);
        let same_actual = rest.iter().all(|e| e.actual == first.actual);
        let fold_actual = same_actual && (fold_expected || first.actual.is_none());
        Self {
            fold_expected,
            fold_actual,
        }
    }

    /// Whether a row omits its expected cell.
    #[must_use]
    pub fn skips_expected(&self, row: usize) -> bool {
        self.fold_expected && row > 0
    }

    /// Whether a row omits its actual cell.
    #[must_use]
    pub fn skips_actual(&self, row: usize) -> bool {
        self.fold_actual && row > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageEntity, EntitySummary};

    fn view(expected: [Option<f64>; 3], actual: [Option<f64>; 3]) -> ViewReport {
        let entities = CoverageEntity::ALL.map(|entity| EntitySummary {
            entity,
            expected: expected[entity.index()],
            actual: actual[entity.index()],
            is_violation: false,
        });
        ViewReport {
            view_name: "v".to_string(),
            review_url: String::new(),
            entities,
            has_any_violation: false,
        }
    }

    #[test]
    fn test_fold_both_when_uniform() {
        let d = FoldDecision::for_view(&view([Some(80.0); 3], [Some(90.0); 3]));
        assert!(d.fold_expected);
        assert!(d.fold_actual);
    }

    #[test]
    fn test_unset_expected_counts_as_value() {
        let d = FoldDecision::for_view(&view([None; 3], [Some(1.0), Some(2.0), Some(3.0)]));
        assert!(d.fold_expected);
        assert!(!d.fold_actual);
    }

    #[test]
    fn test_uniform_actual_without_uniform_expected() {
        let d = FoldDecision::for_view(&view(
            [Some(70.0), Some(80.0), Some(90.0)],
            [Some(80.0); 3],
        ));
        assert!(!d.fold_expected);
        assert!(!d.fold_actual);
    }

    #[test]
    fn test_unset_actual_folds_regardless_of_expected() {
        let d = FoldDecision::for_view(&view([Some(70.0), None, Some(90.0)], [None; 3]));
        assert!(!d.fold_expected);
        assert!(d.fold_actual);
    }

    #[test]
    fn test_mixed_expected_set_and_unset() {
        let d = FoldDecision::for_view(&view([Some(80.0), Some(80.0), None], [Some(80.0); 3]));
        assert!(!d.fold_expected);
        assert!(!d.fold_actual);
    }

    #[test]
    fn test_expected_folds_on_displayed_value() {
        let d = FoldDecision::for_view(&view([Some(80.001), Some(80.0), Some(80.0)], [None; 3]));
        assert!(d.fold_expected);
        let d = FoldDecision::for_view(&view([Some(80.01), Some(80.0), Some(80.0)], [None; 3]));
        assert!(!d.fold_expected);
    }

    #[test]
    fn test_skips_only_after_first_row() {
        let d = FoldDecision {
            fold_expected: true,
            fold_actual: false,
        };
        assert!(!d.skips_expected(0));
        assert!(d.skips_expected(1));
        assert!(d.skips_expected(2));
        assert!(!d.skips_actual(2));
    }
}
