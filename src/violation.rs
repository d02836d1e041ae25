//! Pass/fail evaluation of a view's coverage against its rules.

use crate::model::{CheckRun, CoverageEntity, EntitySummary, ViewReport};
use crate::resolve::{actual_percents, expected_percents};

/// Whether an entity's measured coverage violates its rule.
///
/// An entity without a rule, or without a measurement, never violates.
#[must_use]
pub fn is_violation(expected: Option<f64>, actual: Option<f64>, fail_on_violation: bool) -> bool {
    match (expected, actual) {
        (Some(expected), Some(actual)) => fail_on_violation && actual < expected,
        _ => false,
    }
}

/// Resolve and evaluate a check run into a renderable [`ViewReport`].
#[must_use]
pub fn evaluate(check_run: &CheckRun) -> ViewReport {
    let rules = check_run.coverage_rules.as_ref();
    let fail_on_violation = rules.is_some_and(|r| r.fail_on_violation);
    let expected = expected_percents(rules);
    let actual = actual_percents(&check_run.coverage_info);

    let entities = CoverageEntity::ALL.map(|entity| {
        let expected = expected.get(entity);
        let actual = actual.get(entity);
        EntitySummary {
            entity,
            expected,
            actual,
            is_violation: is_violation(expected, actual, fail_on_violation),
        }
    });
    let has_any_violation = entities.iter().any(|e| e.is_violation);

    ViewReport {
        view_name: check_run.view_name.clone(),
        review_url: check_run.review_url.clone(),
        entities,
        has_any_violation,
    }
}
