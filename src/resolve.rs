//! Resolution of expected (rule) and actual (measured) percentages per
//! coverage entity.

use crate::model::{CoverageEntity, CoverageMeasurement, CoverageRulesConfig};

/// One optional percentage per entity, indexed in [`CoverageEntity::ALL`]
/// order. `None` means "unset": no rule, or nothing measured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityPercents([Option<f64>; 3]);

impl EntityPercents {
    #[must_use]
    pub fn get(&self, entity: CoverageEntity) -> Option<f64> {
        self.0[entity.index()]
    }

    fn set(&mut self, entity: CoverageEntity, value: f64) {
        self.0[entity.index()] = Some(value);
    }
}

/// Configured minimum coverage per entity, as a percentage.
///
/// Ratios are taken verbatim (`ratio * 100`); range validation belongs to
/// whoever produced the configuration.
#[must_use]
pub fn expected_percents(rules: Option<&CoverageRulesConfig>) -> EntityPercents {
    let mut out = EntityPercents::default();
    let Some(rules) = rules else {
        return out;
    };
    for (name, rule) in &rules.entities_rules {
        if let Some(entity) = CoverageEntity::from_name(name) {
            out.set(entity, rule.min_coverage_ratio * 100.0);
        }
    }
    out
}

/// Observed coverage per entity.
///
/// Measurements with `total == 0` or without a percentage are skipped. When
/// the same entity shows up more than once, the last measurement wins.
#[must_use]
pub fn actual_percents(info: &[CoverageMeasurement]) -> EntityPercents {
    let mut out = EntityPercents::default();
    for m in info.iter().filter(|m| m.total != 0) {
        let Some(percents) = m.percents else {
            continue;
        };
        match CoverageEntity::from_name(&m.coverage_entity) {
            Some(entity) => out.set(entity, percents),
            None => log::debug!("ignoring measurement for entity '{}'", m.coverage_entity),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoverageRule;
    use std::collections::HashMap;

    fn measurement(entity: &str, total: u64, percents: f64) -> CoverageMeasurement {
        CoverageMeasurement {
            coverage_entity: entity.to_string(),
            total,
            percents: Some(percents),
        }
    }

    fn rules(pairs: &[(&str, f64)]) -> CoverageRulesConfig {
        CoverageRulesConfig {
            fail_on_violation: true,
            entities_rules: pairs
                .iter()
                .map(|(name, ratio)| {
                    (
                        name.to_string(),
                        CoverageRule {
                            min_coverage_ratio: *ratio,
                        },
                    )
                })
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_expected_without_rules_is_unset() {
        let e = expected_percents(None);
        for entity in CoverageEntity::ALL {
            assert_eq!(e.get(entity), None);
        }
    }

    #[test]
    fn test_expected_scales_ratio() {
        let cfg = rules(&[("LINE", 0.5), ("BRANCH", 0.25)]);
        let e = expected_percents(Some(&cfg));
        assert_eq!(e.get(CoverageEntity::Line), Some(50.0));
        assert_eq!(e.get(CoverageEntity::Branch), Some(25.0));
        assert_eq!(e.get(CoverageEntity::Instruction), None);
    }

    #[test]
    fn test_expected_zero_ratio_is_set() {
        let cfg = rules(&[("LINE", 0.0)]);
        assert_eq!(expected_percents(Some(&cfg)).get(CoverageEntity::Line), Some(0.0));
    }

    #[test]
    fn test_expected_out_of_range_kept_verbatim() {
        let cfg = rules(&[("LINE", 1.5), ("METHOD", 0.9)]);
        let e = expected_percents(Some(&cfg));
        assert_eq!(e.get(CoverageEntity::Line), Some(150.0));
    }

    #[test]
    fn test_actual_skips_zero_total() {
        let a = actual_percents(&[measurement("LINE", 0, 0.0), measurement("BRANCH", 4, 75.0)]);
        assert_eq!(a.get(CoverageEntity::Line), None);
        assert_eq!(a.get(CoverageEntity::Branch), Some(75.0));
        assert_eq!(a.get(CoverageEntity::Instruction), None);
    }

    #[test]
    fn test_actual_last_write_wins() {
        let a = actual_percents(&[measurement("LINE", 10, 40.0), measurement("LINE", 10, 60.0)]);
        assert_eq!(a.get(CoverageEntity::Line), Some(60.0));
    }

    #[test]
    fn test_actual_zero_total_does_not_clear_earlier_value() {
        let a = actual_percents(&[measurement("LINE", 10, 40.0), measurement("LINE", 0, 0.0)]);
        assert_eq!(a.get(CoverageEntity::Line), Some(40.0));
    }

    #[test]
    fn test_actual_skips_missing_percents() {
        let mut m = measurement("LINE", 10, 0.0);
        m.percents = None;
        assert_eq!(actual_percents(&[m]).get(CoverageEntity::Line), None);
    }

    #[test]
    fn test_actual_ignores_unknown_entities() {
        let a = actual_percents(&[measurement("METHOD", 3, 100.0)]);
        assert_eq!(a, EntityPercents::default());
    }
}
