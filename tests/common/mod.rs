use deltacov::model::{CheckRun, CoverageMeasurement, CoverageRule, CoverageRulesConfig};

/// Build a check run from `(entity, ratio)` rules and
/// `(entity, total, percents)` measurements.
pub fn check_run(
    name: &str,
    fail_on_violation: bool,
    rules: &[(&str, f64)],
    info: &[(&str, u64, f64)],
) -> CheckRun {
    CheckRun {
        view_name: name.to_string(),
        review_url: format!("https://github.com/o/r/runs/{name}"),
        coverage_rules: Some(CoverageRulesConfig {
            fail_on_violation,
            entities_rules: rules
                .iter()
                .map(|(entity, ratio)| {
                    (
                        entity.to_string(),
                        CoverageRule {
                            min_coverage_ratio: *ratio,
                        },
                    )
                })
                .collect(),
        }),
        coverage_info: info
            .iter()
            .map(|(entity, total, percents)| CoverageMeasurement {
                coverage_entity: entity.to_string(),
                total: *total,
                percents: Some(*percents),
            })
            .collect(),
        verifications: vec![],
        conclusion: None,
    }
}

/// The `<tr>` blocks of a rendered report, header excluded.
pub fn data_rows(report: &str) -> Vec<&str> {
    report
        .split("<tr>\n")
        .skip(1)
        .map(|r| r.split("</tr>").next().unwrap_or(""))
        .collect()
}
