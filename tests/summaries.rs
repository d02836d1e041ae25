use deltacov::badge;
use deltacov::model::ViewSummary;
use deltacov::summaries::{self, Mode};

fn summary_json(view: &str, line_percents: f64) -> String {
    format!(
        r#"{{
            "view": "{view}",
            "verifications": [],
            "coverageRulesConfig": {{"failOnViolation": false, "entitiesRules": {{}}}},
            "coverageInfo": [
                {{"coverageEntity": "INSTRUCTION", "total": 40, "percents": 50.0}},
                {{"coverageEntity": "LINE", "total": 10, "percents": {line_percents}}}
            ]
        }}"#
    )
}

#[test]
fn delta_mode_skips_full_coverage_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("test-summary.json"), summary_json("test", 60.0)).unwrap();
    std::fs::write(dir.path().join("aggregated-summary.json"), summary_json("aggregated", 70.0)).unwrap();
    std::fs::write(
        dir.path().join("full-coverage-aggregated-summary.json"),
        summary_json("full", 80.0),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let delta = summaries::read_summaries(dir.path(), Mode::Delta).unwrap();
    let views: Vec<_> = delta.iter().map(|s| s.view.as_str()).collect();
    assert_eq!(views, ["aggregated", "test"]);

    let full = summaries::read_summaries(dir.path(), Mode::Full).unwrap();
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].view, "full");
}

#[test]
fn aggregate_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a-summary.json"), summary_json("a", 12.5)).unwrap();

    let views = summaries::read_summaries(dir.path(), Mode::Delta).unwrap();
    let path = summaries::write_summaries(dir.path(), Mode::Delta, &views).unwrap();
    assert!(path.ends_with("delta-cov-summaries.json"));

    let loaded = summaries::load_summaries(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].line_percents(), Some(12.5));
}

#[test]
fn malformed_summary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad-summary.json"), "{").unwrap();
    assert!(summaries::read_summaries(dir.path(), Mode::Delta).is_err());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(summaries::read_summaries(&dir.path().join("nope"), Mode::Delta).is_err());
}

#[test]
fn badges_written_per_view_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let views: Vec<ViewSummary> = vec![
        serde_json::from_str(&summary_json("test", 61.0)).unwrap(),
        serde_json::from_str(&summary_json("aggregated", 72.0)).unwrap(),
    ];
    let out_dir = dir.path().join("badges");

    let written = badge::write_badges(&out_dir, &views).unwrap();
    let names: Vec<_> = written.iter().map(|(v, _)| v.as_str()).collect();
    assert_eq!(names, ["aggregated", "test"]);

    let svg = std::fs::read_to_string(out_dir.join("aggregated.svg")).unwrap();
    assert!(svg.contains("aggregated: 72%"));
    assert!(svg.contains("#ea00ff"));
    let svg = std::fs::read_to_string(out_dir.join("test.svg")).unwrap();
    assert!(svg.contains("test: 61%"));
    assert!(svg.contains("#00ff0d"));
}
