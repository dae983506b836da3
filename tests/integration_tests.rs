use score_dashboard::analyzers::analyzer::analyze;
use score_dashboard::dataset::load_dataset;
use score_dashboard::error::RowValidationError;
use score_dashboard::filter::{SELECT_ALL_VERSIONS, Selection};
use score_dashboard::labels::Category;
use score_dashboard::max_scores::MaxScoreTable;
use score_dashboard::output::write_text;
use std::path::Path;

fn fixture() -> score_dashboard::dataset::Dataset {
    load_dataset(Path::new("tests/fixtures/overall_averages.csv")).expect("Failed to load fixture")
}

#[test]
fn test_load_skips_bad_rows() {
    let ds = fixture();

    assert_eq!(ds.len(), 10);
    assert_eq!(ds.warnings().len(), 2);
    assert!(matches!(
        ds.warnings()[0],
        RowValidationError::Unparseable { line: 10, .. }
    ));
    assert_eq!(
        ds.warnings()[1],
        RowValidationError::MissingValue {
            line: 13,
            column: "Username"
        }
    );
}

#[test]
fn test_full_pipeline_for_one_student() {
    let ds = fixture();
    let report = analyze(
        &ds,
        &Selection::default().with_student("amal.h"),
        &MaxScoreTable::builtin(),
    );

    assert_eq!(report.rows_considered, 5);
    let tests: Vec<&str> = report.gauges_by_test().iter().map(|(t, _)| *t).collect();
    assert_eq!(tests, vec!["EST I - Essay", "EST I - Literacy", "EST I total"]);

    assert_eq!(report.averages.get(Category::Skill, "Argument"), Some(75.0));
    assert_eq!(report.averages.get(Category::NonSkill, "Argument"), Some(50.0));
    assert_eq!(report.averages.get(Category::Skill, "Main Idea"), Some(75.0));
    assert_eq!(report.averages.get(Category::NonSkill, "Passage 2"), Some(50.0));
    assert_eq!(report.averages.get(Category::NonSkill, "Total"), Some(75.0));
}

#[test]
fn test_averages_span_tests_and_students() {
    let ds = fixture();
    let report = analyze(
        &ds,
        &Selection::default().with_versions([SELECT_ALL_VERSIONS]),
        &MaxScoreTable::builtin(),
    );

    // Essay 75% and 25%, Mock Exam 50% (default maximum of 100).
    assert_eq!(report.averages.get(Category::Skill, "Argument"), Some(50.0));
    // Physics 80% and 40%.
    assert_eq!(report.averages.get(Category::Skill, "Mechanics"), Some(60.0));
    assert_eq!(report.rows_considered, ds.len());
}

#[test]
fn test_country_and_version_filters() {
    let ds = fixture();
    let report = analyze(
        &ds,
        &Selection::default()
            .with_countries(["Egypt"])
            .with_versions(["V3"]),
        &MaxScoreTable::builtin(),
    );

    assert_eq!(report.rows_considered, 2);
    let physics = &report.gauges[0];
    assert_eq!(physics.test, "EST II - Physics");
    assert_eq!(physics.label, "Mechanics");
    assert_eq!(physics.percentage, 40.0);
}

#[test]
fn test_text_output_for_empty_selection() {
    let ds = fixture();
    let report = analyze(
        &ds,
        &Selection::default().with_tests(["EST II - Biology"]),
        &MaxScoreTable::builtin(),
    );

    let mut buf = Vec::new();
    write_text(&mut buf, &report).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(report.gauges.is_empty());
    assert!(report.averages.is_empty());
    assert!(text.contains("No data for the current selection."));
}
