use std::collections::{HashMap, HashSet};

use crate::analyzers::types::GaugeValue;
use crate::dataset::Row;
use crate::filter::FilteredView;
use crate::labels::clean_label;
use crate::max_scores::MaxScoreTable;

/// One gauge per distinct `(test, skill/passage)` pair in `view`.
///
/// Only the first row of each pair is used; later duplicates are ignored
/// rather than averaged. Tests appear in first-appearance order, and
/// skills in first-appearance order within their test.
pub fn gauge_values(view: &FilteredView<'_>, max_scores: &MaxScoreTable) -> Vec<GaugeValue> {
    let mut test_order: Vec<&str> = Vec::new();
    let mut first_rows: HashMap<&str, Vec<&Row>> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for row in view.iter() {
        if !seen.insert((row.test.as_str(), row.skill_or_passage.as_str())) {
            continue;
        }
        first_rows
            .entry(row.test.as_str())
            .or_insert_with(|| {
                test_order.push(row.test.as_str());
                Vec::new()
            })
            .push(row);
    }

    let mut gauges = Vec::with_capacity(seen.len());
    for test in test_order {
        for row in first_rows.remove(test).unwrap_or_default() {
            gauges.push(GaugeValue {
                test: row.test.clone(),
                skill: row.skill_or_passage.clone(),
                label: clean_label(&row.skill_or_passage),
                percentage: max_scores.percentage(row),
            });
        }
    }
    gauges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::filter::{Selection, apply_filter};

    fn row(test: &str, skill: &str, score: f64) -> Row {
        Row {
            username: "amal".into(),
            test: test.into(),
            skill_or_passage: skill.into(),
            country: "Egypt".into(),
            version: "v1".into(),
            average_score: score,
        }
    }

    fn gauges_for(rows: Vec<Row>) -> Vec<GaugeValue> {
        let ds = Dataset::from_rows(rows);
        let view = apply_filter(&ds, &Selection::default());
        gauge_values(&view, &MaxScoreTable::builtin())
    }

    #[test]
    fn test_percentage_uses_test_maximum() {
        let gauges = gauges_for(vec![
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST I total", "Total", 1200.0),
            row("Mock Exam", "Passage 1", 40.0),
        ]);

        let pct: Vec<f64> = gauges.iter().map(|g| g.percentage).collect();
        assert_eq!(pct, vec![75.0, 75.0, 40.0]);
        assert_eq!(gauges[0].label, "Argument");
        assert_eq!(gauges[0].skill, "A-SK-Argument");
    }

    #[test]
    fn test_first_row_wins_for_duplicates() {
        let gauges = gauges_for(vec![
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST I - Essay", "A-SK-Argument", 2.0),
        ]);

        assert_eq!(gauges.len(), 1);
        assert_eq!(gauges[0].percentage, 75.0);
    }

    #[test]
    fn test_grouped_by_test_in_first_appearance_order() {
        let gauges = gauges_for(vec![
            row("EST II - Physics", "B-Waves", 30.0),
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST II - Physics", "A-Mechanics", 45.0),
            row("EST I - Essay", "B-Argument", 4.0),
        ]);

        let order: Vec<(&str, &str)> = gauges
            .iter()
            .map(|g| (g.test.as_str(), g.skill.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("EST II - Physics", "B-Waves"),
                ("EST II - Physics", "A-Mechanics"),
                ("EST I - Essay", "A-SK-Argument"),
                ("EST I - Essay", "B-Argument"),
            ]
        );
    }

    #[test]
    fn test_same_clean_label_stays_separate_gauges() {
        let gauges = gauges_for(vec![
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST I - Essay", "B-Argument", 4.0),
        ]);

        assert_eq!(gauges.len(), 2);
        assert!(gauges.iter().all(|g| g.label == "Argument"));
    }

    #[test]
    fn test_empty_view_has_no_gauges() {
        assert!(gauges_for(Vec::new()).is_empty());
    }
}
