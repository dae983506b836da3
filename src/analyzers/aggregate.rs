use crate::analyzers::types::CategoryAverages;
use crate::analyzers::utility::LabelTotal;
use crate::filter::FilteredView;
use crate::labels::{Category, clean_label};
use crate::max_scores::MaxScoreTable;
use std::collections::{BTreeMap, HashMap};

/// Averages every row's percentage score by cleaned label.
///
/// Unlike [`gauge_values`](crate::analyzers::gauge::gauge_values), every
/// row contributes. Rows are normalized to a percentage of their own
/// test's maximum first, then averaged uniformly, so the result is a mean
/// of percentages rather than a score-weighted mean.
pub fn category_averages(view: &FilteredView<'_>, max_scores: &MaxScoreTable) -> CategoryAverages {
    let mut skill_totals: HashMap<String, LabelTotal> = HashMap::new();
    let mut non_skill_totals: HashMap<String, LabelTotal> = HashMap::new();

    for row in view.iter() {
        let percentage = max_scores.percentage(row);
        let label = clean_label(&row.skill_or_passage);

        let totals = match Category::of(&row.skill_or_passage) {
            Category::Skill => &mut skill_totals,
            Category::NonSkill => &mut non_skill_totals,
        };
        totals.entry(label).or_default().push(percentage);
    }

    CategoryAverages {
        skill: finish(skill_totals),
        non_skill: finish(non_skill_totals),
    }
}

fn finish(totals: HashMap<String, LabelTotal>) -> BTreeMap<String, f64> {
    totals
        .into_iter()
        .map(|(label, total)| (label, total.average()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Row};
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

    fn averages_for(rows: Vec<Row>) -> CategoryAverages {
        let ds = Dataset::from_rows(rows);
        let view = apply_filter(&ds, &Selection::default());
        category_averages(&view, &MaxScoreTable::builtin())
    }

    #[test]
    fn test_essay_argument_split_by_category() {
        let avg = averages_for(vec![
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST I - Essay", "B-Argument", 4.0),
        ]);

        assert_eq!(avg.skill, BTreeMap::from([("Argument".to_string(), 75.0)]));
        assert_eq!(avg.non_skill, BTreeMap::from([("Argument".to_string(), 50.0)]));
    }

    #[test]
    fn test_every_row_contributes() {
        let avg = averages_for(vec![
            row("EST I - Essay", "A-SK-Argument", 6.0),
            row("EST I - Essay", "A-SK-Argument", 2.0),
        ]);

        assert_eq!(avg.get(Category::Skill, "Argument"), Some(50.0));
    }

    #[test]
    fn test_mean_of_percentages_across_tests() {
        // 75% of 8 and 25% of 100 average to 50%, not (6+25)/(8+100).
        let avg = averages_for(vec![
            row("EST I - Essay", "A-SK-Grammar", 6.0),
            row("Mock Exam", "B-SK-Grammar", 25.0),
        ]);

        assert_eq!(avg.get(Category::Skill, "Grammar"), Some(50.0));
        assert!(avg.non_skill.is_empty());
    }

    #[test]
    fn test_percentages_not_clamped() {
        let avg = averages_for(vec![row("EST I - Essay", "Essay", 12.0)]);

        assert_eq!(avg.get(Category::NonSkill, "Essay"), Some(150.0));
    }

    #[test]
    fn test_values_are_non_negative() {
        let avg = averages_for(vec![
            row("EST II - Physics", "A-SK-Mechanics", 0.0),
            row("EST II - Physics", "C-Passage 3", 30.0),
        ]);

        assert!(avg.skill.values().chain(avg.non_skill.values()).all(|v| *v >= 0.0));
    }

    #[test]
    fn test_empty_view_gives_empty_maps() {
        let avg = averages_for(Vec::new());

        assert!(avg.is_empty());
        assert_eq!(avg, CategoryAverages::default());
    }
}
