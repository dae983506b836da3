//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::filter::Selection;
use crate::labels::Category;

/// Percentage score for one skill/passage of one test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeValue {
    pub test: String,
    /// Raw `Skill/Passage` value.
    pub skill: String,
    /// Cleaned label, used as the gauge title.
    pub label: String,
    pub percentage: f64,
}

/// Mean percentage per cleaned label, split by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAverages {
    pub skill: BTreeMap<String, f64>,
    pub non_skill: BTreeMap<String, f64>,
}

impl CategoryAverages {
    pub fn get(&self, category: Category, label: &str) -> Option<f64> {
        match category {
            Category::Skill => self.skill.get(label).copied(),
            Category::NonSkill => self.non_skill.get(label).copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skill.is_empty() && self.non_skill.is_empty()
    }
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub selection: Selection,
    pub rows_considered: usize,
    pub gauges: Vec<GaugeValue>,
    pub averages: CategoryAverages,
}

impl Report {
    /// Gauges grouped under their test, keeping gauge order.
    pub fn gauges_by_test(&self) -> Vec<(&str, Vec<&GaugeValue>)> {
        let mut groups: Vec<(&str, Vec<&GaugeValue>)> = Vec::new();
        for gauge in &self.gauges {
            match groups.iter_mut().find(|(test, _)| *test == gauge.test) {
                Some((_, members)) => members.push(gauge),
                None => groups.push((gauge.test.as_str(), vec![gauge])),
            }
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.rows_considered == 0
    }
}
