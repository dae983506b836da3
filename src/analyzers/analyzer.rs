use crate::analyzers::aggregate::category_averages;
use crate::analyzers::gauge::gauge_values;
use crate::analyzers::types::Report;
use crate::dataset::Dataset;
use crate::filter::{Selection, apply_filter};
use crate::max_scores::MaxScoreTable;
use chrono::Utc;
use tracing::{debug, info};

/// Filters `dataset` by `selection` and computes gauges and category
/// averages for the rows that remain.
///
/// Recomputed from scratch on every call.
#[tracing::instrument(skip_all, fields(student = ?selection.student))]
pub fn analyze(dataset: &Dataset, selection: &Selection, max_scores: &MaxScoreTable) -> Report {
    let view = apply_filter(dataset, selection);
    if view.is_empty() {
        info!("Selection matched no rows");
    }

    let gauges = gauge_values(&view, max_scores);
    let averages = category_averages(&view, max_scores);

    debug!(
        rows = view.len(),
        gauges = gauges.len(),
        skill_labels = averages.skill.len(),
        non_skill_labels = averages.non_skill.len(),
        "Report computed"
    );

    Report {
        generated_at: Utc::now(),
        selection: selection.clone(),
        rows_considered: view.len(),
        gauges,
        averages,
    }
}
