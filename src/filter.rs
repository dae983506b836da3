//! Row selection by student, test, country and version.
//!
//! Criteria combine with AND across dimensions and membership within a
//! dimension. An empty criterion places no constraint on its dimension.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::dataset::{Dataset, Row};

/// Version marker meaning "every version present in the dataset".
pub const SELECT_ALL_VERSIONS: &str = "Select All Versions";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub student: Option<String>,
    pub tests: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub versions: BTreeSet<String>,
}

impl Selection {
    pub fn with_student(mut self, student: impl Into<String>) -> Self {
        self.student = Some(student.into());
        self
    }

    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tests.extend(tests.into_iter().map(Into::into));
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    pub fn with_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions.extend(versions.into_iter().map(Into::into));
        self
    }

    /// Replaces the [`SELECT_ALL_VERSIONS`] marker with `available`.
    pub fn resolve_versions<'a>(&self, available: impl IntoIterator<Item = &'a str>) -> Self {
        let mut resolved = self.clone();
        if resolved.versions.contains(SELECT_ALL_VERSIONS) {
            resolved.versions = available.into_iter().map(str::to_string).collect();
        }
        resolved
    }

    /// Whether `row` satisfies every non-empty criterion.
    ///
    /// The select-all marker is not interpreted here; see
    /// [`Selection::resolve_versions`].
    pub fn matches(&self, row: &Row) -> bool {
        let student_ok = match self.student.as_deref() {
            Some(student) if !student.is_empty() => row.username == student,
            _ => true,
        };

        student_ok
            && (self.tests.is_empty() || self.tests.contains(row.test.as_str()))
            && (self.countries.is_empty() || self.countries.contains(row.country.as_str()))
            && (self.versions.is_empty() || self.versions.contains(row.version.as_str()))
    }
}

/// Subset of dataset rows that passed a [`Selection`], in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Row>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies `selection` again on top of this view.
    pub fn refine(&self, selection: &Selection) -> FilteredView<'a> {
        let mut seen = BTreeSet::new();
        let versions = self
            .rows
            .iter()
            .map(|r| r.version.as_str())
            .filter(|v| seen.insert(*v));
        let resolved = selection.resolve_versions(versions);

        FilteredView {
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|r| resolved.matches(r))
                .collect(),
        }
    }
}

/// Filters `dataset` by `selection`.
pub fn apply_filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    let resolved = selection.resolve_versions(dataset.versions());
    let rows: Vec<&Row> = dataset
        .rows()
        .iter()
        .filter(|r| resolved.matches(r))
        .collect();

    debug!(
        total = dataset.len(),
        kept = rows.len(),
        "Applied selection"
    );
    FilteredView { rows }
}
