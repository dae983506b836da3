//! Output formatting and persistence for score reports.
//!
//! Supports a plain-text dashboard with ASCII gauges, JSON serialization,
//! and CSV export of gauge values.

use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{GaugeValue, Report};
use crate::dataset::Dataset;
use crate::filter::SELECT_ALL_VERSIONS;
use crate::labels::{DEFAULT_WRAP_WIDTH, wrap_label};

const GAUGE_CELLS: usize = 20;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Renders a fixed-width bar for a percentage. The bar is full at 100%
/// and above; the number next to it is not clamped.
pub fn gauge_bar(percentage: f64) -> String {
    let filled = (percentage.clamp(0.0, 100.0) / 100.0 * GAUGE_CELLS as f64).round() as usize;
    format!(
        "[{}{}] {:6.1}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_CELLS - filled),
        percentage
    )
}

/// Writes the text dashboard: gauges grouped by test, then the skill
/// and non-skill averages.
pub fn write_text<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    writeln!(out, "Student Performance Dashboard")?;
    writeln!(out, "Rows considered: {}", report.rows_considered)?;
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "No data for the current selection.")?;
        return Ok(());
    }

    writeln!(out, "Skill Performance Gauges")?;
    for (test, gauges) in report.gauges_by_test() {
        writeln!(out)?;
        writeln!(out, "== {test} ==")?;
        for gauge in gauges {
            for line in wrap_label(&gauge.skill, DEFAULT_WRAP_WIDTH) {
                writeln!(out, "  {line}")?;
            }
            writeln!(out, "    {}", gauge_bar(gauge.percentage))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total Averages")?;
    writeln!(out)?;
    writeln!(out, "Skill Averages")?;
    for (label, avg) in &report.averages.skill {
        writeln!(out, "Skill: {label} - Average: {avg:.2}%")?;
    }
    writeln!(out)?;
    writeln!(out, "Non-Skill Averages")?;
    for (label, avg) in &report.averages.non_skill {
        writeln!(out, "Non-Skill: {label} - Average: {avg:.2}%")?;
    }

    Ok(())
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes the values each selection dimension can take.
///
/// Versions are preceded by the select-all marker.
pub fn write_options<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
    let mut versions = vec![SELECT_ALL_VERSIONS];
    versions.extend(dataset.versions());

    for (title, values) in [
        ("Usernames", dataset.usernames()),
        ("Tests", dataset.tests()),
        ("Countries", dataset.countries()),
        ("Versions", versions),
    ] {
        writeln!(out, "{title}:")?;
        for value in values {
            writeln!(out, "  {value}")?;
        }
    }
    Ok(())
}

/// Writes gauge values to a CSV file, replacing any existing file.
pub fn write_gauges_csv(path: &Path, gauges: &[GaugeValue]) -> Result<()> {
    debug!(path = %path.display(), rows = gauges.len(), "Writing gauge CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for gauge in gauges {
        writer.serialize(gauge)?;
    }
    writer.flush()?;

    Ok(())
}
