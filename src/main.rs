//! CLI entry point for the score dashboard.
//!
//! Provides subcommands for rendering a filtered score report and for
//! listing the values each filter dimension can take.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use score_dashboard::{
    analyzers::analyzer::analyze,
    dataset::load_dataset,
    filter::Selection,
    max_scores::MaxScoreTable,
    output::{print_pretty, write_gauges_csv, write_json, write_options, write_text},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "score_dashboard")]
#[command(about = "Per-skill gauges and category averages for student test scores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the score table and print gauges and averages
    Report {
        /// CSV export of the score averages sheet
        #[arg(short, long, env = "SCORE_DATA")]
        data: PathBuf,

        /// Only include this username
        #[arg(short, long)]
        student: Option<String>,

        /// Include these tests (repeatable)
        #[arg(short, long = "test", value_name = "TEST")]
        tests: Vec<String>,

        /// Include these countries (repeatable)
        #[arg(short, long = "country", value_name = "COUNTRY")]
        countries: Vec<String>,

        /// Include these versions (repeatable, "Select All Versions" for every version)
        #[arg(short, long = "version", value_name = "VERSION")]
        versions: Vec<String>,

        /// JSON object of test name to maximum score, applied over the built-in table
        #[arg(short, long, env = "MAX_SCORES_PATH")]
        max_scores: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write gauge values to this CSV file
        #[arg(long)]
        gauges_csv: Option<PathBuf>,
    },
    /// List the students, tests, countries and versions present in the data
    Options {
        /// CSV export of the score averages sheet
        #[arg(short, long, env = "SCORE_DATA")]
        data: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            student,
            tests,
            countries,
            versions,
            max_scores,
            format,
            gauges_csv,
        } => {
            let dataset = load_dataset(&data)
                .with_context(|| format!("failed to load dataset {}", data.display()))?;

            let table = match &max_scores {
                Some(path) => MaxScoreTable::load(path)
                    .with_context(|| format!("failed to load max scores {}", path.display()))?,
                None => MaxScoreTable::builtin(),
            };

            let mut selection = Selection::default()
                .with_tests(tests)
                .with_countries(countries)
                .with_versions(versions);
            if let Some(student) = student {
                selection = selection.with_student(student);
            }

            let report = analyze(&dataset, &selection, &table);
            print_pretty(&report);

            let mut stdout = std::io::stdout().lock();
            match format {
                Format::Text => write_text(&mut stdout, &report)?,
                Format::Json => write_json(&mut stdout, &report)?,
            }

            if let Some(path) = gauges_csv {
                write_gauges_csv(&path, &report.gauges)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), gauges = report.gauges.len(), "Gauge CSV written");
            }

            if !dataset.warnings().is_empty() {
                warn!(
                    skipped = dataset.warnings().len(),
                    "Some rows were skipped while loading"
                );
            }
        }
        Commands::Options { data } => {
            let dataset = load_dataset(&data)
                .with_context(|| format!("failed to load dataset {}", data.display()))?;
            write_options(&mut std::io::stdout().lock(), &dataset)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. The returned guard must outlive all logging.
fn init_tracing() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let path = Path::new(&log_file_path);
            let log_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = path
                .file_name()
                .unwrap_or(OsStr::new("score_dashboard.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON")
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
