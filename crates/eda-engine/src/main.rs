//! CLI entry point for the exploratory data analysis engine.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use eda_engine::{AnalysisConfig, AnalysisResult, AnalysisView, Analyzer, Dataset, ReportGenerator};
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI-compatible view enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliView {
    /// First rows of the dataset
    Preview,
    /// Shape, type composition and column metadata
    Overview,
    /// Descriptive statistics, histograms, outliers and correlations
    Numeric,
    /// Value frequencies of the categorical column
    Categorical,
    /// Missing-value report
    Missing,
    /// Duplicate rows and quality findings
    Quality,
    /// The composed text report
    Export,
}

impl From<CliView> for AnalysisView {
    fn from(cli: CliView) -> Self {
        match cli {
            CliView::Preview => AnalysisView::Preview,
            CliView::Overview => AnalysisView::Overview,
            CliView::Numeric => AnalysisView::Numeric,
            CliView::Categorical => AnalysisView::Categorical,
            CliView::Missing => AnalysisView::Missing,
            CliView::Quality => AnalysisView::Quality,
            CliView::Export => AnalysisView::Export,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis for tabular datasets",
    long_about = "Profiles a CSV dataset and reports statistics, frequencies, \
                  missing values, quality issues and outliers.\n\n\
                  EXAMPLES:\n  \
                  # Every view\n  \
                  eda-engine -i data.csv\n\n  \
                  # Selected views and columns\n  \
                  eda-engine -i data.csv --view numeric --view quality --columns age,income\n\n  \
                  # Outlier scan and CSV exports\n  \
                  eda-engine -i data.csv --outliers age --export outputs/\n\n  \
                  # Machine-readable result\n  \
                  eda-engine -i data.csv --json"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Views to render (default: all)
    #[arg(long, value_enum)]
    view: Vec<CliView>,

    /// Numeric columns to describe and chart (default: every numeric column)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Categorical column for the frequency table
    ///
    /// If not specified, the first categorical column is used
    #[arg(long)]
    category: Option<String>,

    /// Numeric columns to scan for outliers with the IQR rule
    #[arg(long, num_args = 1..)]
    outliers: Vec<String>,

    /// Column pair for the scatter correlation
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    correlate: Option<Vec<String>>,

    /// Maximum number of values in the frequency table
    #[arg(long, default_value = "15")]
    top_n: usize,

    /// Number of histogram bins
    #[arg(long, default_value = "20")]
    bins: usize,

    /// Number of rows in the data preview
    #[arg(long, default_value = "5")]
    preview_rows: usize,

    /// Reject datasets with more rows than this
    #[arg(long)]
    max_rows: Option<usize>,

    /// Reject datasets with more columns than this
    #[arg(long)]
    max_columns: Option<usize>,

    /// Write the report and CSV exports into this directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// Output JSON to stdout instead of rendered views
    ///
    /// Disables all logs; only outputs the analysis result.
    /// Useful for piping to other tools: `... --json | jq .quality`
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and results)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder()
        .top_n(args.top_n)
        .histogram_bins(args.bins)
        .preview_rows(args.preview_rows);

    if let Some(ref columns) = args.columns {
        builder = builder.selected_columns(columns.iter().cloned());
    }

    if let Some(ref category) = args.category {
        builder = builder.categorical_column(category);
    }

    for column in &args.outliers {
        builder = builder.outlier_column(column);
    }

    if let Some([x, y]) = args.correlate.as_deref() {
        builder = builder.correlation_pair(x, y);
    }

    if let Some(limit) = args.max_rows {
        builder = builder.max_rows(limit);
    }

    if let Some(limit) = args.max_columns {
        builder = builder.max_columns(limit);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (disabled if --json is set)
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;

    info!("Loading dataset from: {}", args.input);
    let dataset = Dataset::from_csv_path(&args.input)?;

    let result = Analyzer::new(config).run(&dataset)?;

    if let Some(ref dir) = args.export {
        write_exports(dir, &args.input, &result)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let views: Vec<AnalysisView> = if args.view.is_empty() {
        AnalysisView::ALL.to_vec()
    } else {
        args.view.iter().map(|&v| v.into()).collect()
    };

    for view in views {
        println!("{}", view.render(&result));
    }

    Ok(())
}

/// Write the text report and both CSV tables into `dir`.
fn write_exports(dir: &Path, input: &str, result: &AnalysisResult) -> Result<()> {
    let generator = ReportGenerator::new(dir.to_path_buf());
    let report_path = generator.write_report(&result.report, &extract_file_stem(input))?;
    let csv_paths = generator.write_exports(&result.statistics, &result.profiles)?;

    info!("Report written to: {}", report_path.display());
    for path in csv_paths {
        info!("Table written to: {}", path.display());
    }
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
