//! Exploratory Data Analysis Engine
//!
//! Inspects an arbitrary tabular dataset and produces structured,
//! deterministic findings, built with Rust and Polars.
//!
//! # Overview
//!
//! - **Schema Inspection**: type class, uniqueness and missingness per column
//! - **Descriptive Statistics**: moments and quartiles of numeric columns
//! - **Frequency Tables**: top-N value counts of categorical columns
//! - **Missing-Value Report**: per-column missing counts, or an explicit clean state
//! - **Quality Rules**: duplicate rows, infinite values, constant columns, sparse columns
//! - **Outlier Detection**: Tukey's IQR rule on demand
//! - **Reports**: a plain-text summary with a machine-readable statistics table
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_engine::{AnalysisConfig, AnalysisView, Analyzer, Dataset};
//!
//! let dataset = Dataset::from_csv_path("data.csv")?;
//!
//! let config = AnalysisConfig::builder()
//!     .categorical_column("city")
//!     .outlier_column("age")
//!     .top_n(10)
//!     .build()?;
//!
//! let result = Analyzer::new(config).run(&dataset)?;
//!
//! println!("{}", AnalysisView::Quality.render(&result));
//! println!("{}", result.report);
//! ```
//!
//! # Individual Engines
//!
//! Every engine can also be called on its own:
//!
//! ```rust,ignore
//! use eda_engine::{DataProfiler, FrequencyAnalyzer, OutlierDetector, StatisticsEngine};
//!
//! let profiles = DataProfiler::profile_dataset(&dataset)?;
//! let stats = StatisticsEngine::describe(&dataset, None)?;
//! let cities = FrequencyAnalyzer::frequency_table(&dataset, "city", 15)?;
//! let outliers = OutlierDetector::detect(&dataset, "age")?;
//! ```
//!
//! # Errors
//!
//! All engines return [`InsightError`]. Failures abort the call; no engine
//! returns partial results.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod missing;
pub mod outliers;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod statistics;
pub mod types;
pub mod utils;
pub mod views;

// Re-exports for convenient access
pub use analysis::{AnalysisResult, Analyzer, DataPreview};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use dataset::Dataset;
pub use error::{InsightError, Result as InsightResult, ResultExt};
pub use frequency::FrequencyAnalyzer;
pub use missing::MissingValueReporter;
pub use outliers::{IQR_MULTIPLIER, OutlierDetector};
pub use profiler::DataProfiler;
pub use quality::{DataQualityAnalyzer, MISSINGNESS_THRESHOLD};
pub use reporting::{
    ReportGenerator, ReportParams, export_column_metadata_csv, export_statistics_csv,
    parse_statistics_table,
};
pub use statistics::{StatisticsEngine, correlation_matrix, histogram, pair_correlation};
pub use types::{
    ColumnProfile, CorrelationMatrix, DatasetOverview, DescriptiveStats, FrequencyEntry,
    FrequencyTable, Histogram, HistogramBin, MissingColumn, MissingReport, NumericSummary,
    OutlierReport, PairCorrelation, QualityFinding, QualityReport, QualityRule, Severity,
    TypeClass,
};
pub use views::AnalysisView;
