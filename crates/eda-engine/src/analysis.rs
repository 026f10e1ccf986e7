//! One complete analysis pass over a dataset.
//!
//! [`Analyzer::run`] drives every engine in order and collects their outputs
//! into an [`AnalysisResult`]. Any engine failure aborts the pass; there are
//! no partial results.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{InsightError, Result, ResultExt};
use crate::frequency::FrequencyAnalyzer;
use crate::missing::MissingValueReporter;
use crate::outliers::OutlierDetector;
use crate::profiler::DataProfiler;
use crate::quality::DataQualityAnalyzer;
use crate::reporting::{ReportGenerator, ReportParams};
use crate::statistics::{StatisticsEngine, correlation_matrix, histogram, pair_correlation};
use crate::types::{
    ColumnProfile, CorrelationMatrix, DatasetOverview, DescriptiveStats, FrequencyTable,
    Histogram, MissingReport, OutlierReport, PairCorrelation, QualityReport,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Marker shown for missing cells in the preview.
const NULL_CELL: &str = "null";

/// The first rows of a dataset, rendered as text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataPreview {
    pub fn from_dataset(dataset: &Dataset, rows: usize) -> Result<Self> {
        let head = Dataset::new(dataset.preview(rows));
        let columns = head.column_names();

        let cells = columns
            .iter()
            .map(|name| head.text_values(name))
            .collect::<Result<Vec<_>>>()?;

        let rows = (0..head.height())
            .map(|row| {
                cells
                    .iter()
                    .map(|col| col[row].clone().unwrap_or_else(|| NULL_CELL.to_string()))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }
}

/// Everything one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overview: DatasetOverview,
    pub preview: DataPreview,
    pub profiles: Vec<ColumnProfile>,
    pub statistics: Vec<DescriptiveStats>,
    /// Absent when the dataset has no categorical column.
    pub frequency: Option<FrequencyTable>,
    pub missing: MissingReport,
    pub duplicate_rows: usize,
    pub quality: QualityReport,
    pub outliers: Vec<OutlierReport>,
    pub histograms: Vec<Histogram>,
    /// Present when at least two numeric columns are selected.
    pub correlation: Option<CorrelationMatrix>,
    pub pair_correlation: Option<PairCorrelation>,
    pub report: String,
}

/// Runs the engines against a dataset with a fixed configuration.
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run the full pass.
    pub fn run(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        self.config.validate()?;
        self.check_size(dataset)?;

        info!(
            "Analyzing dataset: {} rows x {} columns",
            dataset.height(),
            dataset.width()
        );

        info!("Step 1: Inspecting schema...");
        let profiles = DataProfiler::profile_dataset(dataset)?;
        let overview = DataProfiler::overview(dataset, &profiles);
        let preview = DataPreview::from_dataset(dataset, self.config.preview_rows)?;

        info!("Step 2: Computing descriptive statistics...");
        let selected = self.selected_columns(dataset);
        let statistics = StatisticsEngine::describe(dataset, Some(&selected))
            .context("descriptive statistics")?;

        info!("Step 3: Counting categorical frequencies...");
        let frequency = match self.categorical_column(dataset) {
            Some(column) => Some(FrequencyAnalyzer::frequency_table(
                dataset,
                &column,
                self.config.top_n,
            )?),
            None => {
                debug!("No categorical column available for a frequency table");
                None
            }
        };

        info!("Step 4: Reporting missing values...");
        let missing = MissingValueReporter::report(&profiles)?;

        info!("Step 5: Running quality rules...");
        let duplicate_rows = DataQualityAnalyzer::duplicate_row_count(dataset)?;
        let quality =
            QualityReport::from_findings(DataQualityAnalyzer::identify_issues(dataset, &profiles)?);

        info!("Step 6: Detecting outliers...");
        let outliers = self
            .config
            .outlier_columns
            .iter()
            .map(|column| OutlierDetector::detect(dataset, column))
            .collect::<Result<Vec<_>>>()?;

        info!("Step 7: Building distributions...");
        let histograms = selected
            .iter()
            .map(|column| histogram(dataset, column, self.config.histogram_bins))
            .collect::<Result<Vec<_>>>()?;
        let correlation = if selected.len() >= 2 {
            Some(correlation_matrix(dataset, &selected)?)
        } else {
            None
        };
        let pair_correlation = match &self.config.correlation_pair {
            Some((x, y)) => Some(pair_correlation(dataset, x, y)?),
            None => None,
        };

        info!("Step 8: Composing report...");
        let report = ReportGenerator::compose(&ReportParams {
            overview: &overview,
            profiles: &profiles,
            statistics: &statistics,
            missing: &missing,
            quality: &quality,
            duplicate_rows,
            outliers: &outliers,
        });

        info!(
            "Analysis completed: {} quality findings, {} missing cells",
            quality.findings().len(),
            missing.total_missing()
        );

        Ok(AnalysisResult {
            overview,
            preview,
            profiles,
            statistics,
            frequency,
            missing,
            duplicate_rows,
            quality,
            outliers,
            histograms,
            correlation,
            pair_correlation,
            report,
        })
    }

    fn check_size(&self, dataset: &Dataset) -> Result<()> {
        let checks = [
            ("rows", dataset.height(), self.config.max_rows),
            ("columns", dataset.width(), self.config.max_columns),
        ];
        for (dimension, actual, limit) in checks {
            if let Some(limit) = limit
                && actual > limit
            {
                return Err(InsightError::DatasetTooLarge {
                    dimension,
                    actual,
                    limit,
                });
            }
        }
        Ok(())
    }

    fn selected_columns(&self, dataset: &Dataset) -> Vec<String> {
        self.config
            .selected_columns
            .clone()
            .unwrap_or_else(|| dataset.numeric_columns())
    }

    fn categorical_column(&self, dataset: &Dataset) -> Option<String> {
        self.config
            .categorical_column
            .clone()
            .or_else(|| dataset.categorical_columns().into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::parse_statistics_table;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        df![
            "age" => [Some(25.0f64), Some(30.0), None, Some(40.0), Some(200.0)],
            "city" => ["A", "B", "A", "A", "B"],
        ]
        .unwrap()
        .into()
    }

    #[test]
    fn test_run_sample() {
        let config = AnalysisConfig::builder().outlier_column("age").build().unwrap();
        let result = Analyzer::new(config).run(&sample()).unwrap();

        assert_eq!(result.overview.rows, 5);
        assert_eq!(result.profiles[0].missing_count, 1);
        assert_eq!(result.profiles[1].missing_count, 0);
        assert_eq!(result.statistics.len(), 1);
        assert_eq!(result.statistics[0].count, 4);
        assert_eq!(result.outliers[0].anomalies, vec![4]);
        assert_eq!(result.duplicate_rows, 0);
        assert_eq!(result.histograms.len(), 1);
        assert!(result.correlation.is_none());

        let frequency = result.frequency.unwrap();
        assert_eq!(frequency.column, "city");
        assert_eq!(frequency.entries[0].value, "A");
        assert_eq!(frequency.entries[0].percentage, 60.0);
    }

    #[test]
    fn test_preview_marks_nulls() {
        let result = Analyzer::default().run(&sample()).unwrap();
        assert_eq!(result.preview.columns, vec!["age", "city"]);
        assert_eq!(result.preview.rows.len(), 5);
        assert_eq!(result.preview.rows[2], vec!["null", "A"]);
    }

    #[test]
    fn test_report_round_trips_statistics() {
        let result = Analyzer::default().run(&sample()).unwrap();
        let parsed = parse_statistics_table(&result.report).unwrap();
        assert_eq!(parsed.len(), 1);
        let summary = parsed[0].summary.as_ref().unwrap();
        assert_eq!(summary.median, 35.0);
        assert_eq!(summary.p25, 28.75);
    }

    #[test]
    fn test_row_ceiling() {
        let config = AnalysisConfig::builder().max_rows(4).build().unwrap();
        let err = Analyzer::new(config).run(&sample()).unwrap_err();
        assert!(matches!(
            err,
            InsightError::DatasetTooLarge {
                dimension: "rows",
                actual: 5,
                limit: 4
            }
        ));
    }

    #[test]
    fn test_column_ceiling() {
        let config = AnalysisConfig::builder().max_columns(1).build().unwrap();
        let err = Analyzer::new(config).run(&sample()).unwrap_err();
        assert_eq!(err.error_code(), "DATASET_TOO_LARGE");
    }

    #[test]
    fn test_correlation_for_two_selected_columns() {
        let ds: Dataset = df![
            "x" => [1.0f64, 2.0, 3.0],
            "y" => [3.0f64, 2.0, 1.0],
        ]
        .unwrap()
        .into();
        let config = AnalysisConfig::builder()
            .correlation_pair("x", "y")
            .build()
            .unwrap();
        let result = Analyzer::new(config).run(&ds).unwrap();

        let matrix = result.correlation.unwrap();
        assert!((matrix.get("x", "y").unwrap() + 1.0).abs() < 1e-12);
        assert!(result.frequency.is_none());
        assert_eq!(result.pair_correlation.unwrap().observations, 3);
    }

    #[test]
    fn test_selected_text_column_is_invalid() {
        let config = AnalysisConfig::builder()
            .selected_columns(["city"])
            .build()
            .unwrap();
        let err = Analyzer::new(config).run(&sample()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COLUMN");
    }

    #[test]
    fn test_empty_dataset() {
        let err = Analyzer::default()
            .run(&Dataset::new(DataFrame::empty()))
            .unwrap_err();
        assert!(matches!(err, InsightError::EmptyDataset));
    }
}
