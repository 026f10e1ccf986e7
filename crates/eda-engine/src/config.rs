//! Configuration for an analysis pass.
//!
//! Every selection the presentation layer makes (which numeric columns to
//! describe, which categorical column to break down, which columns to scan
//! for outliers) travels in an explicit [`AnalysisConfig`] rather than in
//! ambient state.

use serde::{Deserialize, Serialize};

/// Default number of categories kept in a frequency table.
pub const DEFAULT_TOP_N: usize = 15;

/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Default number of rows shown in the data preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for one analysis pass.
///
/// Use [`AnalysisConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use eda_engine::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .selected_columns(["age", "income"])
///     .categorical_column("city")
///     .top_n(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Numeric columns to describe and chart.
    /// None means every numeric column.
    pub selected_columns: Option<Vec<String>>,

    /// Categorical column for the frequency breakdown.
    /// None means the first categorical column in schema order.
    pub categorical_column: Option<String>,

    /// Numeric column pair for the scatter correlation (x axis, y axis).
    /// Default: None
    pub correlation_pair: Option<(String, String)>,

    /// Numeric columns scanned by the outlier detector.
    /// Default: none (the detector runs on demand)
    pub outlier_columns: Vec<String>,

    /// Maximum number of categories in a frequency table.
    /// Default: 15
    pub top_n: usize,

    /// Number of equal-width histogram bins.
    /// Default: 20
    pub histogram_bins: usize,

    /// Number of rows in the data preview.
    /// Default: 5
    pub preview_rows: usize,

    /// Reject datasets with more rows than this.
    /// Default: None (no limit)
    pub max_rows: Option<usize>,

    /// Reject datasets with more columns than this.
    /// Default: None (no limit)
    pub max_columns: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            selected_columns: None,
            categorical_column: None,
            correlation_pair: None,
            outlier_columns: Vec::new(),
            top_n: DEFAULT_TOP_N,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_rows: None,
            max_columns: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::ZeroValue("top_n"));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroValue("histogram_bins"));
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::ZeroValue("preview_rows"));
        }

        if self.max_rows == Some(0) {
            return Err(ConfigValidationError::ZeroValue("max_rows"));
        }

        if self.max_columns == Some(0) {
            return Err(ConfigValidationError::ZeroValue("max_columns"));
        }

        if let Some(selected) = &self.selected_columns
            && selected.is_empty()
        {
            return Err(ConfigValidationError::EmptySelection);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroValue(&'static str),

    #[error("Selected columns must not be empty (omit the selection to use every numeric column)")]
    EmptySelection,
}

impl From<ConfigValidationError> for crate::error::InsightError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InsightError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    selected_columns: Option<Vec<String>>,
    categorical_column: Option<String>,
    correlation_pair: Option<(String, String)>,
    outlier_columns: Vec<String>,
    top_n: Option<usize>,
    histogram_bins: Option<usize>,
    preview_rows: Option<usize>,
    max_rows: Option<usize>,
    max_columns: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Restrict statistics and charts to these numeric columns.
    pub fn selected_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the categorical column for the frequency breakdown.
    pub fn categorical_column(mut self, column: impl Into<String>) -> Self {
        self.categorical_column = Some(column.into());
        self
    }

    /// Set the numeric column pair for the scatter correlation.
    pub fn correlation_pair(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.correlation_pair = Some((x.into(), y.into()));
        self
    }

    /// Add a numeric column to scan for outliers.
    pub fn outlier_column(mut self, column: impl Into<String>) -> Self {
        self.outlier_columns.push(column.into());
        self
    }

    /// Set the maximum number of categories in a frequency table.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Reject datasets with more rows than `limit`.
    pub fn max_rows(mut self, limit: usize) -> Self {
        self.max_rows = Some(limit);
        self
    }

    /// Reject datasets with more columns than `limit`.
    pub fn max_columns(mut self, limit: usize) -> Self {
        self.max_columns = Some(limit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            selected_columns: self.selected_columns,
            categorical_column: self.categorical_column,
            correlation_pair: self.correlation_pair,
            outlier_columns: self.outlier_columns,
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            histogram_bins: self.histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS),
            preview_rows: self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
            max_rows: self.max_rows,
            max_columns: self.max_columns,
        };

        config.validate()?;
        Ok(config)
    }
}
