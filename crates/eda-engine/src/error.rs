//! Error types for the analysis engine.
//!
//! Every engine surfaces failures through [`InsightError`]. Errors are
//! serializable so a presentation layer can display them without
//! re-deriving the cause.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for an analysis pass.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The dataset has no rows or no columns.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A referenced column does not exist or has the wrong type class.
    #[error("Invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    /// A quality rule could not be evaluated.
    #[error("Quality check '{rule}' failed: {reason}")]
    QualityCheckError { rule: String, reason: String },

    /// The dataset exceeds the configured size ceiling.
    #[error("Dataset too large: {actual} {dimension} exceeds the limit of {limit}")]
    DatasetTooLarge {
        dimension: &'static str,
        actual: usize,
        limit: usize,
    },

    /// Source data could not be loaded into a fully typed dataset.
    #[error("Failed to load dataset: {0}")]
    Load(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The composed report could not be produced or read back.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightError>,
    },
}

impl InsightError {
    /// Shorthand for an [`InsightError::InvalidColumn`].
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        InsightError::InvalidColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`InsightError::QualityCheckError`].
    pub fn quality_check(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        InsightError::QualityCheckError {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::InvalidColumn { .. } => "INVALID_COLUMN",
            Self::QualityCheckError { .. } => "QUALITY_CHECK_ERROR",
            Self::DatasetTooLarge { .. } => "DATASET_TOO_LARGE",
            Self::Load(_) => "LOAD_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
