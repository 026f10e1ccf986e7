use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeClass {
    /// Integer or floating point values.
    Numeric,
    /// Text labels.
    Categorical,
    /// Anything else (boolean, temporal, nested). Counted like categorical data.
    Other,
}

impl TypeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeClass::Numeric => "numeric",
            TypeClass::Categorical => "categorical",
            TypeClass::Other => "other",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeClass::Numeric)
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Physical storage type, e.g. `Int64` or `String`.
    pub dtype: String,
    pub type_class: TypeClass,
    /// Distinct non-missing values.
    pub unique_count: usize,
    pub missing_count: usize,
    /// Rounded to two decimals.
    pub missing_percentage: f64,
}

/// Shape and type composition of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub other_columns: usize,
}

impl DatasetOverview {
    pub fn from_profiles(rows: usize, profiles: &[ColumnProfile]) -> Self {
        let count = |class: TypeClass| profiles.iter().filter(|p| p.type_class == class).count();
        Self {
            rows,
            columns: profiles.len(),
            numeric_columns: count(TypeClass::Numeric),
            categorical_columns: count(TypeClass::Categorical),
            other_columns: count(TypeClass::Other),
        }
    }
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    /// Absent when `count` is zero.
    pub summary: Option<NumericSummary>,
}

/// Moments and order statistics of a non-empty numeric column.
///
/// `min <= p25 <= median <= p75 <= max` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    /// Sample standard deviation; needs at least two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
    /// Adjusted Fisher-Pearson skewness (G1); needs at least three values.
    pub skewness: Option<f64>,
    /// Bias-corrected excess kurtosis (G2); needs at least four values.
    pub kurtosis: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
    /// Share of all rows, nulls included, rounded to two decimals.
    pub percentage: f64,
}

/// Top-N value counts for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub column: String,
    pub total_rows: usize,
    /// Distinct non-missing values before truncation.
    pub distinct_values: usize,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn is_truncated(&self) -> bool {
        self.entries.len() < self.distinct_values
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Result of the missing-value scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MissingReport {
    /// The scan ran and found no missing cells.
    NoMissingValues,
    /// Columns with at least one missing cell, most missing first.
    Missing {
        total_missing: usize,
        columns: Vec<MissingColumn>,
    },
}

impl MissingReport {
    pub fn total_missing(&self) -> usize {
        match self {
            MissingReport::NoMissingValues => 0,
            MissingReport::Missing { total_missing, .. } => *total_missing,
        }
    }

    pub fn columns(&self) -> &[MissingColumn] {
        match self {
            MissingReport::NoMissingValues => &[],
            MissingReport::Missing { columns, .. } => columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// The quality rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRule {
    DuplicateRows,
    InfiniteValues,
    ConstantColumn,
    ExcessiveMissingness,
}

impl QualityRule {
    pub const ALL: [QualityRule; 4] = [
        QualityRule::DuplicateRows,
        QualityRule::InfiniteValues,
        QualityRule::ConstantColumn,
        QualityRule::ExcessiveMissingness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityRule::DuplicateRows => "duplicate_rows",
            QualityRule::InfiniteValues => "infinite_values",
            QualityRule::ConstantColumn => "constant_column",
            QualityRule::ExcessiveMissingness => "excessive_missingness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFinding {
    pub rule: QualityRule,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// Outcome of the quality rule battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "findings", rename_all = "snake_case")]
pub enum QualityReport {
    /// Every rule ran and none fired.
    Clean,
    Issues(Vec<QualityFinding>),
}

impl QualityReport {
    pub fn from_findings(findings: Vec<QualityFinding>) -> Self {
        if findings.is_empty() {
            QualityReport::Clean
        } else {
            QualityReport::Issues(findings)
        }
    }

    pub fn findings(&self) -> &[QualityFinding] {
        match self {
            QualityReport::Clean => &[],
            QualityReport::Issues(findings) => findings,
        }
    }
}

/// IQR outlier scan of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Row indices whose value lies strictly outside the bounds.
    pub anomalies: Vec<usize>,
    /// Anomalies as a percentage of all rows.
    pub anomaly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of the finite values in a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

/// Pearson correlations between numeric columns.
///
/// `coefficients[i][j]` pairs `columns[i]` with `columns[j]`; undefined
/// coefficients are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub coefficients: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.coefficients[i][j]
    }
}

/// Pearson correlation of one column pair, as drawn in a scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCorrelation {
    pub x: String,
    pub y: String,
    /// Rows where both values are present and finite.
    pub observations: usize,
    pub coefficient: Option<f64>,
}
