//! Descriptive statistics for numeric columns.
//!
//! Conventions:
//! - quantiles use linear interpolation between order statistics,
//! - the standard deviation is the sample (n - 1) deviation,
//! - skewness is the adjusted Fisher-Pearson coefficient G1,
//! - kurtosis is the bias-corrected excess kurtosis G2.
//!
//! Missing cells (nulls and NaN) are excluded from every statistic.

mod distribution;
pub(crate) mod moments;

pub use distribution::{correlation_matrix, histogram, pair_correlation};

use crate::dataset::Dataset;
use crate::error::{InsightError, Result};
use crate::types::{DescriptiveStats, NumericSummary};
use tracing::debug;

/// Descriptive statistics engine.
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Describe the requested numeric columns, or every numeric column when
    /// `columns` is None.
    ///
    /// A requested column that is missing or not numeric fails with
    /// [`InsightError::InvalidColumn`].
    pub fn describe(dataset: &Dataset, columns: Option<&[String]>) -> Result<Vec<DescriptiveStats>> {
        dataset.ensure_not_empty()?;

        let targets = match columns {
            Some(cols) => cols.to_vec(),
            None => dataset.numeric_columns(),
        };

        let stats = targets
            .iter()
            .map(|name| Self::describe_column(dataset, name))
            .collect::<Result<Vec<_>>>()?;

        debug!("Computed descriptive statistics for {} columns", stats.len());
        Ok(stats)
    }

    /// Describe a single numeric column.
    pub fn describe_column(dataset: &Dataset, name: &str) -> Result<DescriptiveStats> {
        let values = present_values(dataset, name)?;
        Ok(DescriptiveStats {
            column: name.to_string(),
            count: values.len(),
            summary: summarize(&values),
        })
    }
}

/// Non-missing values of a numeric column.
pub(crate) fn present_values(dataset: &Dataset, name: &str) -> Result<Vec<f64>> {
    Ok(dataset.numeric_values(name)?.into_iter().flatten().collect())
}

/// Summary of a sample, None when it is empty.
pub(crate) fn summarize(values: &[f64]) -> Option<NumericSummary> {
    let sorted = moments::sorted(values);
    let quantile = |p| moments::quantile_sorted(&sorted, p);

    Some(NumericSummary {
        mean: moments::mean(values)?,
        std: moments::sample_std(values),
        min: *sorted.first()?,
        p25: quantile(0.25)?,
        median: quantile(0.5)?,
        p75: quantile(0.75)?,
        max: *sorted.last()?,
        skewness: moments::skewness(values),
        kurtosis: moments::kurtosis(values),
    })
}

/// Lower and upper quartile of a numeric column's finite values.
pub(crate) fn quartiles(dataset: &Dataset, name: &str) -> Result<(f64, f64)> {
    let finite: Vec<f64> = present_values(dataset, name)?
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();
    let sorted = moments::sorted(&finite);
    match (
        moments::quantile_sorted(&sorted, 0.25),
        moments::quantile_sorted(&sorted, 0.75),
    ) {
        (Some(q1), Some(q3)) => Ok((q1, q3)),
        _ => Err(InsightError::invalid_column(
            name,
            "column has no finite values",
        )),
    }
}
