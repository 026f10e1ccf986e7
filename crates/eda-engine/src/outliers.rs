//! Outlier detection with Tukey's IQR rule.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::statistics::quartiles;
use crate::types::OutlierReport;
use crate::utils::{percentage, round_to};
use tracing::debug;

/// Fixed IQR multiplier for the fences.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Outlier detector for numeric columns.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Flag rows whose value lies strictly outside
    /// `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]`. Missing cells are never flagged.
    ///
    /// Quartiles come from the finite values, so infinite cells always fall
    /// outside the fences.
    pub fn detect(dataset: &Dataset, name: &str) -> Result<OutlierReport> {
        dataset.ensure_not_empty()?;

        let values = dataset.numeric_values(name)?;
        let (q1, q3) = quartiles(dataset, name)?;
        let iqr = q3 - q1;
        let lower_bound = q1 - IQR_MULTIPLIER * iqr;
        let upper_bound = q3 + IQR_MULTIPLIER * iqr;

        let anomalies: Vec<usize> = values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| match v {
                Some(x) if *x < lower_bound || *x > upper_bound => Some(row),
                _ => None,
            })
            .collect();

        let anomaly_rate = round_to(
            percentage(anomalies.len(), dataset.height()).unwrap_or(0.0),
            2,
        );
        debug!(
            "Column '{}': {} outliers outside [{}, {}]",
            name,
            anomalies.len(),
            lower_bound,
            upper_bound
        );

        Ok(OutlierReport {
            column: name.to_string(),
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            anomalies,
            anomaly_rate,
        })
    }
}
