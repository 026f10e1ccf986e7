//! Distribution views of numeric columns: histograms and correlations.

use super::moments;
use crate::dataset::Dataset;
use crate::error::{InsightError, Result};
use crate::types::{CorrelationMatrix, Histogram, HistogramBin, PairCorrelation};

/// Equal-width histogram of the finite, non-missing values of a column.
///
/// A constant column produces one zero-width bin; a column with no finite
/// values produces no bins.
pub fn histogram(dataset: &Dataset, name: &str, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(InsightError::InvalidConfig(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let values: Vec<f64> = dataset
        .numeric_values(name)?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();

    let (min, max) = match (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Ok(Histogram {
                column: name.to_string(),
                bins: Vec::new(),
            });
        }
    };

    if min == max {
        return Ok(Histogram {
            column: name.to_string(),
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect();

    Ok(Histogram {
        column: name.to_string(),
        bins,
    })
}

/// Pearson correlation between every pair of the given numeric columns,
/// using rows where both values are present and finite.
pub fn correlation_matrix(dataset: &Dataset, columns: &[String]) -> Result<CorrelationMatrix> {
    let series = columns
        .iter()
        .map(|name| dataset.numeric_values(name))
        .collect::<Result<Vec<_>>>()?;

    let coefficients = series
        .iter()
        .map(|a| {
            series
                .iter()
                .map(|b| moments::pearson(&complete_pairs(a, b)))
                .collect()
        })
        .collect();

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        coefficients,
    })
}

/// Pearson correlation of `x` against `y`.
pub fn pair_correlation(dataset: &Dataset, x: &str, y: &str) -> Result<PairCorrelation> {
    let pairs = complete_pairs(&dataset.numeric_values(x)?, &dataset.numeric_values(y)?);
    Ok(PairCorrelation {
        x: x.to_string(),
        y: y.to_string(),
        observations: pairs.len(),
        coefficient: moments::pearson(&pairs),
    })
}

fn complete_pairs(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<(f64, f64)> {
    a.iter()
        .zip(b)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect()
}
