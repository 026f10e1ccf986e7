//! Schema inspection.
//!
//! Derives one [`ColumnProfile`] per column: type class, distinct values and
//! missingness. Every downstream engine relies on this classification.

use crate::dataset::Dataset;
use crate::error::{InsightError, Result};
use crate::types::{ColumnProfile, DatasetOverview, TypeClass};
use crate::utils::{dtype_label, percentage, round_to, type_class_of};
use std::collections::HashSet;
use tracing::debug;

/// Schema inspector for a dataset.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column, preserving column order.
    ///
    /// Fails with [`InsightError::EmptyDataset`] when the dataset has no rows,
    /// since missing percentages would be undefined.
    pub fn profile_dataset(dataset: &Dataset) -> Result<Vec<ColumnProfile>> {
        dataset.ensure_not_empty()?;

        let profiles = dataset
            .column_names()
            .iter()
            .map(|name| Self::profile_column(dataset, name))
            .collect::<Result<Vec<_>>>()?;

        debug!("Profiled {} columns", profiles.len());
        Ok(profiles)
    }

    /// Rows, columns and type composition.
    pub fn overview(dataset: &Dataset, profiles: &[ColumnProfile]) -> DatasetOverview {
        DatasetOverview::from_profiles(dataset.height(), profiles)
    }

    fn profile_column(dataset: &Dataset, name: &str) -> Result<ColumnProfile> {
        let series = dataset.series(name)?;
        let type_class = type_class_of(series.dtype());
        let missing_count = dataset.missing_count(name)?;
        let missing_percentage =
            percentage(missing_count, dataset.height()).ok_or(InsightError::EmptyDataset)?;

        Ok(ColumnProfile {
            name: name.to_string(),
            dtype: dtype_label(series.dtype()),
            type_class,
            unique_count: distinct_count(dataset, name)?,
            missing_count,
            missing_percentage: round_to(missing_percentage, 2),
        })
    }
}

/// Number of distinct non-missing values in a column.
pub(crate) fn distinct_count(dataset: &Dataset, name: &str) -> Result<usize> {
    if dataset.type_class(name)? == TypeClass::Numeric {
        // -0.0 and 0.0 compare equal, so they share a bit pattern here
        let distinct: HashSet<u64> = dataset
            .numeric_values(name)?
            .into_iter()
            .flatten()
            .map(|v| if v == 0.0 { 0u64 } else { v.to_bits() })
            .collect();
        return Ok(distinct.len());
    }

    let distinct: HashSet<String> = dataset.text_values(name)?.into_iter().flatten().collect();
    Ok(distinct.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> Dataset {
        df![
            "age" => [Some(25.0f64), Some(30.0), None, Some(40.0), Some(200.0)],
            "city" => ["A", "B", "A", "A", "B"],
            "flag" => [Some(true), None, Some(false), Some(true), None],
        ]
        .unwrap()
        .into()
    }

    #[test]
    fn test_profile_preserves_order_and_classes() {
        let profiles = DataProfiler::profile_dataset(&sample()).unwrap();
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["age", "city", "flag"]);
        assert_eq!(profiles[0].type_class, TypeClass::Numeric);
        assert_eq!(profiles[1].type_class, TypeClass::Categorical);
        assert_eq!(profiles[2].type_class, TypeClass::Other);
        assert_eq!(profiles[0].dtype, "Float64");
    }

    #[test]
    fn test_profile_missing_counts() {
        let profiles = DataProfiler::profile_dataset(&sample()).unwrap();
        assert_eq!(profiles[0].missing_count, 1);
        assert_eq!(profiles[0].missing_percentage, 20.0);
        assert_eq!(profiles[1].missing_count, 0);
        assert_eq!(profiles[2].missing_count, 2);
        assert_eq!(profiles[2].missing_percentage, 40.0);
    }

    #[test]
    fn test_unique_count_excludes_missing() {
        let profiles = DataProfiler::profile_dataset(&sample()).unwrap();
        assert_eq!(profiles[0].unique_count, 4);
        assert_eq!(profiles[1].unique_count, 2);
        assert_eq!(profiles[2].unique_count, 2);
    }

    #[test]
    fn test_missing_percentage_rounded() {
        let ds: Dataset = df!["x" => [Some(1i64), None, Some(3)]].unwrap().into();
        let profiles = DataProfiler::profile_dataset(&ds).unwrap();
        assert_eq!(profiles[0].missing_percentage, 33.33);
    }

    #[test]
    fn test_zero_rows_is_error() {
        let ds: Dataset = df!["x" => Vec::<f64>::new()].unwrap().into();
        assert!(matches!(
            DataProfiler::profile_dataset(&ds),
            Err(InsightError::EmptyDataset)
        ));
    }

    #[test]
    fn test_overview() {
        let ds = sample();
        let profiles = DataProfiler::profile_dataset(&ds).unwrap();
        let overview = DataProfiler::overview(&ds, &profiles);
        assert_eq!(overview.rows, 5);
        assert_eq!(overview.columns, 3);
        assert_eq!(overview.numeric_columns, 1);
        assert_eq!(overview.categorical_columns, 1);
        assert_eq!(overview.other_columns, 1);
    }
}
