//! Missing-value report.

use crate::error::{InsightError, Result};
use crate::types::{ColumnProfile, MissingColumn, MissingReport};

/// Missing-value reporter.
pub struct MissingValueReporter;

impl MissingValueReporter {
    /// Build the report from column profiles.
    ///
    /// Columns without missing cells are left out; the rest are ordered by
    /// missing count, most first, ties in column order.
    pub fn report(profiles: &[ColumnProfile]) -> Result<MissingReport> {
        if profiles.is_empty() {
            return Err(InsightError::EmptyDataset);
        }

        let mut columns: Vec<MissingColumn> = profiles
            .iter()
            .filter(|p| p.missing_count > 0)
            .map(|p| MissingColumn {
                column: p.name.clone(),
                missing_count: p.missing_count,
                missing_percentage: p.missing_percentage,
            })
            .collect();

        if columns.is_empty() {
            return Ok(MissingReport::NoMissingValues);
        }

        columns.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        let total_missing = columns.iter().map(|c| c.missing_count).sum();

        Ok(MissingReport::Missing {
            total_missing,
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::profiler::DataProfiler;
    use polars::prelude::*;

    fn report_for(ds: Dataset) -> MissingReport {
        let profiles = DataProfiler::profile_dataset(&ds).unwrap();
        MissingValueReporter::report(&profiles).unwrap()
    }

    #[test]
    fn test_no_missing_values_is_explicit() {
        let ds: Dataset = df!["a" => [1i64, 2], "b" => ["x", "y"]].unwrap().into();
        assert_eq!(report_for(ds), MissingReport::NoMissingValues);
    }

    #[test]
    fn test_sorted_by_count_then_column_order() {
        let ds: Dataset = df![
            "a" => [Some(1i64), None, Some(3), Some(4)],
            "b" => [Option::<&str>::None, None, Some("x"), Some("y")],
            "c" => [1i64, 2, 3, 4],
            "d" => [Some(1.0f64), Some(2.0), Some(3.0), None],
        ]
        .unwrap()
        .into();

        let report = report_for(ds);
        let order: Vec<_> = report.columns().iter().map(|c| c.column.as_str()).collect();
        assert_eq!(order, ["b", "a", "d"]);
        assert_eq!(report.total_missing(), 4);
        assert_eq!(report.columns()[0].missing_percentage, 50.0);
    }

    #[test]
    fn test_no_profiles_is_error() {
        assert!(matches!(
            MissingValueReporter::report(&[]),
            Err(InsightError::EmptyDataset)
        ));
    }
}
