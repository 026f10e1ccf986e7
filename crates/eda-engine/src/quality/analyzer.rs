use crate::dataset::Dataset;
use crate::error::{InsightError, Result};
use crate::profiler::DataProfiler;
use crate::types::{ColumnProfile, QualityFinding, QualityReport, QualityRule, Severity, TypeClass};
use crate::utils::{is_float_dtype, percentage};
use polars::prelude::*;
use tracing::debug;

/// Columns with a larger missing percentage than this are flagged.
pub const MISSINGNESS_THRESHOLD: f64 = 50.0;

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Profile the dataset and run every rule.
    pub fn assess(dataset: &Dataset) -> Result<QualityReport> {
        let profiles = DataProfiler::profile_dataset(dataset)?;
        Ok(QualityReport::from_findings(Self::identify_issues(
            dataset, &profiles,
        )?))
    }

    /// Run every rule in order against a dataset and its profiles.
    ///
    /// A rule that cannot be evaluated fails the whole check with
    /// [`InsightError::QualityCheckError`] naming that rule.
    pub fn identify_issues(
        dataset: &Dataset,
        profiles: &[ColumnProfile],
    ) -> Result<Vec<QualityFinding>> {
        dataset.ensure_not_empty()?;

        let mut findings = Vec::new();
        for rule in QualityRule::ALL {
            let found = match rule {
                QualityRule::DuplicateRows => Self::check_duplicate_rows(dataset),
                QualityRule::InfiniteValues => Self::check_infinite_values(dataset, profiles),
                QualityRule::ConstantColumn => Ok(Self::check_constant_columns(profiles)),
                QualityRule::ExcessiveMissingness => {
                    Self::check_missingness(dataset.height(), profiles)
                }
            }
            .map_err(|e| match e {
                InsightError::QualityCheckError { .. } => e,
                other => InsightError::quality_check(rule.as_str(), other.to_string()),
            })?;

            debug!("Rule {} produced {} findings", rule.as_str(), found.len());
            findings.extend(found);
        }

        Ok(findings)
    }

    /// Number of rows identical to an earlier row.
    ///
    /// NaN compares equal to a null cell, since both count as missing.
    pub fn duplicate_row_count(dataset: &Dataset) -> Result<usize> {
        let df = dataset.frame();
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                if is_float_dtype(col.dtype()) {
                    let values = dataset.numeric_values(col.name().as_str())?;
                    Ok(Series::new(col.name().clone(), values).into())
                } else {
                    Ok(col.clone())
                }
            })
            .collect::<Result<Vec<Column>>>()?;

        let unique = DataFrame::new(columns)?
            .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)
            .map_err(|e| {
                InsightError::quality_check(QualityRule::DuplicateRows.as_str(), e.to_string())
            })?;
        Ok(df.height() - unique.height())
    }

    fn check_duplicate_rows(dataset: &Dataset) -> Result<Vec<QualityFinding>> {
        let duplicates = Self::duplicate_row_count(dataset)?;
        if duplicates == 0 {
            return Ok(Vec::new());
        }

        Ok(vec![QualityFinding {
            rule: QualityRule::DuplicateRows,
            severity: Severity::Warning,
            message: format!("Found {} fully duplicated rows", duplicates),
            column: None,
        }])
    }

    fn check_infinite_values(
        dataset: &Dataset,
        profiles: &[ColumnProfile],
    ) -> Result<Vec<QualityFinding>> {
        let mut findings = Vec::new();
        for profile in profiles
            .iter()
            .filter(|p| p.type_class == TypeClass::Numeric)
        {
            let has_infinite = dataset
                .numeric_values(&profile.name)?
                .into_iter()
                .flatten()
                .any(f64::is_infinite);

            if has_infinite {
                findings.push(QualityFinding {
                    rule: QualityRule::InfiniteValues,
                    severity: Severity::Warning,
                    message: format!("Column '{}' contains infinite values", profile.name),
                    column: Some(profile.name.clone()),
                });
            }
        }
        Ok(findings)
    }

    fn check_constant_columns(profiles: &[ColumnProfile]) -> Vec<QualityFinding> {
        // A fully-null column has zero distinct values and is not constant
        profiles
            .iter()
            .filter(|p| p.unique_count == 1)
            .map(|p| QualityFinding {
                rule: QualityRule::ConstantColumn,
                severity: Severity::Info,
                message: format!("Column '{}' contains only one unique value", p.name),
                column: Some(p.name.clone()),
            })
            .collect()
    }

    fn check_missingness(rows: usize, profiles: &[ColumnProfile]) -> Result<Vec<QualityFinding>> {
        let mut findings = Vec::new();
        for profile in profiles {
            let missing_pct = percentage(profile.missing_count, rows).ok_or_else(|| {
                InsightError::quality_check(
                    QualityRule::ExcessiveMissingness.as_str(),
                    "dataset has no rows",
                )
            })?;

            if missing_pct > MISSINGNESS_THRESHOLD {
                findings.push(QualityFinding {
                    rule: QualityRule::ExcessiveMissingness,
                    severity: Severity::Warning,
                    message: format!(
                        "Column '{}' has more than 50% missing values ({:.1}%)",
                        profile.name, missing_pct
                    ),
                    column: Some(profile.name.clone()),
                });
            }
        }
        Ok(findings)
    }
}
