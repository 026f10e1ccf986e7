use crate::error::{InsightError, Result};
use crate::types::{ColumnProfile, DescriptiveStats, NumericSummary};
use polars::prelude::*;

/// Descriptive statistics as CSV, one row per column.
pub fn export_statistics_csv(statistics: &[DescriptiveStats]) -> Result<String> {
    let field = |f: fn(&NumericSummary) -> Option<f64>| -> Vec<Option<f64>> {
        statistics
            .iter()
            .map(|s| s.summary.as_ref().and_then(f))
            .collect()
    };

    let mut df = df!(
        "column" => statistics.iter().map(|s| s.column.clone()).collect::<Vec<_>>(),
        "count" => statistics.iter().map(|s| s.count as u64).collect::<Vec<_>>(),
        "mean" => field(|s| Some(s.mean)),
        "std" => field(|s| s.std),
        "min" => field(|s| Some(s.min)),
        "25%" => field(|s| Some(s.p25)),
        "50%" => field(|s| Some(s.median)),
        "75%" => field(|s| Some(s.p75)),
        "max" => field(|s| Some(s.max)),
        "skewness" => field(|s| s.skewness),
        "kurtosis" => field(|s| s.kurtosis),
    )?;

    write_csv(&mut df)
}

/// Per-column metadata as CSV: name, dtype, type class, unique and missing counts.
pub fn export_column_metadata_csv(profiles: &[ColumnProfile]) -> Result<String> {
    let mut df = df!(
        "column" => profiles.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
        "dtype" => profiles.iter().map(|p| p.dtype.clone()).collect::<Vec<_>>(),
        "type_class" => profiles.iter().map(|p| p.type_class.as_str()).collect::<Vec<_>>(),
        "unique_count" => profiles.iter().map(|p| p.unique_count as u64).collect::<Vec<_>>(),
        "missing_count" => profiles.iter().map(|p| p.missing_count as u64).collect::<Vec<_>>(),
        "missing_percentage" => profiles.iter().map(|p| p.missing_percentage).collect::<Vec<_>>(),
    )?;

    write_csv(&mut df)
}

fn write_csv(df: &mut DataFrame) -> Result<String> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    String::from_utf8(buf).map_err(|e| InsightError::ReportGenerationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeClass;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_statistics_csv() {
        let stats = vec![
            DescriptiveStats {
                column: "age".to_string(),
                count: 2,
                summary: Some(NumericSummary {
                    mean: 1.5,
                    std: Some(0.5),
                    min: 1.0,
                    p25: 1.25,
                    median: 1.5,
                    p75: 1.75,
                    max: 2.0,
                    skewness: None,
                    kurtosis: None,
                }),
            },
            DescriptiveStats {
                column: "empty".to_string(),
                count: 0,
                summary: None,
            },
        ];
        let csv = export_statistics_csv(&stats).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "column,count,mean,std,min,25%,50%,75%,max,skewness,kurtosis"
        );
        assert!(lines[1].starts_with("age,2,1.5,0.5,"));
        assert!(lines[1].ends_with(",,"));
        assert_eq!(lines[2], "empty,0,,,,,,,,,");
    }

    #[test]
    fn test_column_metadata_csv() {
        let profiles = vec![ColumnProfile {
            name: "city".to_string(),
            dtype: "String".to_string(),
            type_class: TypeClass::Categorical,
            unique_count: 2,
            missing_count: 1,
            missing_percentage: 20.0,
        }];
        let csv = export_column_metadata_csv(&profiles).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "column,dtype,type_class,unique_count,missing_count,missing_percentage"
        );
        assert!(lines[1].starts_with("city,String,categorical,2,1,20"));
    }

    #[test]
    fn test_statistics_csv_parses_back() {
        let stats = vec![DescriptiveStats {
            column: "x".to_string(),
            count: 0,
            summary: None,
        }];
        let csv = export_statistics_csv(&stats).unwrap();
        let ds = crate::dataset::Dataset::from_csv_str(&csv).unwrap();
        assert_eq!(ds.width(), 11);
        assert_eq!(ds.height(), 1);
    }
}
