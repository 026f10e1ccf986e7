use super::export::{export_column_metadata_csv, export_statistics_csv};
use crate::error::{InsightError, Result};
use crate::types::{
    ColumnProfile, DatasetOverview, DescriptiveStats, MissingReport, NumericSummary,
    OutlierReport, QualityReport,
};
use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const STATISTICS_HEADING: &str = "Descriptive statistics:";
const STATISTICS_HEADER: [&str; 11] = [
    "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max", "skewness", "kurtosis",
];
const ABSENT: &str = "-";

/// Outputs of one analysis pass, borrowed for report composition.
pub struct ReportParams<'a> {
    pub overview: &'a DatasetOverview,
    pub profiles: &'a [ColumnProfile],
    pub statistics: &'a [DescriptiveStats],
    pub missing: &'a MissingReport,
    pub quality: &'a QualityReport,
    pub duplicate_rows: usize,
    pub outliers: &'a [OutlierReport],
}

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator writing into `output_dir`.
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Compose the text report, stamped with the current local time.
    pub fn compose(params: &ReportParams<'_>) -> String {
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::compose_at(params, &generated_at)
    }

    /// Compose the text report with an explicit timestamp.
    ///
    /// Identical inputs and timestamp always give identical text.
    pub fn compose_at(params: &ReportParams<'_>, generated_at: &str) -> String {
        let ReportParams {
            overview,
            profiles,
            statistics,
            missing,
            quality,
            duplicate_rows,
            outliers,
        } = params;

        let mut out = String::new();
        out.push_str("EXPLORATORY DATA ANALYSIS REPORT\n");
        out.push_str(&"=".repeat(32));
        out.push('\n');
        out.push('\n');

        out.push_str("Dataset shape:\n");
        out.push_str(&format!("- Rows: {}\n", overview.rows));
        out.push_str(&format!("- Columns: {}\n", overview.columns));
        out.push('\n');

        out.push_str("Variable types:\n");
        out.push_str(&format!("- Numeric: {}\n", overview.numeric_columns));
        out.push_str(&format!("- Categorical: {}\n", overview.categorical_columns));
        out.push_str(&format!("- Other: {}\n", overview.other_columns));
        out.push('\n');

        out.push_str("Missing values:\n");
        out.push_str(&format!("- Total missing: {}\n", missing.total_missing()));
        match missing {
            MissingReport::NoMissingValues => {
                out.push_str("- No missing values\n");
            }
            MissingReport::Missing { columns, .. } => {
                let listed: Vec<String> = columns
                    .iter()
                    .map(|c| {
                        format!(
                            "{} ({}, {:.2}%)",
                            c.column, c.missing_count, c.missing_percentage
                        )
                    })
                    .collect();
                out.push_str(&format!("- Columns with missing values: {}\n", listed.join(", ")));
            }
        }
        out.push('\n');

        out.push_str("Duplicates:\n");
        out.push_str(&format!("- Fully duplicated rows: {}\n", duplicate_rows));
        out.push('\n');

        out.push_str("Quality findings:\n");
        match quality {
            QualityReport::Clean => {
                out.push_str("- No quality issues detected\n");
            }
            QualityReport::Issues(findings) => {
                for finding in findings {
                    out.push_str(&format!(
                        "- [{}] {}\n",
                        finding.severity.as_str(),
                        finding.message
                    ));
                }
            }
        }
        out.push('\n');

        if !outliers.is_empty() {
            out.push_str("Outliers (IQR rule):\n");
            for report in outliers.iter() {
                out.push_str(&format!(
                    "- {}: {} rows outside [{:.2}, {:.2}] ({:.2}%)\n",
                    report.column,
                    report.anomalies.len(),
                    report.lower_bound,
                    report.upper_bound,
                    report.anomaly_rate
                ));
            }
            out.push('\n');
        }

        out.push_str("Column metadata:\n");
        for profile in profiles.iter() {
            out.push_str(&format!(
                "- {} [{}, {}]: {} unique, {} missing\n",
                profile.name,
                profile.type_class,
                profile.dtype,
                profile.unique_count,
                profile.missing_count
            ));
        }
        out.push('\n');

        out.push_str(STATISTICS_HEADING);
        out.push('\n');
        if statistics.is_empty() {
            out.push_str("- No numeric columns\n");
        } else {
            out.push_str(&table_row(STATISTICS_HEADER.iter().copied()));
            out.push('\n');
            for stats in statistics.iter() {
                out.push_str(&statistics_row(stats));
                out.push('\n');
            }
        }
        out.push('\n');

        out.push_str(&format!("Generated at: {}\n", generated_at));
        out
    }

    /// Write the text report as `<base_name>_report.txt`.
    pub fn write_report(&self, report: &str, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.txt", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(report.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write `descriptive_statistics.csv` and `data_info.csv`.
    pub fn write_exports(
        &self,
        statistics: &[DescriptiveStats],
        profiles: &[ColumnProfile],
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let exports = [
            ("descriptive_statistics.csv", export_statistics_csv(statistics)?),
            ("data_info.csv", export_column_metadata_csv(profiles)?),
        ];

        let mut paths = Vec::with_capacity(exports.len());
        for (file_name, content) in exports {
            let path = self.output_dir.join(file_name);
            fs::write(&path, content)?;
            info!("Export saved: {}", path.display());
            paths.push(path);
        }
        Ok(paths)
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\").replace('|', "\\|")
}

fn table_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<String> = cells.into_iter().map(|c| escape_cell(c.as_ref())).collect();
    format!("| {} |", cells.join(" | "))
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| format!("{:.2}", v))
}

fn statistics_row(stats: &DescriptiveStats) -> String {
    let s = stats.summary.as_ref();
    let cells = [
        stats.column.clone(),
        stats.count.to_string(),
        fmt_value(s.map(|s| s.mean)),
        fmt_value(s.and_then(|s| s.std)),
        fmt_value(s.map(|s| s.min)),
        fmt_value(s.map(|s| s.p25)),
        fmt_value(s.map(|s| s.median)),
        fmt_value(s.map(|s| s.p75)),
        fmt_value(s.map(|s| s.max)),
        fmt_value(s.and_then(|s| s.skewness)),
        fmt_value(s.and_then(|s| s.kurtosis)),
    ];
    table_row(cells)
}

/// Split a `| a | b |` row into unescaped cells.
fn split_row(line: &str) -> Option<Vec<String>> {
    let inner = line.trim().strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        return None;
    }
    Some(cells)
}

fn parse_value(cell: &str, line: &str) -> Result<Option<f64>> {
    if cell == ABSENT {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| {
        InsightError::ReportGenerationFailed(format!("invalid number '{}' in row: {}", cell, line))
    })
}

/// Read the descriptive-statistics table back out of a composed report.
///
/// Values come back rounded to two decimals.
pub fn parse_statistics_table(report: &str) -> Result<Vec<DescriptiveStats>> {
    let mut lines = report
        .lines()
        .skip_while(|line| line.trim() != STATISTICS_HEADING)
        .skip(1);

    let header = lines.next().ok_or_else(|| {
        InsightError::ReportGenerationFailed("statistics section not found".to_string())
    })?;
    let header_cells = split_row(header);
    if header_cells.is_none() {
        // "- No numeric columns"
        return Ok(Vec::new());
    }
    if header_cells.as_deref() != Some(&STATISTICS_HEADER.map(String::from)[..]) {
        return Err(InsightError::ReportGenerationFailed(format!(
            "unexpected statistics header: {}",
            header
        )));
    }

    let mut parsed = Vec::new();
    for line in lines.take_while(|line| line.trim_start().starts_with('|')) {
        let cells = split_row(line)
            .filter(|cells| cells.len() == STATISTICS_HEADER.len())
            .ok_or_else(|| {
                InsightError::ReportGenerationFailed(format!("malformed statistics row: {}", line))
            })?;

        let count = cells[1].parse::<usize>().map_err(|_| {
            InsightError::ReportGenerationFailed(format!("invalid count in row: {}", line))
        })?;
        let values = cells[2..]
            .iter()
            .map(|cell| parse_value(cell, line))
            .collect::<Result<Vec<_>>>()?;

        let summary = match (values[0], values[2], values[3], values[4], values[5], values[6]) {
            (Some(mean), Some(min), Some(p25), Some(median), Some(p75), Some(max)) => {
                Some(NumericSummary {
                    mean,
                    std: values[1],
                    min,
                    p25,
                    median,
                    p75,
                    max,
                    skewness: values[7],
                    kurtosis: values[8],
                })
            }
            _ => None,
        };

        parsed.push(DescriptiveStats {
            column: cells[0].clone(),
            count,
            summary,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingColumn, QualityFinding, QualityRule, Severity, TypeClass};
    use pretty_assertions::assert_eq;

    fn overview() -> DatasetOverview {
        DatasetOverview {
            rows: 5,
            columns: 2,
            numeric_columns: 1,
            categorical_columns: 1,
            other_columns: 0,
        }
    }

    fn profiles() -> Vec<ColumnProfile> {
        vec![
            ColumnProfile {
                name: "age".to_string(),
                dtype: "Float64".to_string(),
                type_class: TypeClass::Numeric,
                unique_count: 4,
                missing_count: 1,
                missing_percentage: 20.0,
            },
            ColumnProfile {
                name: "city".to_string(),
                dtype: "String".to_string(),
                type_class: TypeClass::Categorical,
                unique_count: 2,
                missing_count: 0,
                missing_percentage: 0.0,
            },
        ]
    }

    fn statistics() -> Vec<DescriptiveStats> {
        vec![
            DescriptiveStats {
                column: "age".to_string(),
                count: 4,
                summary: Some(NumericSummary {
                    mean: 73.75,
                    std: Some(84.6684),
                    min: 25.0,
                    p25: 28.75,
                    median: 35.0,
                    p75: 80.0,
                    max: 200.0,
                    skewness: Some(1.98752),
                    kurtosis: Some(3.9502),
                }),
            },
            DescriptiveStats {
                column: "weird | name".to_string(),
                count: 0,
                summary: None,
            },
        ]
    }

    fn missing() -> MissingReport {
        MissingReport::Missing {
            total_missing: 1,
            columns: vec![MissingColumn {
                column: "age".to_string(),
                missing_count: 1,
                missing_percentage: 20.0,
            }],
        }
    }

    fn compose(quality: &QualityReport, generated_at: &str) -> String {
        let overview = overview();
        let profiles = profiles();
        let statistics = statistics();
        let missing = missing();
        ReportGenerator::compose_at(
            &ReportParams {
                overview: &overview,
                profiles: &profiles,
                statistics: &statistics,
                missing: &missing,
                quality,
                duplicate_rows: 0,
                outliers: &[],
            },
            generated_at,
        )
    }

    #[test]
    fn test_compose_sections() {
        let report = compose(&QualityReport::Clean, "2026-01-01 00:00:00");
        assert!(report.starts_with("EXPLORATORY DATA ANALYSIS REPORT\n"));
        assert!(report.contains("- Rows: 5\n- Columns: 2"));
        assert!(report.contains("- Numeric: 1\n- Categorical: 1\n- Other: 0"));
        assert!(report.contains("- Total missing: 1"));
        assert!(report.contains("- Columns with missing values: age (1, 20.00%)"));
        assert!(report.contains("- Fully duplicated rows: 0"));
        assert!(report.contains("- No quality issues detected"));
        assert!(report.contains("| column | count | mean |"));
        assert!(report.ends_with("Generated at: 2026-01-01 00:00:00\n"));
    }

    #[test]
    fn test_compose_section_layout() {
        let report = compose(&QualityReport::Clean, "t");
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            &lines[..5],
            [
                "EXPLORATORY DATA ANALYSIS REPORT",
                "================================",
                "",
                "Dataset shape:",
                "- Rows: 5",
            ]
        );
        assert!(report.contains("Descriptive statistics:\n| column | count |"));
        assert!(report.contains("- Fully duplicated rows: 0\n\nQuality findings:\n"));
        assert!(!report.contains("\n\n\n"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let quality = QualityReport::Issues(vec![QualityFinding {
            rule: QualityRule::ConstantColumn,
            severity: Severity::Info,
            message: "Column 'x' contains only one unique value".to_string(),
            column: Some("x".to_string()),
        }]);
        let a = compose(&quality, "t");
        let b = compose(&quality, "t");
        assert_eq!(a, b);
        assert!(a.contains("- [info] Column 'x' contains only one unique value"));
    }

    #[test]
    fn test_statistics_table_round_trip() {
        let report = compose(&QualityReport::Clean, "t");
        let parsed = parse_statistics_table(&report).unwrap();
        let original = statistics();

        assert_eq!(parsed.len(), original.len());
        assert_eq!(parsed[1], original[1]);
        assert_eq!(parsed[0].column, "age");
        assert_eq!(parsed[0].count, 4);

        let (p, o) = (
            parsed[0].summary.as_ref().unwrap(),
            original[0].summary.as_ref().unwrap(),
        );
        let pairs = [
            (p.mean, o.mean),
            (p.std.unwrap(), o.std.unwrap()),
            (p.min, o.min),
            (p.p25, o.p25),
            (p.median, o.median),
            (p.p75, o.p75),
            (p.max, o.max),
            (p.skewness.unwrap(), o.skewness.unwrap()),
            (p.kurtosis.unwrap(), o.kurtosis.unwrap()),
        ];
        for (parsed, original) in pairs {
            assert!((parsed - original).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn test_parse_without_numeric_columns() {
        let overview = overview();
        let missing = MissingReport::NoMissingValues;
        let report = ReportGenerator::compose_at(
            &ReportParams {
                overview: &overview,
                profiles: &[],
                statistics: &[],
                missing: &missing,
                quality: &QualityReport::Clean,
                duplicate_rows: 0,
                outliers: &[],
            },
            "t",
        );
        assert!(report.contains("- No missing values"));
        assert!(parse_statistics_table(&report).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_section() {
        assert!(matches!(
            parse_statistics_table("nothing here"),
            Err(InsightError::ReportGenerationFailed(_))
        ));
    }

    #[test]
    fn test_split_row_handles_escapes() {
        assert_eq!(
            split_row(r"| a \| b | c |").unwrap(),
            vec!["a | b".to_string(), "c".to_string()]
        );
    }
}
