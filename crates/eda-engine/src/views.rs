//! Text rendering of analysis results.
//!
//! Each [`AnalysisView`] maps to exactly one rendering function. Views only
//! read an [`AnalysisResult`]; they never call back into the engines.

use crate::analysis::AnalysisResult;
use crate::types::{FrequencyTable, Histogram, MissingReport, QualityReport};
use crate::utils::truncate_str;
use serde::{Deserialize, Serialize};

/// Widest cell printed in a table.
const MAX_CELL_WIDTH: usize = 24;

/// Widest bar printed in a histogram or frequency chart.
const MAX_BAR_WIDTH: usize = 40;

/// The sections a frontend can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisView {
    Preview,
    Overview,
    Numeric,
    Categorical,
    Missing,
    Quality,
    Export,
}

impl AnalysisView {
    pub const ALL: [AnalysisView; 7] = [
        AnalysisView::Preview,
        AnalysisView::Overview,
        AnalysisView::Numeric,
        AnalysisView::Categorical,
        AnalysisView::Missing,
        AnalysisView::Quality,
        AnalysisView::Export,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisView::Preview => "Data Preview",
            AnalysisView::Overview => "Dataset Overview",
            AnalysisView::Numeric => "Numerical Analysis",
            AnalysisView::Categorical => "Categorical Analysis",
            AnalysisView::Missing => "Missing Values",
            AnalysisView::Quality => "Data Quality",
            AnalysisView::Export => "Report",
        }
    }

    /// Render this view of `result` as text, title included.
    pub fn render(&self, result: &AnalysisResult) -> String {
        let body = match self {
            AnalysisView::Preview => render_preview(result),
            AnalysisView::Overview => render_overview(result),
            AnalysisView::Numeric => render_numeric(result),
            AnalysisView::Categorical => render_categorical(result),
            AnalysisView::Missing => render_missing(&result.missing),
            AnalysisView::Quality => render_quality(result.duplicate_rows, &result.quality),
            AnalysisView::Export => result.report.clone(),
        };
        let title = self.display_name();
        format!("{}\n{}\n{}", title, "-".repeat(title.len()), body)
    }
}

fn render_preview(result: &AnalysisResult) -> String {
    render_table(&result.preview.columns, &result.preview.rows)
}

fn render_overview(result: &AnalysisResult) -> String {
    let overview = &result.overview;
    let mut out = String::new();
    out.push_str(&format!("Rows: {}\n", overview.rows));
    out.push_str(&format!("Columns: {}\n", overview.columns));
    out.push_str(&format!(
        "Numeric: {}  Categorical: {}  Other: {}\n",
        overview.numeric_columns, overview.categorical_columns, overview.other_columns
    ));
    out.push('\n');

    let header = ["column", "dtype", "class", "unique", "missing", "missing %"].map(String::from);
    let rows: Vec<Vec<String>> = result
        .profiles
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.dtype.clone(),
                p.type_class.to_string(),
                p.unique_count.to_string(),
                p.missing_count.to_string(),
                format!("{:.2}", p.missing_percentage),
            ]
        })
        .collect();
    out.push_str(&render_table(&header, &rows));
    out
}

fn render_numeric(result: &AnalysisResult) -> String {
    if result.statistics.is_empty() {
        return "No numeric columns\n".to_string();
    }

    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    let header = [
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max", "skew", "kurt",
    ]
    .map(String::from);
    let rows: Vec<Vec<String>> = result
        .statistics
        .iter()
        .map(|stats| {
            let s = stats.summary.as_ref();
            vec![
                stats.column.clone(),
                stats.count.to_string(),
                fmt(s.map(|s| s.mean)),
                fmt(s.and_then(|s| s.std)),
                fmt(s.map(|s| s.min)),
                fmt(s.map(|s| s.p25)),
                fmt(s.map(|s| s.median)),
                fmt(s.map(|s| s.p75)),
                fmt(s.map(|s| s.max)),
                fmt(s.and_then(|s| s.skewness)),
                fmt(s.and_then(|s| s.kurtosis)),
            ]
        })
        .collect();

    let mut out = render_table(&header, &rows);

    for hist in &result.histograms {
        out.push('\n');
        out.push_str(&render_histogram(hist));
    }

    for report in &result.outliers {
        out.push('\n');
        out.push_str(&format!(
            "Outliers in '{}': {} rows outside [{:.2}, {:.2}] ({:.2}%)\n",
            report.column,
            report.anomalies.len(),
            report.lower_bound,
            report.upper_bound,
            report.anomaly_rate
        ));
        if !report.anomalies.is_empty() {
            let rows: Vec<String> = report.anomalies.iter().map(|r| r.to_string()).collect();
            out.push_str(&format!("Rows: {}\n", rows.join(", ")));
        }
    }

    if let Some(matrix) = &result.correlation {
        out.push('\n');
        out.push_str("Correlation matrix:\n");
        let mut header = vec![String::new()];
        header.extend(matrix.columns.iter().cloned());
        let rows: Vec<Vec<String>> = matrix
            .columns
            .iter()
            .zip(&matrix.coefficients)
            .map(|(name, row)| {
                std::iter::once(name.clone())
                    .chain(row.iter().map(|c| fmt(*c)))
                    .collect()
            })
            .collect();
        out.push_str(&render_table(&header, &rows));
    }

    if let Some(pair) = &result.pair_correlation {
        out.push('\n');
        out.push_str(&format!(
            "Correlation of '{}' and '{}': {} over {} rows\n",
            pair.x,
            pair.y,
            fmt(pair.coefficient),
            pair.observations
        ));
    }

    out
}

fn render_histogram(hist: &Histogram) -> String {
    let mut out = String::new();
    out.push_str(&format!("Distribution of '{}':\n", hist.column));
    if hist.bins.is_empty() {
        out.push_str("  (no finite values)\n");
        return out;
    }

    let peak = hist.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &hist.bins {
        out.push_str(&format!(
            "  [{:>10.2}, {:>10.2}] {:>6} {}\n",
            bin.lower,
            bin.upper,
            bin.count,
            bar(bin.count, peak)
        ));
    }
    out
}

fn render_categorical(result: &AnalysisResult) -> String {
    match &result.frequency {
        Some(table) => render_frequency(table),
        None => "No categorical columns\n".to_string(),
    }
}

fn render_frequency(table: &FrequencyTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Top {} of {} values in '{}':\n",
        table.entries.len(),
        table.distinct_values,
        table.column
    ));

    let peak = table.entries.first().map_or(0, |e| e.count);
    let header = ["value", "count", "%", ""].map(String::from);
    let rows: Vec<Vec<String>> = table
        .entries
        .iter()
        .map(|e| {
            vec![
                e.value.clone(),
                e.count.to_string(),
                format!("{:.2}", e.percentage),
                bar(e.count, peak),
            ]
        })
        .collect();
    out.push_str(&render_table(&header, &rows));
    out
}

fn render_missing(missing: &MissingReport) -> String {
    match missing {
        MissingReport::NoMissingValues => "No missing values\n".to_string(),
        MissingReport::Missing {
            total_missing,
            columns,
        } => {
            let mut out = format!("Total missing cells: {}\n", total_missing);
            let header = ["column", "missing", "%"].map(String::from);
            let rows: Vec<Vec<String>> = columns
                .iter()
                .map(|c| {
                    vec![
                        c.column.clone(),
                        c.missing_count.to_string(),
                        format!("{:.2}", c.missing_percentage),
                    ]
                })
                .collect();
            out.push_str(&render_table(&header, &rows));
            out
        }
    }
}

fn render_quality(duplicate_rows: usize, quality: &QualityReport) -> String {
    let mut out = format!("Duplicate rows: {}\n", duplicate_rows);
    match quality {
        QualityReport::Clean => out.push_str("No quality issues detected\n"),
        QualityReport::Issues(findings) => {
            for finding in findings {
                out.push_str(&format!(
                    "[{}] {}\n",
                    finding.severity.as_str().to_uppercase(),
                    finding.message
                ));
            }
        }
    }
    out
}

fn bar(count: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let width = (count * MAX_BAR_WIDTH).div_ceil(peak);
    "#".repeat(width)
}

/// Left-aligned, space-padded table.
fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let cell = |s: &str| truncate_str(s, MAX_CELL_WIDTH);
    let mut widths: Vec<usize> = header.iter().map(|h| cell(h).chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell(value).chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", cell(c), width = *w))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.as_slice()));
    for row in rows {
        out.push_str(&line(row.as_slice()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::AnalysisConfig;
    use crate::dataset::Dataset;
    use crate::types::{QualityFinding, QualityRule, Severity};
    use polars::prelude::*;

    fn result() -> AnalysisResult {
        let ds: Dataset = df![
            "age" => [Some(25.0f64), Some(30.0), None, Some(40.0), Some(200.0)],
            "city" => ["A", "B", "A", "A", "B"],
        ]
        .unwrap()
        .into();
        let config = AnalysisConfig::builder().outlier_column("age").build().unwrap();
        Analyzer::new(config).run(&ds).unwrap()
    }

    #[test]
    fn test_every_view_renders_its_title() {
        let result = result();
        for view in AnalysisView::ALL {
            let text = view.render(&result);
            assert!(text.starts_with(view.display_name()));
        }
    }

    #[test]
    fn test_categorical_view() {
        let text = AnalysisView::Categorical.render(&result());
        assert!(text.contains("Top 2 of 2 values in 'city':"));
        assert!(text.contains("60.00"));
    }

    #[test]
    fn test_numeric_view_lists_outliers() {
        let text = AnalysisView::Numeric.render(&result());
        assert!(text.contains("Outliers in 'age': 1 rows"));
        assert!(text.contains("Rows: 4"));
        assert!(text.contains("Distribution of 'age':"));
    }

    #[test]
    fn test_missing_view() {
        let text = AnalysisView::Missing.render(&result());
        assert!(text.contains("Total missing cells: 1"));
        assert_eq!(
            render_missing(&MissingReport::NoMissingValues),
            "No missing values\n"
        );
    }

    #[test]
    fn test_quality_view_lists_findings() {
        let quality = QualityReport::Issues(vec![QualityFinding {
            rule: QualityRule::DuplicateRows,
            severity: Severity::Warning,
            message: "Found 2 fully duplicated rows".to_string(),
            column: None,
        }]);
        assert_eq!(
            render_quality(2, &quality),
            "Duplicate rows: 2\n[WARNING] Found 2 fully duplicated rows\n"
        );
    }

    #[test]
    fn test_histogram_without_finite_values() {
        let hist = Histogram {
            column: "x".to_string(),
            bins: Vec::new(),
        };
        assert_eq!(
            render_histogram(&hist),
            "Distribution of 'x':\n  (no finite values)\n"
        );
    }

    #[test]
    fn test_bar_scales_to_peak() {
        assert_eq!(bar(10, 10).len(), MAX_BAR_WIDTH);
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(1, 100).len(), 1);
        assert_eq!(bar(3, 0), "");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let header = ["a".to_string(), "bb".to_string()];
        let rows = vec![vec!["xxx".to_string(), "y".to_string()]];
        assert_eq!(render_table(&header, &rows), "a    bb\n---  --\nxxx  y\n");
    }
}
