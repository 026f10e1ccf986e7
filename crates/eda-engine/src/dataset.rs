//! The in-memory dataset every engine reads from.
//!
//! A [`Dataset`] wraps a fully typed polars [`DataFrame`]. Loading either
//! produces a typed frame or fails outright; engines never see a partially
//! parsed table.

use crate::error::{InsightError, Result};
use crate::types::TypeClass;
use crate::utils::{is_float_dtype, type_class_of};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of rows used for CSV schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// An immutable tabular dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl From<DataFrame> for Dataset {
    fn from(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Load a delimited text file with a header row.
    ///
    /// Tries standard quote handling first, then no quote handling, then a
    /// pre-cleaned copy of the content.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InsightError::Load(format!(
                "input file not found: {}",
                path.display()
            )));
        }

        let frame = load_csv_with_fallbacks(path)?;
        info!("Dataset loaded from {}: {:?}", path.display(), frame.shape());
        Ok(Self { frame })
    }

    /// Parse delimited text held in memory.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let frame = read_csv_content(content.to_string())
            .map_err(|e| InsightError::Load(e.to_string()))?;
        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Fail with [`InsightError::EmptyDataset`] when there are no rows or columns.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(InsightError::EmptyDataset)
        } else {
            Ok(())
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Look up a column by name.
    pub fn series(&self, name: &str) -> Result<&Series> {
        self.frame
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| InsightError::invalid_column(name, "column not found in dataset"))
    }

    pub fn type_class(&self, name: &str) -> Result<TypeClass> {
        Ok(type_class_of(self.series(name)?.dtype()))
    }

    /// Names of all numeric columns, in schema order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_of_class(TypeClass::Numeric)
    }

    /// Names of all categorical columns, in schema order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns_of_class(TypeClass::Categorical)
    }

    fn columns_of_class(&self, class: TypeClass) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|col| type_class_of(col.dtype()) == class)
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Values of a numeric column as `f64`, with NaN read as missing.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self.series(name)?;
        if !type_class_of(series.dtype()).is_numeric() {
            return Err(InsightError::invalid_column(
                name,
                format!("expected a numeric column, found {:?}", series.dtype()),
            ));
        }

        let float_series = series.cast(&DataType::Float64)?;
        Ok(float_series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Values of any column rendered as text, nulls kept as `None`.
    ///
    /// Numeric NaN cells are reported as missing, matching [`Self::missing_count`].
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let series = self.series(name)?;
        let str_series = series.cast(&DataType::String)?;
        if type_class_of(series.dtype()).is_numeric() {
            let numbers = self.numeric_values(name)?;
            return Ok(numbers
                .into_iter()
                .zip(str_series.str()?.into_iter())
                .map(|(num, text)| num.and(text.map(str::to_string)))
                .collect());
        }

        Ok(str_series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Count of missing cells: nulls, plus NaN in floating point columns.
    pub fn missing_count(&self, name: &str) -> Result<usize> {
        let series = self.series(name)?;
        let mut missing = series.null_count();
        if is_float_dtype(series.dtype()) {
            missing += series
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .filter(|v| v.is_some_and(f64::is_nan))
                .count();
        }
        Ok(missing)
    }

    /// The first `rows` rows.
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.frame.head(Some(rows))
    }
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
}

fn read_csv_content(content: String) -> PolarsResult<DataFrame> {
    csv_options()
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
}

fn read_csv_file(path: &Path, quote_char: Option<u8>) -> PolarsResult<DataFrame> {
    csv_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
}

/// Load CSV with multiple fallback strategies.
///
/// Every failure, including one opening the file, surfaces as
/// [`InsightError::Load`].
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match read_csv_file(path, Some(b'"')) {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: Without quote handling
    match read_csv_file(path, None) {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path).map_err(|e| {
        InsightError::Load(format!("could not read {}: {}", path.display(), e))
    })?;
    read_csv_content(clean_csv_content(&content)).map_err(|e| {
        InsightError::Load(format!("could not parse {}: {}", path.display(), e))
    })
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
