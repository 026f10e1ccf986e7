//! Report composition and export.
//!
//! [`ReportGenerator::compose`] flattens the outputs of one analysis pass into
//! a plain-text report. The descriptive-statistics section is a pipe-delimited
//! table that [`parse_statistics_table`] reads back.
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_engine::reporting::{ReportGenerator, ReportParams};
//!
//! let text = ReportGenerator::compose(&ReportParams {
//!     overview: &result.overview,
//!     profiles: &result.profiles,
//!     statistics: &result.statistics,
//!     missing: &result.missing,
//!     quality: &result.quality,
//!     duplicate_rows: result.duplicate_rows,
//!     outliers: &result.outliers,
//! });
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"));
//! generator.write_report(&text, "train")?;
//! ```

mod export;
mod generator;

pub use export::{export_column_metadata_csv, export_statistics_csv};
pub use generator::{ReportGenerator, ReportParams, parse_statistics_table};
