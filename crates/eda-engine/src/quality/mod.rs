//! Data quality analysis module.
//!
//! Runs a fixed battery of rules over a dataset: duplicate rows, infinite
//! values, constant columns and excessive missingness, in that order.

mod analyzer;

pub use analyzer::{DataQualityAnalyzer, MISSINGNESS_THRESHOLD};
