//! Shared helpers for the analysis engines.

use crate::types::TypeClass;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds floating point values (and so may hold NaN or infinity).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType holds text labels.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Classify a DataType.
pub fn type_class_of(dtype: &DataType) -> TypeClass {
    if is_numeric_dtype(dtype) {
        TypeClass::Numeric
    } else if is_text_dtype(dtype) {
        TypeClass::Categorical
    } else {
        TypeClass::Other
    }
}

/// Short label for a DataType, e.g. `Int64` or `String`.
pub fn dtype_label(dtype: &DataType) -> String {
    format!("{:?}", dtype)
}

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Round to `decimals` decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or None when `whole` is zero.
#[inline]
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

/// Truncate a string to max length with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
