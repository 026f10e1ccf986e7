//! Value-frequency tables for categorical columns.

use crate::dataset::Dataset;
use crate::error::{InsightError, Result};
use crate::types::{FrequencyEntry, FrequencyTable};
use crate::utils::{percentage, round_to};
use std::collections::HashMap;

/// Categorical frequency engine.
pub struct FrequencyAnalyzer;

impl FrequencyAnalyzer {
    /// Count values of a categorical column, most frequent first, keeping at
    /// most `top_n` entries.
    ///
    /// Equal counts keep first-appearance order. Percentages use the total row
    /// count (nulls included) as denominator.
    pub fn frequency_table(dataset: &Dataset, name: &str, top_n: usize) -> Result<FrequencyTable> {
        let class = dataset.type_class(name)?;
        if class.is_numeric() {
            return Err(InsightError::invalid_column(
                name,
                "expected a categorical column, found a numeric one",
            ));
        }
        dataset.ensure_not_empty()?;

        let total_rows = dataset.height();
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for value in dataset.text_values(name)?.into_iter().flatten() {
            match positions.get(&value) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    positions.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }

        let distinct_values = counts.len();
        // sort_by is stable, so ties stay in first-appearance order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(top_n);

        let entries = counts
            .into_iter()
            .map(|(value, count)| FrequencyEntry {
                value,
                count,
                percentage: round_to(percentage(count, total_rows).unwrap_or(0.0), 2),
            })
            .collect();

        Ok(FrequencyTable {
            column: name.to_string(),
            total_rows,
            distinct_values,
            entries,
        })
    }
}
