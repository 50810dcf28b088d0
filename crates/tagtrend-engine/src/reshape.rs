//! Long ↔ wide conversion of `(period, tag, frequency)` tables.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::EngineError;
use crate::types::PeriodFrequency;

/// Tag × period frequency matrix.
///
/// Rows are unique tags, columns are unique period labels. Cells that were
/// never observed hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideMatrix {
    tags: Vec<String>,
    periods: Vec<String>,
    /// `values[tag][period]`
    values: Vec<Vec<f64>>,
}

impl WideMatrix {
    /// Build a matrix from explicit labels and row-major values.
    ///
    /// Column order is taken as given; it is not re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] on duplicate labels or if `values` does
    /// not have one row per tag and one cell per period.
    pub fn new(
        tags: Vec<String>,
        periods: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, EngineError> {
        ensure_unique("tag", &tags)?;
        ensure_unique("period", &periods)?;
        if values.len() != tags.len() {
            return Err(EngineError::Schema(format!(
                "matrix has {} rows for {} tags",
                values.len(),
                tags.len()
            )));
        }
        if let Some((idx, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != periods.len())
        {
            return Err(EngineError::Schema(format!(
                "row for tag \"{}\" has {} cells, expected {}",
                tags[idx],
                row.len(),
                periods.len()
            )));
        }
        Ok(Self {
            tags,
            periods,
            values,
        })
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() || self.periods.is_empty()
    }

    /// Frequency of `tag` in `period`, if both labels exist.
    #[must_use]
    pub fn get(&self, tag: &str, period: &str) -> Option<f64> {
        let row = self.tags.iter().position(|t| t == tag)?;
        let col = self.periods.iter().position(|p| p == period)?;
        Some(self.values[row][col])
    }

    /// Keep only the last `n` period columns.
    ///
    /// Tags with no non-zero frequency in the kept window are dropped.
    #[must_use]
    pub fn latest_periods(&self, n: usize) -> WideMatrix {
        let start = self.periods.len().saturating_sub(n);
        let periods = self.periods[start..].to_vec();
        let mut tags = Vec::new();
        let mut values = Vec::new();
        for (tag, row) in self.tags.iter().zip(&self.values) {
            let window = &row[start..];
            if window.iter().any(|v| *v != 0.0) {
                tags.push(tag.clone());
                values.push(window.to_vec());
            }
        }
        WideMatrix {
            tags,
            periods,
            values,
        }
    }
}

fn ensure_unique(kind: &str, labels: &[String]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(EngineError::Schema(format!("duplicate {kind} \"{label}\"")));
        }
    }
    Ok(())
}

/// Pivot long rows into a tag × period matrix.
///
/// Period columns are sorted ascending (ISO labels sort chronologically). Tag
/// rows appear in the order they are first met while walking the periods in
/// that order, and rows within a period in input order. Missing combinations
/// are `0.0`.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] if a tag appears twice within one period.
pub fn long_to_wide(rows: &[PeriodFrequency]) -> Result<WideMatrix, EngineError> {
    ensure_single_cells(rows)?;

    let mut by_period: BTreeMap<&str, Vec<&PeriodFrequency>> = BTreeMap::new();
    for row in rows {
        by_period.entry(row.period.as_str()).or_default().push(row);
    }

    let periods: Vec<String> = by_period.keys().map(|p| (*p).to_string()).collect();
    let mut tag_row: HashMap<&str, usize> = HashMap::new();
    let mut tags: Vec<String> = Vec::new();
    let mut values: Vec<Vec<f64>> = Vec::new();

    for (col, period_rows) in by_period.values().enumerate() {
        for row in period_rows {
            let idx = *tag_row.entry(row.tag.as_str()).or_insert_with(|| {
                tags.push(row.tag.clone());
                values.push(vec![0.0; periods.len()]);
                tags.len() - 1
            });
            values[idx][col] = row.frequency;
        }
    }

    let matrix = WideMatrix::new(tags, periods, values)?;

    tracing::debug!(
        tags = matrix.tags.len(),
        periods = matrix.periods.len(),
        "pivoted long table to wide"
    );
    Ok(matrix)
}

fn ensure_single_cells(rows: &[PeriodFrequency]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert((row.period.as_str(), row.tag.as_str())) {
            return Err(EngineError::Schema(format!(
                "tag \"{}\" appears more than once in period \"{}\"",
                row.tag, row.period
            )));
        }
    }
    Ok(())
}

/// Unpivot the `top_n` highest-total tags of `matrix` back into long rows.
///
/// Tags are ranked once by their total across all periods (descending, ties
/// in row order). Rows are emitted period by period in the matrix's column
/// order, each period listing the same ranked tags. Totals are not emitted.
#[must_use]
pub fn wide_to_long(matrix: &WideMatrix, top_n: usize) -> Vec<PeriodFrequency> {
    let mut ranked: Vec<(usize, f64)> = matrix
        .values
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, row.iter().sum()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);

    let mut output = Vec::with_capacity(ranked.len() * matrix.periods.len());
    for (col, period) in matrix.periods.iter().enumerate() {
        for &(idx, _) in &ranked {
            output.push(PeriodFrequency::new(
                period.clone(),
                matrix.tags[idx].clone(),
                matrix.values[idx][col],
            ));
        }
    }

    tracing::debug!(
        tags = ranked.len(),
        periods = matrix.periods.len(),
        "unpivoted wide matrix to long"
    );
    output
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
