//! Scoring a tag forecast against the trends that actually happened.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::types::{Evaluation, PeriodFrequency, PredictedTag};

/// Take the most recent trending rows from a long history.
///
/// Rows are ordered by period descending, then frequency descending, and the
/// first `limit` are kept. With fewer than `limit` tags in the latest period
/// the sample spills into the previous one.
#[must_use]
pub fn latest_trending(history: &[PeriodFrequency], limit: usize) -> Vec<PeriodFrequency> {
    let mut rows = history.to_vec();
    rows.sort_by(|a, b| {
        b.period
            .cmp(&a.period)
            .then_with(|| b.frequency.total_cmp(&a.frequency))
    });
    rows.truncate(limit);
    rows
}

/// Score `predicted` against the observed trending rows in `actual`.
///
/// The score is the number of distinct predicted tags found among the actual
/// tags, divided by the number of actual rows. The period is read from the
/// first actual row.
///
/// # Errors
///
/// Returns [`EngineError::EmptyGroundTruth`] if `actual` is empty.
pub fn evaluate_prediction(
    actual: &[PeriodFrequency],
    predicted: &[PredictedTag],
) -> Result<Evaluation, EngineError> {
    let Some(first) = actual.first() else {
        return Err(EngineError::EmptyGroundTruth);
    };

    let observed: HashSet<&str> = actual.iter().map(|row| row.tag.as_str()).collect();
    let hits = predicted
        .iter()
        .map(|p| p.tag.as_str())
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|tag| observed.contains(tag))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let score = hits as f64 / actual.len() as f64;

    tracing::debug!(
        period = %first.period,
        hits,
        actual = actual.len(),
        predicted = predicted.len(),
        score,
        "evaluated prediction"
    );

    Ok(Evaluation {
        period: first.period.clone(),
        score,
    })
}
