//! Per-country tag frequency aggregation over one weekly batch.

use std::collections::{HashMap, HashSet};

use crate::error::EngineError;
use crate::filter::COUNTRY_COLUMN;
use crate::normalize::{dedupe_tags, split_tags};
use crate::table::Table;
use crate::types::{PeriodFrequency, TrendRow};

pub const SNAPSHOT_DATE_COLUMN: &str = "snapshot_date";
pub const VIDEO_TAGS_COLUMN: &str = "video_tags";

/// Parameters for [`count_tags_by_country`].
#[derive(Debug, Clone, PartialEq)]
pub struct TagCountParams {
    /// Fixed country universe, in output order.
    pub countries: Vec<String>,
    /// Number of highest-total tags to emit.
    pub top_n: usize,
    /// Similarity threshold handed to [`dedupe_tags`] for each video.
    pub similarity_threshold: f64,
}

impl TagCountParams {
    fn validate(&self) -> Result<(), EngineError> {
        if self.countries.is_empty() {
            return Err(EngineError::Config("country list is empty".to_string()));
        }
        if !self.similarity_threshold.is_finite() {
            return Err(EngineError::Config(format!(
                "similarity threshold {} is not a finite number",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct TagCount {
    per_country: Vec<u64>,
    total: u64,
}

/// Build the `"<first> - <last>"` label for a batch of ISO snapshot dates.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] if `dates` yields nothing.
pub fn period_label<'a, I>(dates: I) -> Result<String, EngineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first: Option<&str> = None;
    let mut last: Option<&str> = None;
    for date in dates {
        if first.is_none_or(|f| date < f) {
            first = Some(date);
        }
        if last.is_none_or(|l| date > l) {
            last = Some(date);
        }
    }
    match (first, last) {
        (Some(first), Some(last)) => Ok(format!("{first} - {last}")),
        _ => Err(EngineError::EmptyInput(
            "no snapshot dates to derive a period from".to_string(),
        )),
    }
}

/// Count deduplicated tags per configured country and keep the `top_n` tags.
///
/// Each row's `video_tags` cell is split on `", "` and deduplicated on its own
/// before counting, so a video contributes at most one count per canonical
/// tag. Every tag carries a zero-filled slot for each configured country;
/// rows from other countries register their tags but add no counts.
///
/// Tags are ranked by total, descending, with ties kept in first-seen order.
/// The output holds one row per selected tag and configured country, in rank
/// order then country order, all stamped with the batch period.
///
/// # Errors
///
/// - [`EngineError::MissingColumn`] if `snapshot_date`, `country` or
///   `video_tags` is absent.
/// - [`EngineError::EmptyInput`] if the table has no rows or no dates.
/// - [`EngineError::Config`] if `params` is unusable.
pub fn count_tags_by_country(
    table: &Table,
    params: &TagCountParams,
) -> Result<Vec<TrendRow>, EngineError> {
    params.validate()?;

    let date_idx = table.column_index(SNAPSHOT_DATE_COLUMN)?;
    let country_idx = table.column_index(COUNTRY_COLUMN)?;
    let tags_idx = table.column_index(VIDEO_TAGS_COLUMN)?;

    if table.is_empty() {
        return Err(EngineError::EmptyInput("no rows to aggregate".to_string()));
    }

    let country_slot: HashMap<&str, usize> = params
        .countries
        .iter()
        .enumerate()
        .map(|(slot, code)| (code.as_str(), slot))
        .collect();

    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, TagCount> = HashMap::new();

    for row in table.rows() {
        let Some(raw_tags) = row[tags_idx].as_deref() else {
            continue;
        };
        let slot = row[country_idx]
            .as_deref()
            .and_then(|country| country_slot.get(country).copied());

        for tag in dedupe_tags(split_tags(raw_tags), params.similarity_threshold) {
            let key = tag.to_lowercase();
            if !counts.contains_key(&key) {
                first_seen.push(key.clone());
                counts.insert(
                    key.clone(),
                    TagCount {
                        per_country: vec![0; params.countries.len()],
                        total: 0,
                    },
                );
            }
            if let (Some(slot), Some(entry)) = (slot, counts.get_mut(&key)) {
                entry.per_country[slot] += 1;
                entry.total += 1;
            }
        }
    }

    let period = period_label(table.rows().iter().filter_map(|row| row[date_idx].as_deref()))?;

    let mut ranked: Vec<(&String, &TagCount)> = first_seen
        .iter()
        .filter_map(|tag| counts.get(tag).map(|count| (tag, count)))
        .collect();
    // sort_by is stable: equal totals keep first-seen order
    ranked.sort_by(|a, b| b.1.total.cmp(&a.1.total));
    ranked.truncate(params.top_n);

    let mut output = Vec::with_capacity(ranked.len() * params.countries.len());
    for (tag, count) in &ranked {
        for (country, frequency) in params.countries.iter().zip(&count.per_country) {
            output.push(TrendRow {
                period: period.clone(),
                tag: (*tag).clone(),
                country: country.clone(),
                frequency: *frequency,
                total: count.total,
            });
        }
    }

    tracing::debug!(
        rows = table.len(),
        distinct_tags = first_seen.len(),
        selected = ranked.len(),
        period = %period,
        "counted tags by country"
    );

    Ok(output)
}

/// Collapse a per-country trend table to one `(period, tag, total)` row per tag.
///
/// Rows keep the order in which each `(period, tag)` pair first appears, which
/// for [`count_tags_by_country`] output is rank order.
#[must_use]
pub fn weekly_totals(rows: &[TrendRow]) -> Vec<PeriodFrequency> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut output = Vec::new();
    for row in rows {
        if !seen.insert((row.period.as_str(), row.tag.as_str())) {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let total = row.total as f64;
        output.push(PeriodFrequency::new(row.period.clone(), row.tag.clone(), total));
    }
    output
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
