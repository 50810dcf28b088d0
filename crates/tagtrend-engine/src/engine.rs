//! Config-bound entry point tying the individual transforms together.

use tagtrend_core::TrendsConfig;

use crate::aggregate::{count_tags_by_country, weekly_totals, TagCountParams};
use crate::error::EngineError;
use crate::evaluate::{evaluate_prediction, latest_trending};
use crate::filter::filter_rows;
use crate::normalize::dedupe_tags;
use crate::reshape::{long_to_wide, wide_to_long, WideMatrix};
use crate::table::Table;
use crate::types::{Evaluation, PeriodFrequency, PredictedTag, TrendRow};

/// Runs each pipeline transform with the parameters from one [`TrendsConfig`].
///
/// Holds no state besides the configuration; every call is an independent
/// batch transform.
#[derive(Debug, Clone)]
pub struct TrendEngine {
    config: TrendsConfig,
}

impl TrendEngine {
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration fails validation.
    pub fn new(config: TrendsConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &TrendsConfig {
        &self.config
    }

    /// Keep the configured columns and countries, dropping incomplete rows.
    ///
    /// # Errors
    ///
    /// See [`filter_rows`].
    pub fn filter(&self, raw: &Table) -> Result<Table, EngineError> {
        filter_rows(raw, &self.config.data_columns, &self.config.countries)
    }

    /// Canonical tags of one video at the configured threshold.
    #[must_use]
    pub fn dedupe<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        dedupe_tags(tags, self.config.similarity_threshold)
    }

    /// Per-country counts of the top `tag_limit` tags in a filtered batch.
    ///
    /// # Errors
    ///
    /// See [`count_tags_by_country`].
    pub fn count_tags(&self, batch: &Table) -> Result<Vec<TrendRow>, EngineError> {
        let params = TagCountParams {
            countries: self.config.countries.clone(),
            top_n: self.config.tag_limit,
            similarity_threshold: self.config.similarity_threshold,
        };
        count_tags_by_country(batch, &params)
    }

    /// Per-country counts plus the country-summed weekly table.
    ///
    /// # Errors
    ///
    /// See [`count_tags_by_country`].
    pub fn weekly_trends(
        &self,
        batch: &Table,
    ) -> Result<(Vec<TrendRow>, Vec<PeriodFrequency>), EngineError> {
        let by_country = self.count_tags(batch)?;
        let totals = weekly_totals(&by_country);
        Ok((by_country, totals))
    }

    /// Forecasting input: the full weekly history as a tag × period matrix.
    ///
    /// # Errors
    ///
    /// See [`long_to_wide`].
    pub fn training_matrix(&self, history: &[PeriodFrequency]) -> Result<WideMatrix, EngineError> {
        long_to_wide(history)
    }

    /// Frequencies of the `evolution_top_n` tags over the last
    /// `evolution_weeks` periods.
    ///
    /// # Errors
    ///
    /// See [`long_to_wide`].
    pub fn evolution(&self, history: &[PeriodFrequency]) -> Result<Vec<PeriodFrequency>, EngineError> {
        let window = long_to_wide(history)?.latest_periods(self.config.evolution_weeks);
        Ok(wide_to_long(&window, self.config.evolution_top_n))
    }

    /// Score a prediction against the latest `evaluation_sample` trending rows.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyGroundTruth`] if `history` is empty.
    pub fn evaluate(
        &self,
        history: &[PeriodFrequency],
        predicted: &[PredictedTag],
    ) -> Result<Evaluation, EngineError> {
        let actual = latest_trending(history, self.config.evaluation_sample);
        evaluate_prediction(&actual, predicted)
    }
}
