//! Weekly pipeline steps over the table store.
//!
//! Each step logs its outcome and appends a [`RunRecord`]; errors are
//! propagated so the caller decides whether to abort.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tagtrend_engine::{period_label, Evaluation, PeriodFrequency, PredictedTag, TrendEngine, TrendRow};

use crate::store::{
    TableStore, EVALUATIONS, LAST_PREDICTION, LAST_WEEK, NEW_PREDICTION, RUNS, TEN_WEEKS_TRENDS,
    TRAINING_MATRIX, WEEKLY_TRENDS, WEEKLY_TRENDS_COUNTRY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Succeeded,
    Failed,
}

/// One executed pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub step: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    pub error: Option<String>,
}

/// `WEEKLY_TRENDS_COUNTRY` row; the per-tag total is not stored.
#[derive(Debug, Serialize, Deserialize, Clone)]
struct CountryTrend {
    periodo: String,
    etiquetas: String,
    pais: String,
    frecuencias: u64,
}

impl From<&TrendRow> for CountryTrend {
    fn from(row: &TrendRow) -> Self {
        Self {
            periodo: row.period.clone(),
            etiquetas: row.tag.clone(),
            pais: row.country.clone(),
            frecuencias: row.frequency,
        }
    }
}

pub struct WeeklyFlow {
    engine: TrendEngine,
    store: TableStore,
}

impl WeeklyFlow {
    pub fn new(engine: TrendEngine, store: TableStore) -> Self {
        Self { engine, store }
    }

    /// Filter a bronze table into the `last_week` and dated silver partitions.
    ///
    /// Returns the period label of the refined batch.
    pub fn refine(&self, input: &Path) -> anyhow::Result<String> {
        self.run_step("refine", || {
            let raw = TableStore::read_bronze(input)?;
            let refined = self.engine.filter(&raw)?;
            let dates = refined.column("snapshot_date")?;
            let period = period_label(dates.into_iter().flatten())
                .context("no rows left after filtering")?;

            self.store.write_silver(LAST_WEEK, &refined)?;
            self.store.write_silver(&period, &refined)?;
            tracing::info!(rows = refined.len(), period = %period, "refined bronze data into silver");
            Ok(period)
        })
    }

    /// Aggregate the latest silver batch into the weekly gold tables.
    ///
    /// Rows already stored for the batch's period are replaced, so the step
    /// can be re-run on the same batch.
    pub fn trends(&self) -> anyhow::Result<Vec<PeriodFrequency>> {
        self.run_step("trends", || {
            let batch = self.store.read_silver(LAST_WEEK)?;
            let (by_country, totals) = self.engine.weekly_trends(&batch)?;
            let Some(period) = by_country.first().map(|row| row.period.clone()) else {
                tracing::warn!("latest batch produced no tags, weekly trends unchanged");
                return Ok(totals);
            };

            let country_rows: Vec<CountryTrend> = by_country.iter().map(CountryTrend::from).collect();
            self.store
                .replace_gold(WEEKLY_TRENDS_COUNTRY, &country_rows, |row: &CountryTrend| {
                    row.periodo == period
                })?;
            self.store
                .replace_gold(WEEKLY_TRENDS, &totals, |row: &PeriodFrequency| row.period == period)?;
            tracing::info!(tags = totals.len(), period = %period, "updated weekly trends");
            Ok(totals)
        })
    }

    /// Rebuild the tag × period training matrix from the weekly history.
    pub fn matrix(&self) -> anyhow::Result<()> {
        self.run_step("matrix", || {
            let history: Vec<PeriodFrequency> = self.store.read_gold(WEEKLY_TRENDS)?;
            let matrix = self.engine.training_matrix(&history)?;
            self.store.overwrite_gold(TRAINING_MATRIX, &matrix)?;
            tracing::info!(
                tags = matrix.tags().len(),
                periods = matrix.periods().len(),
                "rebuilt training matrix"
            );
            Ok(())
        })
    }

    /// Rebuild the evolution report of the top tags over recent weeks.
    pub fn evolution(&self) -> anyhow::Result<()> {
        self.run_step("evolution", || {
            let history: Vec<PeriodFrequency> = self.store.read_gold(WEEKLY_TRENDS)?;
            let evolution = self.engine.evolution(&history)?;
            self.store.overwrite_gold(TEN_WEEKS_TRENDS, &evolution)?;
            tracing::info!(rows = evolution.len(), "rebuilt trend evolution");
            Ok(())
        })
    }

    /// Replace the last prediction with the newest one.
    pub fn promote(&self) -> anyhow::Result<()> {
        self.run_step("promote", || {
            let newest: Vec<PredictedTag> = self.store.read_gold(NEW_PREDICTION)?;
            self.store.overwrite_gold(LAST_PREDICTION, &newest)?;
            tracing::info!(tags = newest.len(), "promoted new prediction");
            Ok(())
        })
    }

    /// Score the last prediction against the latest weekly trends.
    ///
    /// Returns `None` when there is no prediction to score yet.
    pub fn evaluate(&self) -> anyhow::Result<Option<Evaluation>> {
        self.run_step("evaluate", || {
            let predicted: Vec<PredictedTag> = self.store.read_gold(LAST_PREDICTION)?;
            if predicted.is_empty() {
                tracing::warn!("no last prediction stored, skipping evaluation");
                return Ok(None);
            }
            let history: Vec<PeriodFrequency> = self.store.read_gold(WEEKLY_TRENDS)?;
            let evaluation = self.engine.evaluate(&history, &predicted)?;
            self.store.append_gold(EVALUATIONS, std::slice::from_ref(&evaluation))?;
            tracing::info!(period = %evaluation.period, score = evaluation.score, "evaluated last prediction");
            Ok(Some(evaluation))
        })
    }

    /// Full weekly run: refine, aggregate, score last week's forecast, and
    /// rebuild the evolution report and training matrix.
    pub fn weekly(&self, input: &Path) -> anyhow::Result<()> {
        let period = self.refine(input)?;
        self.trends()?;
        self.promote()?;
        self.evaluate()?;
        self.evolution()?;
        self.matrix()?;
        tracing::info!(period = %period, "weekly run complete");
        Ok(())
    }

    fn run_step<T, F>(&self, step: &str, body: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        let started_at = Utc::now();
        let result = body();
        let (status, error) = match &result {
            Ok(_) => (RunStatus::Succeeded, None),
            Err(e) => {
                tracing::error!(step, error = %format!("{e:#}"), "pipeline step failed");
                (RunStatus::Failed, Some(format!("{e:#}")))
            }
        };
        let record = RunRecord {
            step: step.to_string(),
            started_at,
            finished_at: Utc::now(),
            status,
            error,
        };
        if let Err(e) = self.store.append_gold(RUNS, std::slice::from_ref(&record)) {
            tracing::warn!(step, error = %e, "failed to record run");
        }
        result
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;
