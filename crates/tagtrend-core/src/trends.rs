use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Columns the aggregation step reads; every projection must keep them.
pub const REQUIRED_COLUMNS: [&str; 3] = ["snapshot_date", "country", "video_tags"];

/// Parameters for filtering, aggregating and reshaping one weekly batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsConfig {
    /// Columns kept by the row filter, in output order.
    pub data_columns: Vec<String>,
    /// The fixed country universe. Order drives the per-country output order.
    #[serde(alias = "paises")]
    pub countries: Vec<String>,
    /// Tags whose match ratio exceeds this value are merged.
    #[serde(alias = "porc_similitud")]
    pub similarity_threshold: f64,
    /// Number of top tags kept per weekly aggregation.
    #[serde(alias = "num_etiquetas")]
    pub tag_limit: usize,
    /// Number of top tags kept in the evolution report.
    #[serde(alias = "top_n")]
    pub evolution_top_n: usize,
    #[serde(default = "default_evolution_weeks")]
    pub evolution_weeks: usize,
    /// Rows of the latest weekly trends used as ground truth when evaluating.
    #[serde(default = "default_evaluation_sample")]
    pub evaluation_sample: usize,
}

fn default_evolution_weeks() -> usize {
    10
}

fn default_evaluation_sample() -> usize {
    30
}

/// Load and validate the trends configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_trends_config(path: &Path) -> Result<TrendsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_trends_config(&content)
}

/// Parse and validate a trends configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_trends_config(yaml: &str) -> Result<TrendsConfig, ConfigError> {
    let config: TrendsConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

impl TrendsConfig {
    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_columns.is_empty() {
            return Err(ConfigError::Validation(
                "data_columns must not be empty".to_string(),
            ));
        }
        let mut seen_columns = HashSet::new();
        for column in &self.data_columns {
            if !seen_columns.insert(column.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate data column: '{column}'"
                )));
            }
        }
        for required in REQUIRED_COLUMNS {
            if !seen_columns.contains(required) {
                return Err(ConfigError::Validation(format!(
                    "data_columns must include '{required}'"
                )));
            }
        }

        if self.countries.is_empty() {
            return Err(ConfigError::Validation(
                "countries must not be empty".to_string(),
            ));
        }
        let mut seen_countries = HashSet::new();
        for country in &self.countries {
            if country.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "country codes must be non-empty".to_string(),
                ));
            }
            if !seen_countries.insert(country.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate country: '{country}'"
                )));
            }
        }

        if !self.similarity_threshold.is_finite()
            || self.similarity_threshold <= 0.0
            || self.similarity_threshold > 1.0
        {
            return Err(ConfigError::Validation(format!(
                "similarity_threshold {} must be in (0, 1]",
                self.similarity_threshold
            )));
        }

        for (name, value) in [
            ("tag_limit", self.tag_limit),
            ("evolution_top_n", self.evolution_top_n),
            ("evolution_weeks", self.evolution_weeks),
            ("evaluation_sample", self.evaluation_sample),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "trends_test.rs"]
mod tests;
