use serde::{Deserialize, Serialize};

/// One `(period, tag, country)` count from a weekly aggregation.
///
/// `total` is the tag's count summed over every configured country, so it is
/// the same on each country row of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRow {
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "etiquetas")]
    pub tag: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "frecuencias")]
    pub frequency: u64,
    pub total: u64,
}

/// Long-form `(period, tag, frequency)` observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodFrequency {
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "etiquetas")]
    pub tag: String,
    #[serde(rename = "frecuencias")]
    pub frequency: f64,
}

impl PeriodFrequency {
    pub fn new(period: impl Into<String>, tag: impl Into<String>, frequency: f64) -> Self {
        Self {
            period: period.into(),
            tag: tag.into(),
            frequency,
        }
    }
}

/// A forecast tag with its predicted frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedTag {
    #[serde(rename = "etiquetas")]
    pub tag: String,
    #[serde(rename = "frecuencias")]
    pub frequency: f64,
}

/// Score of a prediction against the trends observed for `period`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "periodo")]
    pub period: String,
    /// Fraction of ground-truth rows whose tag was predicted, in `[0, 1]`.
    #[serde(rename = "evaluacion")]
    pub score: f64,
}
