use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("column \"{0}\" not found in input")]
    MissingColumn(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The ground-truth side of an evaluation had no tags, so neither a period
    /// nor a score denominator exists.
    #[error("cannot evaluate prediction: ground-truth trends are empty")]
    EmptyGroundTruth,
}

impl From<tagtrend_core::ConfigError> for EngineError {
    fn from(err: tagtrend_core::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}
