use thiserror::Error;

/// Why a forecasting strategy could not produce a forecast.
///
/// These never leave the forecast engine: the next strategy is tried instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("strategy does not apply: {0}")]
    NotApplicable(&'static str),

    #[error("need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("optimizer produced a non-finite objective")]
    NonFiniteObjective,

    #[error("model produced a non-finite forecast")]
    NonFiniteForecast,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("disease {disease} has an empty daily series")]
    EmptySeries { disease: String },
}
