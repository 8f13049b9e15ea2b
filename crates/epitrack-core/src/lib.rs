//! Shared domain types and configuration for the EpiTrack pipeline.
//!
//! Every other crate in the workspace depends on this one: it owns the record
//! shapes that flow between pipeline stages, the forecast [`Horizon`], the
//! immutable [`DiseaseCatalogue`], and environment-driven [`AppConfig`].

pub mod app_config;
pub mod catalogue;
pub mod config;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalogue::{
    load_catalogue, CatalogueFile, CountryConfig, DiseaseCatalogue, DiseaseConfig, DiseasePattern,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    Article, DailySeriesPoint, DiseaseSummary, ForecastPoint, GeoPoint, Horizon, HotzoneSummary,
    KeywordTokens, MentionRecord, ModelKind, SENTIMENT_PLACEHOLDER, SOURCE_RELIABILITY_PLACEHOLDER,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("forecast horizon must be between 1 and 3650 days, got {0}")]
    InvalidHorizon(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalogue file {path}: {source}")]
    CatalogueFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue file: {0}")]
    CatalogueFileParse(#[from] serde_yaml::Error),

    #[error("invalid pattern for disease '{disease}': {source}")]
    InvalidPattern {
        disease: String,
        #[source]
        source: regex::Error,
    },

    #[error("catalogue validation failed: {0}")]
    Validation(String),
}
