//! Disease mention forecasting pipeline.
//!
//! Detects disease mentions in articles, folds them into dense daily series,
//! forecasts each disease over a fixed horizon with the first model that
//! fits, and classifies the trajectory. A country-level variant flags
//! hotzones with the same percentage-change rule.

pub mod aggregate;
pub mod change;
pub mod error;
pub mod extract;
pub mod forecast;
pub mod geo;
pub mod pipeline;
pub mod trend;

pub use aggregate::{aggregate_daily, DiseaseSeries};
pub use change::{pct_change, round3, ChangeRule, ChangeVerdict};
pub use error::{FitError, PipelineError};
pub use extract::{extract_all, extract_mentions};
pub use forecast::{forecast_series, ModelForecast, Strategy};
pub use geo::{compute_hotzones, geo_point, hotzones_for_country};
pub use pipeline::{forecast_disease, run_pipeline, DiseaseForecast, PipelineOutput};
pub use trend::{classify, sort_summaries, TrendLabel};
