//! One full batch: extract, aggregate, forecast, classify, regionalise.

use epitrack_core::{
    Article, DailySeriesPoint, DiseaseCatalogue, DiseaseSummary, ForecastPoint, GeoPoint,
    Horizon, HotzoneSummary, ModelKind,
};
use rayon::prelude::*;

use crate::aggregate::{aggregate_daily, offset, DiseaseSeries};
use crate::error::PipelineError;
use crate::extract::extract_mentions;
use crate::forecast::forecast_series;
use crate::geo::{compute_hotzones, geo_point};
use crate::trend::{classify, sort_summaries};

/// Forecast rows and summary for one disease.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseForecast {
    pub disease_name: String,
    pub model: ModelKind,
    pub points: Vec<ForecastPoint>,
    pub summary: DiseaseSummary,
}

/// Every table produced by one run, already in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub mention_count: usize,
    /// Diseases by name, dates ascending.
    pub series: Vec<DailySeriesPoint>,
    /// Diseases by name, dates ascending.
    pub forecasts: Vec<ForecastPoint>,
    /// Percentage change descending, then name.
    pub summaries: Vec<DiseaseSummary>,
    /// Article order.
    pub geo_points: Vec<GeoPoint>,
    pub hotzones: Vec<HotzoneSummary>,
}

/// Forecast one disease's series and summarise it.
///
/// # Errors
///
/// Returns [`PipelineError::EmptySeries`] if the series has no observations.
pub fn forecast_disease(
    series: &DiseaseSeries,
    horizon: Horizon,
) -> Result<DiseaseForecast, PipelineError> {
    if series.values.is_empty() {
        return Err(PipelineError::EmptySeries {
            disease: series.disease_name.clone(),
        });
    }

    let fc = forecast_series(&series.values, horizon);
    tracing::debug!(
        disease = %series.disease_name,
        days = series.values.len(),
        model = %fc.model,
        "forecast fitted"
    );

    let first_future = offset(series.last_date(), 1);
    let points = (0..fc.len())
        .map(|i| ForecastPoint {
            date: offset(first_future, i),
            disease_name: series.disease_name.clone(),
            forecast: fc.forecast[i],
            lower_95: fc.lower[i],
            upper_95: fc.upper[i],
        })
        .collect();
    let summary = classify(&series.disease_name, &series.values, &fc);

    Ok(DiseaseForecast {
        disease_name: series.disease_name.clone(),
        model: fc.model,
        points,
        summary,
    })
}

/// Run the whole pipeline over `articles`.
///
/// Diseases are forecast in parallel; output order does not depend on
/// scheduling. No mentions is not an error: every table is simply empty.
///
/// # Errors
///
/// Returns [`PipelineError::EmptySeries`] if a disease ends up with an
/// empty series.
pub fn run_pipeline(
    articles: &[Article],
    catalogue: &DiseaseCatalogue,
    horizon: Horizon,
) -> Result<PipelineOutput, PipelineError> {
    let mut mentions = Vec::new();
    let mut geo_points = Vec::new();
    for article in articles {
        for mention in extract_mentions(article, catalogue) {
            geo_points.push(geo_point(&mention, article.country.as_deref(), catalogue));
            mentions.push(mention);
        }
    }

    if mentions.is_empty() {
        tracing::warn!(articles = articles.len(), "no disease mentions found");
        return Ok(PipelineOutput::default());
    }

    let daily = aggregate_daily(&mentions);
    let forecasts: Vec<DiseaseForecast> = daily
        .par_iter()
        .map(|s| forecast_disease(s, horizon))
        .collect::<Result<_, _>>()?;

    let series = daily.iter().flat_map(DiseaseSeries::to_points).collect();
    let mut summaries: Vec<DiseaseSummary> =
        forecasts.iter().map(|f| f.summary.clone()).collect();
    sort_summaries(&mut summaries);
    let forecast_rows = forecasts.into_iter().flat_map(|f| f.points).collect();
    let hotzones = compute_hotzones(&geo_points);

    let rising = summaries.iter().filter(|s| s.is_rising).count();
    tracing::info!(
        articles = articles.len(),
        mentions = mentions.len(),
        diseases = daily.len(),
        rising,
        horizon = %horizon,
        "pipeline run complete"
    );

    Ok(PipelineOutput {
        mention_count: mentions.len(),
        series,
        forecasts: forecast_rows,
        summaries,
        geo_points,
        hotzones,
    })
}
