//! Per-disease trend summary.

use std::cmp::Ordering;

use epitrack_core::DiseaseSummary;

use crate::change::{round3, ChangeRule};
use crate::forecast::stats::mean;
use crate::forecast::ModelForecast;

/// Build the summary row for one disease from its history and forecast.
#[must_use]
pub fn classify(disease_name: &str, history: &[f64], forecast: &ModelForecast) -> DiseaseSummary {
    let rule = ChangeRule::trend(forecast.len());
    let verdict = rule.evaluate_tail(history, &forecast.forecast);
    DiseaseSummary {
        disease_name: disease_name.to_string(),
        model_used: forecast.model,
        recent_actual_mean: verdict.baseline_mean,
        forecast_next_mean: verdict.comparison_mean,
        forecast_lower_95: round3(mean(&forecast.lower)),
        forecast_upper_95: round3(mean(&forecast.upper)),
        pct_change_vs_recent: verdict.pct_change,
        is_rising: verdict.exceeds,
    }
}

/// Highest percentage change first; equal percentages by disease name.
pub fn sort_summaries(summaries: &mut [DiseaseSummary]) {
    summaries.sort_by(|a, b| {
        b.pct_change_vs_recent
            .partial_cmp(&a.pct_change_vs_recent)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.disease_name.cmp(&b.disease_name))
    });
}

/// Human-facing label for a summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendLabel {
    Rising,
    Stable,
    Declining,
}

impl TrendLabel {
    pub const DECLINE_THRESHOLD: f64 = -0.1;

    #[must_use]
    pub fn of(summary: &DiseaseSummary) -> Self {
        if summary.is_rising {
            Self::Rising
        } else if summary.pct_change_vs_recent < Self::DECLINE_THRESHOLD {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendLabel::Rising => "Rising",
            TrendLabel::Stable => "Stable",
            TrendLabel::Declining => "Declining",
        })
    }
}
