//! Additive Holt-Winters exponential smoothing.
//!
//! Level and trend are always modelled; a weekly additive seasonal component
//! is added when the caller asks for one. Smoothing weights are chosen by
//! minimising the one-step-ahead squared error over the history.

use crate::error::FitError;
use crate::forecast::optimize::minimize_unit_box;

/// Smoothing weights. `gamma` is zero for non-seasonal fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Result of a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWintersFit {
    pub params: SmoothingParams,
    /// One-step-ahead predictions, aligned with the input.
    pub fitted: Vec<f64>,
    /// Point forecasts for the requested number of steps.
    pub forecast: Vec<f64>,
}

impl HoltWintersFit {
    /// `actual - fitted` for every observation.
    #[must_use]
    pub fn residuals(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(&self.fitted)
            .map(|(y, f)| y - f)
            .collect()
    }
}

/// Starting level, trend and seasonal offsets for the recursion.
///
/// The level is placed one step before the first observation so a series that
/// is exactly linear (plus a repeating season) is reproduced without error.
#[derive(Debug, Clone)]
struct InitialState {
    level: f64,
    trend: f64,
    season: Vec<f64>,
}

fn initial_state(values: &[f64], period: Option<usize>) -> InitialState {
    match period {
        Some(m) => {
            let first = super::stats::mean(&values[..m]);
            let second = super::stats::mean(&values[m..2 * m]);
            #[allow(clippy::cast_precision_loss)]
            let mf = m as f64;
            let trend = (second - first) / mf;
            let level = first - trend * (mf + 1.0) / 2.0;
            let season = values[..m]
                .iter()
                .enumerate()
                .map(|(i, y)| {
                    #[allow(clippy::cast_precision_loss)]
                    let steps = (i + 1) as f64;
                    y - (level + steps * trend)
                })
                .collect();
            InitialState {
                level,
                trend,
                season,
            }
        }
        None => {
            let trend = values[1] - values[0];
            InitialState {
                level: values[0] - trend,
                trend,
                season: Vec::new(),
            }
        }
    }
}

/// Run the recursion once, returning fitted values and the final state.
fn smooth(values: &[f64], init: &InitialState, p: SmoothingParams) -> (Vec<f64>, InitialState) {
    let m = init.season.len();
    let mut level = init.level;
    let mut trend = init.trend;
    let mut season = init.season.clone();
    let mut fitted = Vec::with_capacity(values.len());

    for (t, &y) in values.iter().enumerate() {
        let s = if m > 0 { season[t % m] } else { 0.0 };
        fitted.push(level + trend + s);

        let prev_level = level;
        level = p.alpha * (y - s) + (1.0 - p.alpha) * (level + trend);
        trend = p.beta * (level - prev_level) + (1.0 - p.beta) * trend;
        if m > 0 {
            season[t % m] = p.gamma * (y - level) + (1.0 - p.gamma) * s;
        }
    }

    (
        fitted,
        InitialState {
            level,
            trend,
            season,
        },
    )
}

fn sse(values: &[f64], fitted: &[f64]) -> f64 {
    values
        .iter()
        .zip(fitted)
        .map(|(y, f)| (y - f).powi(2))
        .sum()
}

fn params_from(point: &[f64]) -> SmoothingParams {
    SmoothingParams {
        alpha: point[0],
        beta: point[1],
        gamma: point.get(2).copied().unwrap_or(0.0),
    }
}

/// Fit the model and forecast `steps` days ahead.
///
/// `period` enables the additive seasonal component; the history must then
/// cover at least two full periods.
///
/// # Errors
///
/// Returns [`FitError`] when the history is too short, the optimizer never
/// sees a finite objective, or the forecast is not finite.
pub fn fit_additive(
    values: &[f64],
    period: Option<usize>,
    steps: usize,
) -> Result<HoltWintersFit, FitError> {
    let needed = period.map_or(2, |m| 2 * m.max(1));
    if values.len() < needed {
        return Err(FitError::InsufficientData {
            needed,
            got: values.len(),
        });
    }
    let period = period.filter(|&m| m > 1);

    let init = initial_state(values, period);
    let dims = if period.is_some() { 3 } else { 2 };
    let best = minimize_unit_box(dims, |point| {
        let (fitted, _) = smooth(values, &init, params_from(point));
        sse(values, &fitted)
    })
    .ok_or(FitError::NonFiniteObjective)?;

    let params = params_from(&best.point);
    let (fitted, last) = smooth(values, &init, params);
    let m = last.season.len();
    let n = values.len();

    let forecast: Vec<f64> = (1..=steps)
        .map(|h| {
            #[allow(clippy::cast_precision_loss)]
            let hf = h as f64;
            let s = if m > 0 { last.season[(n + h - 1) % m] } else { 0.0 };
            last.level + hf * last.trend + s
        })
        .collect();

    if forecast.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteForecast);
    }

    tracing::trace!(
        alpha = params.alpha,
        beta = params.beta,
        gamma = params.gamma,
        sse = best.value,
        "holt-winters parameters chosen"
    );

    Ok(HoltWintersFit {
        params,
        fitted,
        forecast,
    })
}

#[cfg(test)]
#[path = "holt_winters_test.rs"]
mod tests;
