//! Forecast engine: an ordered list of strategies, first fit wins.

mod holt_winters;
mod moving_average;
mod optimize;
pub mod stats;

use epitrack_core::{Horizon, ModelKind};

use crate::error::FitError;

/// z-score of the symmetric 95% interval.
pub const Z_95: f64 = 1.96;

/// Minimum history before Holt-Winters is attempted.
pub const HOLT_WINTERS_MIN_DAYS: usize = 10;

/// Minimum history before the weekly seasonal component is added.
pub const SEASONAL_MIN_DAYS: usize = 21;

pub const SEASONAL_PERIOD: usize = 7;

/// A forecasting strategy. [`Strategy::ORDER`] is the order they are tried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Zero,
    HoltWinters,
    MovingAverage,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [Strategy::Zero, Strategy::HoltWinters, Strategy::MovingAverage];

    #[must_use]
    pub fn model(self) -> ModelKind {
        match self {
            Strategy::Zero => ModelKind::Zero,
            Strategy::HoltWinters => ModelKind::HoltWinters,
            Strategy::MovingAverage => ModelKind::MovingAverage,
        }
    }

    /// Fit this strategy to `values` and forecast `horizon` days.
    ///
    /// # Errors
    ///
    /// Returns [`FitError`] when the strategy does not apply to this history
    /// or fitting fails; the caller moves on to the next strategy.
    pub fn fit(self, values: &[f64], horizon: Horizon) -> Result<ModelForecast, FitError> {
        let steps = horizon.steps();
        match self {
            Strategy::Zero => {
                if values.iter().all(|v| *v == 0.0) {
                    Ok(ModelForecast::zero(steps))
                } else {
                    Err(FitError::NotApplicable("history has non-zero values"))
                }
            }
            Strategy::HoltWinters => {
                if values.len() < HOLT_WINTERS_MIN_DAYS {
                    return Err(FitError::InsufficientData {
                        needed: HOLT_WINTERS_MIN_DAYS,
                        got: values.len(),
                    });
                }
                let period = (values.len() >= SEASONAL_MIN_DAYS).then_some(SEASONAL_PERIOD);
                let fit = holt_winters::fit_additive(values, period, steps)?;
                let sigma = stats::residual_sigma(&fit.residuals(values));
                Ok(ModelForecast::with_interval(
                    ModelKind::HoltWinters,
                    fit.forecast,
                    sigma,
                ))
            }
            Strategy::MovingAverage => {
                let (level, residuals) =
                    moving_average::fit(values).ok_or(FitError::InsufficientData {
                        needed: 1,
                        got: 0,
                    })?;
                let sigma = stats::residual_sigma(&residuals);
                Ok(ModelForecast::with_interval(
                    ModelKind::MovingAverage,
                    vec![level; steps],
                    sigma,
                ))
            }
        }
    }
}

/// Point forecast and 95% interval for one disease, all clipped at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    pub model: ModelKind,
    pub forecast: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ModelForecast {
    #[must_use]
    pub fn zero(steps: usize) -> Self {
        Self {
            model: ModelKind::Zero,
            forecast: vec![0.0; steps],
            lower: vec![0.0; steps],
            upper: vec![0.0; steps],
        }
    }

    /// Build `point ± 1.96 σ` and clip everything at zero.
    ///
    /// A negative or non-finite `sigma` is treated as zero so that
    /// `lower <= forecast <= upper` always holds.
    #[must_use]
    pub fn with_interval(model: ModelKind, point: Vec<f64>, sigma: f64) -> Self {
        let half = if sigma.is_finite() && sigma > 0.0 {
            Z_95 * sigma
        } else {
            0.0
        };
        let lower = point.iter().map(|f| (f - half).max(0.0)).collect();
        let upper = point.iter().map(|f| (f + half).max(0.0)).collect();
        let forecast = point.into_iter().map(|f| f.max(0.0)).collect();
        Self {
            model,
            forecast,
            lower,
            upper,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }
}

/// Forecast a dense daily series with the first strategy that fits.
///
/// Never fails: if every strategy is rejected the forecast is flat zero.
#[must_use]
pub fn forecast_series(values: &[f64], horizon: Horizon) -> ModelForecast {
    for strategy in Strategy::ORDER {
        match strategy.fit(values, horizon) {
            Ok(forecast) => return forecast,
            Err(err) => {
                tracing::debug!(strategy = ?strategy, error = %err, "strategy skipped");
            }
        }
    }
    ModelForecast::zero(horizon.steps())
}
