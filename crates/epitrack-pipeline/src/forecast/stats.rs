//! Small numeric helpers shared by the forecasting strategies.

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}

/// Sample standard deviation (`n - 1` denominator).
///
/// Returns `NaN` for fewer than two values, matching the usual ddof=1 convention.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let denom = (values.len() - 1) as f64;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / denom;
    var.sqrt()
}

/// Residual spread used for the 95% interval. Non-finite spreads collapse to zero.
#[must_use]
pub fn residual_sigma(residuals: &[f64]) -> f64 {
    let sigma = sample_std(residuals);
    if sigma.is_finite() {
        sigma
    } else {
        0.0
    }
}

/// Trailing mean over up to `window` values ending at each position.
///
/// Early positions average whatever history exists, so the output always has
/// the same length as the input.
#[must_use]
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        #[allow(clippy::cast_precision_loss)]
        let count = (i + 1).min(window) as f64;
        out.push(sum / count);
    }
    out
}
