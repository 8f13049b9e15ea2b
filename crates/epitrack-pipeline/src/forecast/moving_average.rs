//! Flat forecast from a seven-day trailing mean.

use crate::forecast::stats::trailing_mean;

pub const WINDOW: usize = 7;

/// Last trailing-mean value and the residuals against the trailing mean.
///
/// Returns `None` for an empty history.
#[must_use]
pub fn fit(values: &[f64]) -> Option<(f64, Vec<f64>)> {
    let smoothed = trailing_mean(values, WINDOW);
    let last = *smoothed.last()?;
    let residuals = values.iter().zip(&smoothed).map(|(y, m)| y - m).collect();
    Some((last, residuals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_has_zero_residual() {
        let (level, residuals) = fit(&[2.0]).unwrap();
        assert_eq!(level, 2.0);
        assert_eq!(residuals, vec![0.0]);
    }

    #[test]
    fn level_is_mean_of_last_week() {
        let values = [100.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let (level, _) = fit(&values).unwrap();
        assert!((level - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_history_has_no_fit() {
        assert!(fit(&[]).is_none());
    }
}
