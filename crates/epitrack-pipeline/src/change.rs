//! Percentage-change rule shared by the trend classifier and hotzones.

use crate::forecast::stats::mean;

/// Round to three decimals, the precision of every published summary field.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Relative change of `current` against `baseline`.
///
/// A zero (or negative) baseline has no meaningful ratio: any positive
/// current value counts as a full `1.0` increase, otherwise `0.0`.
#[must_use]
pub fn pct_change(baseline: f64, current: f64) -> f64 {
    if baseline > 0.0 {
        (current - baseline) / baseline
    } else if current > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Window sizes and threshold for one flavour of the change rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRule {
    pub baseline_window: usize,
    pub comparison_window: usize,
    /// Strictly-greater-than threshold on the rounded percentage.
    pub threshold: f64,
}

/// Rounded means, percentage and whether the threshold was crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeVerdict {
    pub baseline_mean: f64,
    pub comparison_mean: f64,
    pub pct_change: f64,
    pub exceeds: bool,
}

impl ChangeRule {
    /// Observed last week against the `horizon`-day forecast.
    #[must_use]
    pub fn trend(horizon_steps: usize) -> Self {
        Self {
            baseline_window: 7,
            comparison_window: horizon_steps,
            threshold: 0.15,
        }
    }

    /// Last week against the week before it.
    #[must_use]
    pub fn hotzone() -> Self {
        Self {
            baseline_window: 7,
            comparison_window: 7,
            threshold: 0.30,
        }
    }

    /// Compare the means of two already-selected windows.
    #[must_use]
    pub fn evaluate(&self, baseline: &[f64], comparison: &[f64]) -> ChangeVerdict {
        let baseline_mean = mean(baseline);
        let comparison_mean = mean(comparison);
        let pct = round3(pct_change(baseline_mean, comparison_mean));
        ChangeVerdict {
            baseline_mean: round3(baseline_mean),
            comparison_mean: round3(comparison_mean),
            pct_change: pct,
            exceeds: pct > self.threshold,
        }
    }

    /// Baseline from the tail of `history`, comparison from `ahead`.
    #[must_use]
    pub fn evaluate_tail(&self, history: &[f64], ahead: &[f64]) -> ChangeVerdict {
        let start = history.len().saturating_sub(self.baseline_window);
        self.evaluate(&history[start..], ahead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_change_zero_baseline_rules() {
        assert_eq!(pct_change(0.0, 3.0), 1.0);
        assert_eq!(pct_change(0.0, 0.0), 0.0);
        assert_eq!(pct_change(2.0, 3.0), 0.5);
        assert_eq!(pct_change(2.0, 1.0), -0.5);
    }

    #[test]
    fn round3_half_away_from_zero() {
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round3(2.0), 2.0);
        assert_eq!(round3(-0.0996), -0.1);
    }

    #[test]
    fn threshold_is_strict() {
        let rule = ChangeRule::trend(7);
        let at = rule.evaluate(&[20.0], &[23.0]);
        assert_eq!(at.pct_change, 0.15);
        assert!(!at.exceeds);

        let above = rule.evaluate(&[20.0], &[23.1]);
        assert!(above.exceeds);
    }

    #[test]
    fn tail_uses_at_most_seven_history_values() {
        let rule = ChangeRule::trend(2);
        let history = [100.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let v = rule.evaluate_tail(&history, &[1.0, 1.0]);
        assert_eq!(v.baseline_mean, 1.0);
        assert_eq!(v.pct_change, 0.0);
    }

    #[test]
    fn empty_baseline_counts_as_full_rise() {
        let v = ChangeRule::hotzone().evaluate(&[], &[0.0, 4.0]);
        assert_eq!(v.baseline_mean, 0.0);
        assert_eq!(v.comparison_mean, 2.0);
        assert_eq!(v.pct_change, 1.0);
        assert!(v.exceeds);
    }
}
