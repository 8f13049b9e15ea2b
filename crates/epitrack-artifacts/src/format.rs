//! Cell formatting shared by every table.

use chrono::NaiveDate;

/// Floats keep a trailing `.0` when integral (`2.0`, not `2`); other values
/// use the shortest representation that round-trips. `NaN` is an empty cell.
#[must_use]
pub fn float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[must_use]
pub fn optional_float(value: Option<f64>) -> String {
    value.map(float).unwrap_or_default()
}

#[must_use]
pub fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[must_use]
pub fn boolean(value: bool) -> String {
    String::from(if value { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        assert_eq!(float(2.0), "2.0");
        assert_eq!(float(0.0), "0.0");
        assert_eq!(float(-0.5), "-0.5");
        assert_eq!(float(0.333), "0.333");
        assert_eq!(float(f64::NAN), "");
        assert_eq!(optional_float(None), "");
        assert_eq!(optional_float(Some(36.2048)), "36.2048");
    }

    #[test]
    fn dates_and_booleans() {
        assert_eq!(date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()), "2024-01-02");
        assert_eq!(boolean(true), "true");
        assert_eq!(boolean(false), "false");
    }
}
