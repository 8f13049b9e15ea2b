//! Folding mentions into dense per-disease daily series.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use epitrack_core::{
    DailySeriesPoint, MentionRecord, SENTIMENT_PLACEHOLDER, SOURCE_RELIABILITY_PLACEHOLDER,
};

/// One disease's daily mention totals, gap-free from `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseSeries {
    pub disease_name: String,
    pub start: NaiveDate,
    /// `values[i]` is the total for `start + i` days.
    pub values: Vec<f64>,
}

impl DiseaseSeries {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.values.len())
    }

    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        offset(self.start, self.values.len().saturating_sub(1))
    }

    /// Rows for the clean time-series table.
    #[must_use]
    pub fn to_points(&self) -> Vec<DailySeriesPoint> {
        self.dates()
            .zip(&self.values)
            .map(|(date, &mention_count)| DailySeriesPoint {
                date,
                disease_name: self.disease_name.clone(),
                mention_count,
                sentiment_score: SENTIMENT_PLACEHOLDER,
                source_reliability: SOURCE_RELIABILITY_PLACEHOLDER,
            })
            .collect()
    }
}

/// `date + days`, saturating at the calendar maximum.
pub(crate) fn offset(date: NaiveDate, days: usize) -> NaiveDate {
    u64::try_from(days)
        .ok()
        .and_then(|d| date.checked_add_days(Days::new(d)))
        .unwrap_or(NaiveDate::MAX)
}

/// Zero-filled values for every day of `[start, end]`.
pub(crate) fn densify(totals: &BTreeMap<NaiveDate, f64>, start: NaiveDate, end: NaiveDate) -> Vec<f64> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| totals.get(&d).copied().unwrap_or(0.0))
        .collect()
}

/// Sum mentions per (disease, day) and zero-fill each disease over its own
/// first-to-last day range. Series come back sorted by disease name.
#[must_use]
pub fn aggregate_daily(mentions: &[MentionRecord]) -> Vec<DiseaseSeries> {
    let mut by_disease: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for m in mentions {
        *by_disease
            .entry(m.disease_name.as_str())
            .or_default()
            .entry(m.date)
            .or_default() += f64::from(m.mention_count);
    }

    let series: Vec<DiseaseSeries> = by_disease
        .into_iter()
        .filter_map(|(name, totals)| {
            let (&start, _) = totals.first_key_value()?;
            let (&end, _) = totals.last_key_value()?;
            Some(DiseaseSeries {
                disease_name: name.to_string(),
                start,
                values: densify(&totals, start, end),
            })
        })
        .collect();

    tracing::debug!(diseases = series.len(), "daily series aggregated");
    series
}
