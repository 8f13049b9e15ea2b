//! Country tagging and hotzone detection.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use epitrack_core::{DiseaseCatalogue, GeoPoint, HotzoneSummary, MentionRecord};

use crate::change::ChangeRule;

/// A country needs this many distinct mention days before it is assessed.
pub const MIN_COUNTRY_DAYS: usize = 10;

/// Tag a mention with its article's country and, when known, coordinates.
///
/// Blank country strings are treated as missing.
#[must_use]
pub fn geo_point(
    mention: &MentionRecord,
    country: Option<&str>,
    catalogue: &DiseaseCatalogue,
) -> GeoPoint {
    let country = country.map(str::trim).filter(|c| !c.is_empty());
    let coords = country.and_then(|c| catalogue.coordinates(c));
    GeoPoint {
        date: mention.date,
        disease_name: mention.disease_name.clone(),
        country: country.map(str::to_string),
        lat: coords.map(|(lat, _)| lat),
        lon: coords.map(|(_, lon)| lon),
        mention_count: mention.mention_count,
    }
}

/// Hotzones for every country present in `points`, sorted by country and
/// then by descending percentage change.
#[must_use]
pub fn compute_hotzones(points: &[GeoPoint]) -> Vec<HotzoneSummary> {
    let countries: BTreeSet<&str> = points.iter().filter_map(|p| p.country.as_deref()).collect();
    let rows: Vec<HotzoneSummary> = countries
        .into_iter()
        .flat_map(|c| hotzones_for_country(points, c))
        .collect();
    tracing::debug!(rows = rows.len(), "hotzones computed");
    rows
}

/// Last week against the previous week for every disease in one country.
///
/// The last week is the 7 days ending at the country's latest date and the
/// previous week is the 7 days before it. Each window's mean is taken over
/// the days the disease was actually observed in it, and a disease missing
/// from either window gets no row. Countries with fewer than
/// [`MIN_COUNTRY_DAYS`] distinct dates yield nothing.
#[must_use]
pub fn hotzones_for_country(points: &[GeoPoint], country: &str) -> Vec<HotzoneSummary> {
    let mut by_disease: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for p in points.iter().filter(|p| p.country.as_deref() == Some(country)) {
        *by_disease
            .entry(p.disease_name.as_str())
            .or_default()
            .entry(p.date)
            .or_default() += f64::from(p.mention_count);
        dates.insert(p.date);
    }

    if dates.len() < MIN_COUNTRY_DAYS {
        tracing::debug!(country, days = dates.len(), "too few days for hotzones");
        return Vec::new();
    }
    let Some(&last) = dates.last() else {
        return Vec::new();
    };
    let (Some(last_start), Some(prev_start)) = (
        last.checked_sub_days(Days::new(6)),
        last.checked_sub_days(Days::new(13)),
    ) else {
        return Vec::new();
    };

    let rule = ChangeRule::hotzone();
    let mut rows: Vec<HotzoneSummary> = by_disease
        .into_iter()
        .filter_map(|(disease, totals)| {
            let last7: Vec<f64> = totals.range(last_start..=last).map(|(_, v)| *v).collect();
            let prev7: Vec<f64> = totals.range(prev_start..last_start).map(|(_, v)| *v).collect();
            if last7.is_empty() || prev7.is_empty() {
                tracing::debug!(country, disease, "disease missing from a hotzone window");
                return None;
            }
            let verdict = rule.evaluate(&prev7, &last7);
            Some(HotzoneSummary {
                country: country.to_string(),
                disease_name: disease.to_string(),
                prev7_mean: verdict.baseline_mean,
                last7_mean: verdict.comparison_mean,
                pct_change: verdict.pct_change,
                is_hot: verdict.exceeds,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.pct_change
            .partial_cmp(&a.pct_change)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.disease_name.cmp(&b.disease_name))
    });
    rows
}
