//! Records passed between pipeline stages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Placeholder sentiment attached to every daily series row.
pub const SENTIMENT_PLACEHOLDER: f64 = 0.0;

/// Placeholder source reliability attached to every daily series row.
pub const SOURCE_RELIABILITY_PLACEHOLDER: f64 = 0.5;

/// Number of future days to forecast. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Horizon(u32);

impl Horizon {
    /// Horizons offered by the dashboard; any value in `1..=MAX_DAYS` is accepted.
    pub const SANCTIONED: [u32; 4] = [7, 14, 30, 60];

    /// Longest accepted horizon, ten years of daily steps.
    pub const MAX_DAYS: u32 = 3650;

    #[must_use]
    pub fn days(self) -> u32 {
        self.0
    }

    /// Horizon as a step count for indexing forecast vectors.
    #[must_use]
    pub fn steps(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn is_sanctioned(self) -> bool {
        Self::SANCTIONED.contains(&self.0)
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(7)
    }
}

impl TryFrom<i64> for Horizon {
    type Error = CoreError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        u32::try_from(days)
            .ok()
            .filter(|d| (1..=Self::MAX_DAYS).contains(d))
            .map(Self)
            .ok_or(CoreError::InvalidHorizon(days))
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.0)
    }
}

/// Lowercase keyword tokens attached to an article.
///
/// Input files carry keywords as lists, mappings or delimited strings; the
/// ingestion layer folds all of them into this one shape. Order and
/// multiplicity are preserved because the keyword fallback counts tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTokens(Vec<String>);

impl KeywordTokens {
    /// Split a delimited string on `,`, `|`, `;`, `/` and whitespace.
    #[must_use]
    pub fn from_delimited(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        Self::from_tokens(
            lower.split(|c: char| matches!(c, ',' | '|' | ';' | '/') || c.is_whitespace()),
        )
    }

    /// Take each item as one token, without further splitting.
    pub fn from_tokens<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One input article as seen by the pipeline.
#[derive(Debug, Clone)]
pub struct Article {
    /// Input id, or the zero-based row index when the input has none.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub body: Option<String>,
    pub published_at: DateTime<Utc>,
    pub keywords: KeywordTokens,
    pub source: String,
    pub country: Option<String>,
}

impl Article {
    /// Title, description and body joined by single spaces.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len()
                + self.description.len()
                + self.body.as_ref().map_or(0, String::len)
                + 2,
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.description);
        if let Some(body) = &self.body {
            text.push(' ');
            text.push_str(body);
        }
        text
    }

    /// Publication day in UTC.
    #[must_use]
    pub fn published_on(&self) -> NaiveDate {
        self.published_at.date_naive()
    }
}

/// A disease detected in one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRecord {
    pub article_id: i64,
    pub date: NaiveDate,
    pub disease_name: String,
    /// Always at least one.
    pub mention_count: u32,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeriesPoint {
    pub date: NaiveDate,
    pub disease_name: String,
    pub mention_count: f64,
    pub sentiment_score: f64,
    pub source_reliability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub disease_name: String,
    pub forecast: f64,
    pub lower_95: f64,
    pub upper_95: f64,
}

/// Which forecasting strategy produced a disease's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Zero,
    #[serde(rename = "Holt-Winters")]
    HoltWinters,
    MovingAverage,
}

impl ModelKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Zero => "Zero",
            ModelKind::HoltWinters => "Holt-Winters",
            ModelKind::MovingAverage => "MovingAverage",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-disease trend row. Numeric fields are rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseSummary {
    pub disease_name: String,
    pub model_used: ModelKind,
    pub recent_actual_mean: f64,
    pub forecast_next_mean: f64,
    pub forecast_lower_95: f64,
    pub forecast_upper_95: f64,
    pub pct_change_vs_recent: f64,
    pub is_rising: bool,
}

/// A mention tagged with the article's country and, when known, its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub date: NaiveDate,
    pub disease_name: String,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub mention_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotzoneSummary {
    pub country: String,
    pub disease_name: String,
    pub prev7_mean: f64,
    pub last7_mean: f64,
    pub pct_change: f64,
    pub is_hot: bool,
}
