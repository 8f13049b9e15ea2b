//! Conversion from loosely-typed input rows to [`Article`].

use epitrack_core::{Article, KeywordTokens};
use serde_json::Value;

use crate::dates::parse_timestamp;

/// Keyword field as it appears in the input, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawKeywords {
    Absent,
    /// A single string of tokens separated by `,`, `|`, `;`, `/` or whitespace.
    Delimited(String),
    /// One token per item.
    List(Vec<String>),
    /// Mapping keys used as tokens; values are ignored.
    Keys(Vec<String>),
}

impl RawKeywords {
    /// Interpret a JSON keyword value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Delimited(s.clone()),
            Value::Array(items) => Self::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Null | Value::Bool(false) => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
            Value::Object(map) => Self::Keys(map.keys().cloned().collect()),
            Value::Bool(_) | Value::Number(_) => Self::Delimited(value.to_string()),
        }
    }

    /// Interpret a text cell, which may itself hold a serialized JSON list or mapping.
    #[must_use]
    pub fn from_text_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(value @ (Value::Array(_) | Value::Object(_))) =
                serde_json::from_str::<Value>(trimmed)
            {
                return Self::from_json(&value);
            }
        }
        Self::Delimited(cell.to_string())
    }

    #[must_use]
    pub fn into_tokens(self) -> KeywordTokens {
        match self {
            Self::Absent => KeywordTokens::default(),
            Self::Delimited(s) => KeywordTokens::from_delimited(&s),
            Self::List(items) | Self::Keys(items) => KeywordTokens::from_tokens(items),
        }
    }
}

/// One input row with the fields the pipeline reads, still as text.
#[derive(Debug, Clone)]
pub struct RawArticle {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub body: Option<String>,
    /// Raw value of the detected date column.
    pub published: Option<String>,
    pub keywords: RawKeywords,
    pub source: String,
    pub country: Option<String>,
}

impl RawArticle {
    /// Normalize into an [`Article`], using `row_index` when the row has no id.
    ///
    /// Returns `None` when the publication date is missing or unparseable.
    #[must_use]
    pub fn into_article(self, row_index: usize) -> Option<Article> {
        let published_at = self.published.as_deref().and_then(parse_timestamp)?;
        let id = self
            .id
            .unwrap_or_else(|| i64::try_from(row_index).unwrap_or(i64::MAX));
        let country = self
            .country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Some(Article {
            id,
            title: self.title,
            description: self.description,
            body: self.body.filter(|b| !b.trim().is_empty()),
            published_at,
            keywords: self.keywords.into_tokens(),
            source: self.source,
            country,
        })
    }
}
