//! Entry points that turn an input file into articles.

use std::path::Path;

use epitrack_core::Article;

use crate::error::IngestError;
use crate::normalize::RawArticle;

/// Input encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleFormat {
    Csv,
    Json,
    JsonLines,
}

impl ArticleFormat {
    /// `.json` is an array, `.jsonl`/`.ndjson` are JSON lines, anything else is CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("jsonl" | "ndjson") => Self::JsonLines,
            _ => Self::Csv,
        }
    }
}

/// Read and normalize every article in `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or its structure is
/// unusable (no date column, malformed JSON). Individual rows with an
/// unparseable date are dropped, not reported as errors.
pub fn load_articles(path: &Path) -> Result<Vec<Article>, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let format = ArticleFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "reading articles");
    parse_articles(&text, format)
}

/// Normalize already-read input text.
///
/// # Errors
///
/// See [`load_articles`].
pub fn parse_articles(text: &str, format: ArticleFormat) -> Result<Vec<Article>, IngestError> {
    let (date_column, raw) = match format {
        ArticleFormat::Csv => {
            let (column, rows) = crate::csv::read_raw_articles(text)?;
            (Some(column), rows)
        }
        ArticleFormat::Json => crate::json::read_json_array(text)?,
        ArticleFormat::JsonLines => crate::json::read_json_lines(text)?,
    };

    let total = raw.len();
    let articles: Vec<Article> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, row): (usize, RawArticle)| {
            let article = row.into_article(i);
            if article.is_none() {
                tracing::debug!(row = i, "dropping article with missing or unparseable date");
            }
            article
        })
        .collect();

    let dropped = total - articles.len();
    if dropped > 0 {
        tracing::warn!(dropped, total, "some articles had no usable publication date");
    }
    tracing::info!(
        rows = articles.len(),
        date_column = date_column.unwrap_or("none"),
        "articles loaded"
    );

    Ok(articles)
}
