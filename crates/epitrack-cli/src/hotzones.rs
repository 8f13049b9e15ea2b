//! The `hotzones` command.

use std::path::Path;

use anyhow::Context;
use epitrack_core::HotzoneSummary;
use epitrack_pipeline::{extract_mentions, geo_point, hotzones_for_country};

use crate::run::load_catalogue;

/// Hotzone rows for `country`, computed straight from the article file.
///
/// # Errors
///
/// Fails if the catalogue or the article file cannot be loaded.
pub fn country_hotzones(
    input: &Path,
    catalogue: Option<&Path>,
    country: &str,
) -> anyhow::Result<Vec<HotzoneSummary>> {
    let catalogue = load_catalogue(catalogue)?;
    let articles = epitrack_ingest::load_articles(input)
        .with_context(|| format!("loading articles from {}", input.display()))?;

    let points: Vec<_> = articles
        .iter()
        .flat_map(|article| {
            extract_mentions(article, &catalogue)
                .into_iter()
                .map(|m| geo_point(&m, article.country.as_deref(), &catalogue))
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(hotzones_for_country(&points, country.trim()))
}

pub fn format_hotzones(country: &str, rows: &[HotzoneSummary]) -> String {
    if rows.is_empty() {
        return format!("No hotzones for {country} (needs at least 10 days of mentions).\n");
    }
    format!(
        "## Hotzones: {country}\n\n{}",
        epitrack_artifacts::render_markdown(rows)
    )
}
