//! Disease mention extraction.

use std::collections::BTreeMap;

use epitrack_core::{Article, DiseaseCatalogue, MentionRecord};

/// Mentions found in one article.
///
/// Regex patterns run first, in catalogue order. Keyword tokens are only
/// consulted when no pattern matched anywhere in the article.
#[must_use]
pub fn extract_mentions(article: &Article, catalogue: &DiseaseCatalogue) -> Vec<MentionRecord> {
    let text = article.search_text();
    let date = article.published_on();

    let record = |disease_name: &str, count: usize| MentionRecord {
        article_id: article.id,
        date,
        disease_name: disease_name.to_string(),
        mention_count: u32::try_from(count).unwrap_or(u32::MAX),
        source: article.source.clone(),
    };

    let hits: Vec<MentionRecord> = catalogue
        .diseases()
        .iter()
        .filter_map(|disease| {
            let count = disease.count_matches(&text);
            (count > 0).then(|| record(&disease.name, count))
        })
        .collect();
    if !hits.is_empty() {
        return hits;
    }

    // Keyword fallback. BTreeMap keeps the per-article output stable.
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in article.keywords.iter() {
        if let Some(name) = catalogue.disease_for_keyword(token) {
            *counts.entry(name).or_default() += 1;
        }
    }
    if !counts.is_empty() {
        tracing::trace!(article = article.id, "mentions taken from keywords");
    }
    counts
        .into_iter()
        .map(|(name, count)| record(name, count))
        .collect()
}

/// Mentions for every article, in article order.
#[must_use]
pub fn extract_all(articles: &[Article], catalogue: &DiseaseCatalogue) -> Vec<MentionRecord> {
    let mentions: Vec<MentionRecord> = articles
        .iter()
        .flat_map(|a| extract_mentions(a, catalogue))
        .collect();
    tracing::info!(
        articles = articles.len(),
        mentions = mentions.len(),
        "mentions extracted"
    );
    mentions
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use epitrack_core::KeywordTokens;

    use super::*;

    fn article(title: &str, description: &str, keywords: &str) -> Article {
        Article {
            id: 42,
            title: title.to_string(),
            description: description.to_string(),
            body: None,
            published_at: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
            keywords: KeywordTokens::from_delimited(keywords),
            source: "wire".to_string(),
            country: None,
        }
    }

    fn names(records: &[MentionRecord]) -> Vec<(&str, u32)> {
        records
            .iter()
            .map(|r| (r.disease_name.as_str(), r.mention_count))
            .collect()
    }

    #[test]
    fn counts_every_surface_form() {
        let catalogue = DiseaseCatalogue::builtin();
        let a = article(
            "COVID-19 and coronavirus news",
            "SARS-CoV-2 variant; covid19 again",
            "",
        );
        let out = extract_mentions(&a, &catalogue);
        assert_eq!(names(&out), vec![("COVID-19", 4)]);
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(out[0].article_id, 42);
        assert_eq!(out[0].source, "wire");
    }

    #[test]
    fn word_boundaries_are_respected() {
        let catalogue = DiseaseCatalogue::builtin();
        let a = article("Fluffy dogs at the tbilisi fair", "influential people", "");
        assert!(extract_mentions(&a, &catalogue).is_empty());
    }

    #[test]
    fn several_diseases_in_catalogue_order() {
        let catalogue = DiseaseCatalogue::builtin();
        let a = article("Zika and dengue", "Flu season, TB clinics, more dengue", "");
        let out = extract_mentions(&a, &catalogue);
        assert_eq!(
            names(&out),
            vec![("Dengue", 2), ("Influenza", 1), ("Zika", 1), ("Tuberculosis", 1)]
        );
    }

    #[test]
    fn keywords_ignored_when_text_matches() {
        let catalogue = DiseaseCatalogue::builtin();
        let a = article("Malaria nets delivered", "", "ebola,ebola");
        assert_eq!(names(&extract_mentions(&a, &catalogue)), vec![("Malaria", 1)]);
    }

    #[test]
    fn keywords_used_when_text_has_no_match() {
        let catalogue = DiseaseCatalogue::builtin();
        let a = article("", "", "Ebola | ebola; measles / unknown");
        assert_eq!(
            names(&extract_mentions(&a, &catalogue)),
            vec![("Ebola", 2), ("Measles", 1)]
        );
    }

    #[test]
    fn keyword_lookup_is_exact() {
        let catalogue = DiseaseCatalogue::builtin();
        // "covid" is not a canonical name; "covid-19" is.
        let a = article("", "", "covid covid-19");
        assert_eq!(names(&extract_mentions(&a, &catalogue)), vec![("COVID-19", 1)]);
    }

    #[test]
    fn extract_all_keeps_article_order() {
        let catalogue = DiseaseCatalogue::builtin();
        let mut first = article("measles", "", "");
        first.id = 1;
        let mut second = article("dengue", "", "");
        second.id = 2;
        let out = extract_all(&[first, second], &catalogue);
        assert_eq!(out.iter().map(|r| r.article_id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
