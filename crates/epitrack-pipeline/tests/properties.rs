use chrono::{NaiveDate, TimeZone, Utc};
use epitrack_core::{Article, DiseaseCatalogue, Horizon, KeywordTokens, MentionRecord};
use epitrack_pipeline::{aggregate_daily, extract_mentions, forecast_series, ChangeRule};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "dengue", "DENGUE", "zika", "flu", "influenza", "covid-19", "coronavirus", "tb", "ebola",
    "measles", "malaria", "outbreak", "cases", "ministry", "fluid", "tbsp", "covid",
];

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..12).prop_map(|w| w.join(" "))
}

fn arb_article() -> impl Strategy<Value = Article> {
    (arb_text(), arb_text(), arb_text()).prop_map(|(title, description, keywords)| Article {
        id: 1,
        title,
        description,
        body: None,
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        keywords: KeywordTokens::from_delimited(&keywords),
        source: "wire".to_string(),
        country: None,
    })
}

fn arb_mention() -> impl Strategy<Value = MentionRecord> {
    (
        prop_oneof![Just("Dengue"), Just("Zika"), Just("Malaria")],
        0u64..60,
        1u32..5,
    )
        .prop_map(|(name, offset, count)| MentionRecord {
            article_id: 0,
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(offset))
                .unwrap(),
            disease_name: name.to_string(),
            mention_count: count,
            source: String::new(),
        })
}

proptest! {
    #[test]
    fn extracted_mentions_use_canonical_names(article in arb_article()) {
        let catalogue = DiseaseCatalogue::builtin();
        let mentions = extract_mentions(&article, &catalogue);
        let mut names: Vec<&str> = Vec::new();
        for m in &mentions {
            prop_assert!(catalogue.is_canonical(&m.disease_name));
            prop_assert!(m.mention_count >= 1);
            prop_assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            names.push(m.disease_name.as_str());
        }
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }

    #[test]
    fn aggregated_series_are_gap_free_and_conserve_mentions(
        mentions in prop::collection::vec(arb_mention(), 0..80)
    ) {
        let series = aggregate_daily(&mentions);
        for s in &series {
            let first = mentions
                .iter()
                .filter(|m| m.disease_name == s.disease_name)
                .map(|m| m.date)
                .min()
                .unwrap();
            let last = mentions
                .iter()
                .filter(|m| m.disease_name == s.disease_name)
                .map(|m| m.date)
                .max()
                .unwrap();
            prop_assert_eq!(s.start, first);
            prop_assert_eq!(s.last_date(), last);
            prop_assert_eq!(
                i64::try_from(s.values.len()).unwrap(),
                (last - first).num_days() + 1
            );
            prop_assert!(s.values.iter().all(|v| *v >= 0.0));

            let total: f64 = s.values.iter().sum();
            let expected: u32 = mentions
                .iter()
                .filter(|m| m.disease_name == s.disease_name)
                .map(|m| m.mention_count)
                .sum();
            prop_assert_eq!(total, f64::from(expected));
        }
        let names: Vec<&str> = series.iter().map(|s| s.disease_name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        prop_assert_eq!(names, sorted);
    }

    #[test]
    fn forecasts_are_non_negative_and_ordered(
        values in prop::collection::vec(0u32..50, 1..40),
        days in 1i64..31,
    ) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let horizon = Horizon::try_from(days).unwrap();
        let fc = forecast_series(&values, horizon);
        prop_assert_eq!(fc.len(), horizon.steps());
        for i in 0..fc.len() {
            prop_assert!(fc.lower[i] >= 0.0);
            prop_assert!(fc.lower[i] <= fc.forecast[i]);
            prop_assert!(fc.forecast[i] <= fc.upper[i]);
            prop_assert!(fc.upper[i].is_finite());
        }
    }

    #[test]
    fn rising_iff_rounded_pct_above_threshold(
        recent in prop::collection::vec(0u32..20, 1..10),
        ahead in prop::collection::vec(0u32..20, 1..10),
    ) {
        let recent: Vec<f64> = recent.into_iter().map(f64::from).collect();
        let ahead: Vec<f64> = ahead.into_iter().map(f64::from).collect();
        let rule = ChangeRule::trend(ahead.len());
        let v = rule.evaluate_tail(&recent, &ahead);
        prop_assert_eq!(v.exceeds, v.pct_change > 0.15);
    }
}
