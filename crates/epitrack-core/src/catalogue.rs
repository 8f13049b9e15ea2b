//! Disease and country catalogue.
//!
//! The catalogue is built once at startup, either from the built-in tables or
//! from a YAML file, and then passed by reference to every stage that needs
//! it. Nothing mutates it after construction.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseConfig {
    /// Canonical name written to every output table.
    pub name: String,
    /// Surface forms as regex fragments; each is wrapped in word boundaries.
    pub patterns: Vec<String>,
    /// Extra keyword tokens mapping to this disease, besides its lowercased name.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Alternative spellings carried by input rows (e.g. `USA`).
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueFile {
    pub diseases: Vec<DiseaseConfig>,
    #[serde(default)]
    pub countries: Vec<CountryConfig>,
}

impl CatalogueFile {
    /// The built-in disease and country tables.
    #[must_use]
    pub fn builtin() -> Self {
        let disease = |name: &str, patterns: &[&str]| DiseaseConfig {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            keywords: Vec::new(),
        };
        let country = |name: &str, lat: f64, lon: f64, aliases: &[&str]| CountryConfig {
            name: name.to_string(),
            lat,
            lon,
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
        };

        Self {
            diseases: vec![
                disease(
                    "COVID-19",
                    &[r"covid[-\s]?19", "coronavirus", r"sars[-\s]?cov[-\s]?2"],
                ),
                disease("Dengue", &["dengue"]),
                disease("Malaria", &["malaria"]),
                disease("Influenza", &["flu", "influenza"]),
                disease("Measles", &["measles"]),
                disease("Ebola", &["ebola"]),
                disease("Zika", &["zika"]),
                disease("Tuberculosis", &["tuberculosis", "tb"]),
                disease("Meningitis", &["meningitis"]),
            ],
            countries: vec![
                country("Japan", 36.2048, 138.2529, &[]),
                country("New Zealand", -40.9006, 174.8860, &[]),
                country("United States", 37.0902, -95.7129, &["USA"]),
                country("India", 20.5937, 78.9629, &[]),
                country("United Kingdom", 55.3781, -3.4360, &["UK"]),
                country("Australia", -25.2744, 133.7751, &[]),
                country("Canada", 56.1304, -106.3468, &[]),
            ],
        }
    }
}

/// A compiled detection pattern for one canonical disease.
#[derive(Debug, Clone)]
pub struct DiseasePattern {
    pub name: String,
    pub regex: Regex,
}

impl DiseasePattern {
    /// Number of non-overlapping matches in `text`.
    #[must_use]
    pub fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// Immutable detection configuration shared by all pipeline stages.
#[derive(Debug, Clone)]
pub struct DiseaseCatalogue {
    diseases: Vec<DiseasePattern>,
    keyword_map: HashMap<String, String>,
    countries: HashMap<String, (f64, f64)>,
}

impl DiseaseCatalogue {
    /// Compile the built-in catalogue.
    ///
    /// # Panics
    ///
    /// Panics only if the built-in tables fail validation, which the test
    /// suite rules out.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_file(CatalogueFile::builtin()).expect("built-in catalogue is valid")
    }

    /// Validate a parsed catalogue file and compile its patterns.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails or a pattern does not compile.
    pub fn from_file(file: CatalogueFile) -> Result<Self, ConfigError> {
        validate_catalogue(&file)?;

        let mut diseases = Vec::with_capacity(file.diseases.len());
        let mut keyword_map = HashMap::new();

        for disease in &file.diseases {
            let alternation = disease
                .patterns
                .iter()
                .filter(|p| !p.trim().is_empty())
                .map(|p| format!(r"\b(?:{p})\b"))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!("(?i){alternation}")).map_err(|source| {
                ConfigError::InvalidPattern {
                    disease: disease.name.clone(),
                    source,
                }
            })?;
            diseases.push(DiseasePattern {
                name: disease.name.clone(),
                regex,
            });

            keyword_map.insert(disease.name.to_lowercase(), disease.name.clone());
            for keyword in &disease.keywords {
                keyword_map.insert(keyword.trim().to_lowercase(), disease.name.clone());
            }
        }

        let mut countries = HashMap::new();
        for country in &file.countries {
            countries.insert(country.name.clone(), (country.lat, country.lon));
            for alias in &country.aliases {
                countries.insert(alias.clone(), (country.lat, country.lon));
            }
        }

        Ok(Self {
            diseases,
            keyword_map,
            countries,
        })
    }

    /// Disease patterns in catalogue order.
    #[must_use]
    pub fn diseases(&self) -> &[DiseasePattern] {
        &self.diseases
    }

    /// Canonical disease for an already-lowercased keyword token.
    #[must_use]
    pub fn disease_for_keyword(&self, token: &str) -> Option<&str> {
        self.keyword_map.get(token).map(String::as_str)
    }

    #[must_use]
    pub fn is_canonical(&self, name: &str) -> bool {
        self.diseases.iter().any(|d| d.name == name)
    }

    /// `(lat, lon)` for a country name or alias; surrounding whitespace is ignored.
    #[must_use]
    pub fn coordinates(&self, country: &str) -> Option<(f64, f64)> {
        self.countries.get(country.trim()).copied()
    }
}

impl Default for DiseaseCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load, validate and compile a catalogue from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalogue(path: &Path) -> Result<DiseaseCatalogue, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogueFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CatalogueFile = serde_yaml::from_str(&content)?;
    DiseaseCatalogue::from_file(file)
}

fn validate_catalogue(file: &CatalogueFile) -> Result<(), ConfigError> {
    if file.diseases.is_empty() {
        return Err(ConfigError::Validation(
            "catalogue must list at least one disease".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_keywords: HashMap<String, &str> = HashMap::new();

    for disease in &file.diseases {
        if disease.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "disease name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(disease.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate disease name: '{}'",
                disease.name
            )));
        }

        if disease.patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "disease '{}' has no patterns",
                disease.name
            )));
        }

        let lowered = std::iter::once(disease.name.to_lowercase())
            .chain(disease.keywords.iter().map(|k| k.trim().to_lowercase()));
        for keyword in lowered {
            if keyword.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "disease '{}' has an empty keyword",
                    disease.name
                )));
            }
            if let Some(owner) = seen_keywords.insert(keyword.clone(), &disease.name) {
                if owner != disease.name {
                    return Err(ConfigError::Validation(format!(
                        "keyword '{keyword}' maps to both '{owner}' and '{}'",
                        disease.name
                    )));
                }
            }
        }
    }

    let mut seen_countries = HashSet::new();
    for country in &file.countries {
        if !(-90.0..=90.0).contains(&country.lat) || !(-180.0..=180.0).contains(&country.lon) {
            return Err(ConfigError::Validation(format!(
                "country '{}' has out-of-range coordinates ({}, {})",
                country.name, country.lat, country.lon
            )));
        }
        for name in std::iter::once(&country.name).chain(&country.aliases) {
            if !seen_countries.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate country name or alias: '{name}'"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn disease(name: &str, patterns: &[&str]) -> DiseaseConfig {
        DiseaseConfig {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            keywords: Vec::new(),
        }
    }

    fn file_with(diseases: Vec<DiseaseConfig>) -> CatalogueFile {
        CatalogueFile {
            diseases,
            countries: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalogue_compiles() {
        let catalogue = DiseaseCatalogue::builtin();
        let names: Vec<&str> = catalogue.diseases().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "COVID-19",
                "Dengue",
                "Malaria",
                "Influenza",
                "Measles",
                "Ebola",
                "Zika",
                "Tuberculosis",
                "Meningitis"
            ]
        );
    }

    #[test]
    fn covid_surface_forms_share_one_pattern() {
        let catalogue = DiseaseCatalogue::builtin();
        let covid = &catalogue.diseases()[0];
        let text = "COVID-19, covid 19, Coronavirus and SARS-CoV-2 all count";
        assert_eq!(covid.count_matches(text), 4);
    }

    #[test]
    fn patterns_are_word_bounded() {
        let catalogue = DiseaseCatalogue::builtin();
        let flu = catalogue
            .diseases()
            .iter()
            .find(|d| d.name == "Influenza")
            .unwrap();
        assert_eq!(flu.count_matches("fluent influencers"), 0);
        assert_eq!(flu.count_matches("Flu season: influenza up"), 2);
    }

    #[test]
    fn keyword_map_uses_lowercased_canonical_names() {
        let catalogue = DiseaseCatalogue::builtin();
        assert_eq!(catalogue.disease_for_keyword("covid-19"), Some("COVID-19"));
        assert_eq!(catalogue.disease_for_keyword("dengue"), Some("Dengue"));
        assert_eq!(catalogue.disease_for_keyword("flu"), None);
        assert_eq!(catalogue.disease_for_keyword("Dengue"), None);
    }

    #[test]
    fn extra_keywords_are_mapped() {
        let mut d = disease("Influenza", &["flu"]);
        d.keywords = vec![" H5N1 ".to_string()];
        let catalogue = DiseaseCatalogue::from_file(file_with(vec![d])).unwrap();
        assert_eq!(catalogue.disease_for_keyword("h5n1"), Some("Influenza"));
    }

    #[test]
    fn coordinates_resolve_names_and_aliases() {
        let catalogue = DiseaseCatalogue::builtin();
        assert_eq!(catalogue.coordinates(" USA "), Some((37.0902, -95.7129)));
        assert_eq!(catalogue.coordinates("Japan"), Some((36.2048, 138.2529)));
        assert_eq!(catalogue.coordinates("Atlantis"), None);
    }

    #[test]
    fn validate_rejects_empty_catalogue() {
        let err = DiseaseCatalogue::from_file(file_with(vec![])).unwrap_err();
        assert!(err.to_string().contains("at least one disease"));
    }

    #[test]
    fn validate_rejects_duplicate_names_case_insensitively() {
        let err = DiseaseCatalogue::from_file(file_with(vec![
            disease("Dengue", &["dengue"]),
            disease("DENGUE", &["dengue fever"]),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate disease name"));
    }

    #[test]
    fn validate_rejects_disease_without_patterns() {
        let err = DiseaseCatalogue::from_file(file_with(vec![disease("Zika", &[" "])]))
            .unwrap_err();
        assert!(err.to_string().contains("has no patterns"));
    }

    #[test]
    fn validate_rejects_keyword_claimed_twice() {
        let mut flu = disease("Influenza", &["flu"]);
        flu.keywords = vec!["dengue".to_string()];
        let err = DiseaseCatalogue::from_file(file_with(vec![
            disease("Dengue", &["dengue"]),
            flu,
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("maps to both"));
    }

    #[test]
    fn invalid_regex_is_reported_with_disease_name() {
        let err = DiseaseCatalogue::from_file(file_with(vec![disease("Ebola", &["ebola("])]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref disease, .. } if disease == "Ebola"));
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut file = file_with(vec![disease("Ebola", &["ebola"])]);
        file.countries.push(CountryConfig {
            name: "Nowhere".to_string(),
            lat: 120.0,
            lon: 0.0,
            aliases: vec![],
        });
        let err = DiseaseCatalogue::from_file(file).unwrap_err();
        assert!(err.to_string().contains("out-of-range"));
    }

    #[test]
    fn load_catalogue_from_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "diseases:\n  - name: Cholera\n    patterns: ['cholera']\n    keywords: ['vibrio']\ncountries:\n  - name: Haiti\n    lat: 18.97\n    lon: -72.29\n"
        )
        .unwrap();
        let catalogue = load_catalogue(tmp.path()).unwrap();
        assert!(catalogue.is_canonical("Cholera"));
        assert!(!catalogue.is_canonical("Dengue"));
        assert_eq!(catalogue.disease_for_keyword("vibrio"), Some("Cholera"));
        assert_eq!(catalogue.coordinates("Haiti"), Some((18.97, -72.29)));
    }

    #[test]
    fn load_catalogue_missing_file() {
        let err = load_catalogue(Path::new("/nonexistent/diseases.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogueFileIo { .. }));
    }

    #[test]
    fn load_catalogue_malformed_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "diseases: [name: ").unwrap();
        let err = load_catalogue(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogueFileParse(_)));
    }
}
