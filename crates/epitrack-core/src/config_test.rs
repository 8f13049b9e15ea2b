use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "EPITRACK_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.articles_path, Path::new("./articles.csv"));
    assert_eq!(cfg.out_dir, Path::new("./outputs"));
    assert_eq!(cfg.forecast_days.days(), 7);
    assert!(cfg.catalogue_path.is_none());
    assert_eq!(cfg.schedule_cron, "0 0 2 * * *");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_ENV", "production");
    map.insert("EPITRACK_LOG_LEVEL", "debug");
    map.insert("EPITRACK_ARTICLES_PATH", "/data/articles.jsonl");
    map.insert("EPITRACK_OUT_DIR", "/data/out");
    map.insert("EPITRACK_FORECAST_DAYS", "30");
    map.insert("EPITRACK_CATALOGUE_PATH", "/etc/epitrack/diseases.yaml");
    map.insert("EPITRACK_SCHEDULE_CRON", "0 30 6 * * *");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.articles_path, Path::new("/data/articles.jsonl"));
    assert_eq!(cfg.out_dir, Path::new("/data/out"));
    assert_eq!(cfg.forecast_days.days(), 30);
    assert_eq!(
        cfg.catalogue_path.as_deref(),
        Some(Path::new("/etc/epitrack/diseases.yaml"))
    );
    assert_eq!(cfg.schedule_cron, "0 30 6 * * *");
}

#[test]
fn build_app_config_blank_catalogue_path_is_none() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_CATALOGUE_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.catalogue_path.is_none());
}

#[test]
fn build_app_config_forecast_days_not_a_number() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_FORECAST_DAYS", "a week");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EPITRACK_FORECAST_DAYS"),
        "expected InvalidEnvVar(EPITRACK_FORECAST_DAYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_forecast_days_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_FORECAST_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "EPITRACK_FORECAST_DAYS" && reason.contains("between 1 and 3650")),
        "expected InvalidEnvVar(EPITRACK_FORECAST_DAYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_forecast_days_negative_rejected() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_FORECAST_DAYS", "-14");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EPITRACK_FORECAST_DAYS"
    ));
}

#[test]
fn build_app_config_invalid_environment() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_ENV", "prod");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EPITRACK_ENV"
    ));
}

#[test]
fn build_app_config_forecast_days_above_cap_rejected() {
    let mut map = HashMap::new();
    map.insert("EPITRACK_FORECAST_DAYS", "4000000000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EPITRACK_FORECAST_DAYS"
    ));
}
