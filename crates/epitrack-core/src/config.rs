use crate::app_config::{AppConfig, Environment};
use crate::records::Horizon;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("EPITRACK_ENV", "development"))?;
    let log_level = or_default("EPITRACK_LOG_LEVEL", "info");
    let articles_path = PathBuf::from(or_default("EPITRACK_ARTICLES_PATH", "./articles.csv"));
    let out_dir = PathBuf::from(or_default("EPITRACK_OUT_DIR", "./outputs"));

    let days = parse_i64("EPITRACK_FORECAST_DAYS", "7")?;
    let forecast_days = Horizon::try_from(days).map_err(|e| ConfigError::InvalidEnvVar {
        var: "EPITRACK_FORECAST_DAYS".to_string(),
        reason: e.to_string(),
    })?;

    let catalogue_path = lookup("EPITRACK_CATALOGUE_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let schedule_cron = or_default("EPITRACK_SCHEDULE_CRON", "0 0 2 * * *");

    Ok(AppConfig {
        env,
        log_level,
        articles_path,
        out_dir,
        forecast_days,
        catalogue_path,
        schedule_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "EPITRACK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
