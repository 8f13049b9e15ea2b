use std::path::PathBuf;

use crate::records::Horizon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a pipeline invocation.
///
/// CLI flags override individual fields; everything else comes from the
/// environment via [`crate::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Article input file (CSV, JSON array, or JSON lines).
    pub articles_path: PathBuf,
    /// Directory receiving the latest tables and their timestamped snapshots.
    pub out_dir: PathBuf,
    pub forecast_days: Horizon,
    /// Optional YAML catalogue replacing the built-in disease/country tables.
    pub catalogue_path: Option<PathBuf>,
    pub schedule_cron: String,
}
