//! The `run` command: one full batch from article file to artifacts.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use epitrack_core::{AppConfig, DiseaseCatalogue, DiseaseSummary, Horizon};
use epitrack_pipeline::{run_pipeline, PipelineOutput, TrendLabel};

use crate::RunArgs;

/// Config values with CLI overrides applied.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub horizon: Horizon,
    pub catalogue: Option<PathBuf>,
}

impl RunSettings {
    /// # Errors
    ///
    /// Returns an error if `--days` is outside `1..=Horizon::MAX_DAYS`.
    pub fn resolve(config: &AppConfig, args: &RunArgs) -> anyhow::Result<Self> {
        let horizon = match args.days {
            Some(days) => Horizon::try_from(days)?,
            None => config.forecast_days,
        };
        if !horizon.is_sanctioned() {
            tracing::warn!(%horizon, "horizon is not one of 7, 14, 30 or 60 days");
        }
        Ok(Self {
            input: args
                .input
                .clone()
                .unwrap_or_else(|| config.articles_path.clone()),
            out_dir: args
                .out_dir
                .clone()
                .unwrap_or_else(|| config.out_dir.clone()),
            horizon,
            catalogue: args
                .catalogue
                .clone()
                .or_else(|| config.catalogue_path.clone()),
        })
    }
}

pub(crate) fn load_catalogue(path: Option<&Path>) -> anyhow::Result<DiseaseCatalogue> {
    match path {
        Some(path) => epitrack_core::load_catalogue(path)
            .with_context(|| format!("loading catalogue {}", path.display())),
        None => Ok(DiseaseCatalogue::builtin()),
    }
}

/// Load articles, run the pipeline and commit every table.
///
/// # Errors
///
/// Fails if the catalogue or input cannot be loaded, the pipeline rejects
/// the data, or the artifacts cannot be written. Nothing is written on
/// failure.
pub fn run_once(settings: &RunSettings) -> anyhow::Result<PipelineOutput> {
    let catalogue = load_catalogue(settings.catalogue.as_deref())?;
    let articles = epitrack_ingest::load_articles(&settings.input)
        .with_context(|| format!("loading articles from {}", settings.input.display()))?;
    let output = run_pipeline(&articles, &catalogue, settings.horizon)?;
    let now = chrono::Local::now().naive_local();
    epitrack_artifacts::write_artifacts(&settings.out_dir, &output, settings.horizon, now)
        .context("writing artifacts")?;
    Ok(output)
}

/// Markdown summary table with a trend label per disease.
pub fn format_summary(summaries: &[DiseaseSummary], horizon: Horizon) -> String {
    if summaries.is_empty() {
        return "No disease mentions found.\n".to_string();
    }
    let mut out = format!("## Disease trends ({horizon} horizon)\n\n");
    out.push_str("| disease | trend | model | recent mean | forecast mean | 95% range | change |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");
    for s in summaries {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.3} | {:.3} | {:.3}..{:.3} | {:+.1}% |",
            s.disease_name,
            TrendLabel::of(s),
            s.model_used,
            s.recent_actual_mean,
            s.forecast_next_mean,
            s.forecast_lower_95,
            s.forecast_upper_95,
            s.pct_change_vs_recent * 100.0,
        );
    }
    out
}
