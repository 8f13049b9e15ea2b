mod hotzones;
mod run;
mod schedule;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "epitrack")]
#[command(about = "Disease mention forecasting pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pipeline once and write all tables
    Run(RunArgs),
    /// Show last-week vs previous-week hotzones for one country
    Hotzones {
        /// Country name as tagged on the articles (e.g., India)
        #[arg(long)]
        country: String,
        /// Article file; defaults to EPITRACK_ARTICLES_PATH
        #[arg(long)]
        input: Option<PathBuf>,
        /// YAML disease/country catalogue
        #[arg(long)]
        catalogue: Option<PathBuf>,
    },
    /// Run now, then again on every cron tick until Ctrl-C
    Schedule {
        /// Six-field cron expression; defaults to EPITRACK_SCHEDULE_CRON
        #[arg(long)]
        cron: Option<String>,
        /// Forecast horizon in days
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
    },
}

/// Overrides for a single pipeline run.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct RunArgs {
    /// Article file (CSV, JSON array, or JSON lines)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Forecast horizon in days (7, 14, 30 and 60 are the usual choices)
    #[arg(long, allow_negative_numbers = true)]
    days: Option<i64>,
    /// Output directory for the tables
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// YAML disease/country catalogue
    #[arg(long)]
    catalogue: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = epitrack_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run(args)) => {
            let settings = run::RunSettings::resolve(&config, &args)?;
            let output = run::run_once(&settings)?;
            print!("{}", run::format_summary(&output.summaries, settings.horizon));
        }
        Some(Commands::Hotzones {
            country,
            input,
            catalogue,
        }) => {
            let input = input.unwrap_or_else(|| config.articles_path.clone());
            let catalogue = catalogue.or_else(|| config.catalogue_path.clone());
            let rows = hotzones::country_hotzones(&input, catalogue.as_deref(), &country)?;
            print!("{}", hotzones::format_hotzones(&country, &rows));
        }
        Some(Commands::Schedule { cron, days }) => {
            let args = RunArgs {
                days,
                ..RunArgs::default()
            };
            let settings = run::RunSettings::resolve(&config, &args)?;
            let cron = cron.unwrap_or_else(|| config.schedule_cron.clone());
            schedule::run_schedule(settings, &cron).await?;
        }
        None => {
            let settings = run::RunSettings::resolve(&config, &RunArgs::default())?;
            let output = run::run_once(&settings)?;
            print!("{}", run::format_summary(&output.summaries, settings.horizon));
        }
    }

    Ok(())
}
