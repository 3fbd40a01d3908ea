use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use model::VizOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::controller::VizController;
use crate::fetch::{CachedFetcher, HttpDataFetcher};
use crate::render::HtmlFileUi;

#[derive(Parser)]
#[command(name = "predchart")]
#[command(about = "Quantile forecast visualization core with CLI rendering tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch series for the initial selection and write the plot as HTML
    ///
    /// The data endpoint base URL and fetch behavior come from the
    /// `predchart` config file and PREDCHART_* environment variables.
    Render {
        /// Path to the viz options JSON document
        #[arg(short = 'O', long)]
        options: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "predchart.html")]
        output: PathBuf,

        /// Override the initially selected target variable
        #[arg(long)]
        target: Option<String>,

        /// Override the initially selected unit
        #[arg(long)]
        unit: Option<String>,
    },
    /// Validate a viz options JSON document and report every violation
    CheckOptions {
        /// Path to the viz options JSON document
        #[arg(short = 'O', long)]
        options: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Render {
                options,
                output,
                target,
                unit,
            } => render(&options, &output, target, unit).await,
            Commands::CheckOptions { options } => check_options(&options),
        }
    }
}

fn load_options(path: &Path) -> Result<VizOptions> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse {}", path.display()))
}

async fn render(
    options_path: &Path,
    output: &Path,
    target: Option<String>,
    unit: Option<String>,
) -> Result<()> {
    let mut options = load_options(options_path)?;
    if let Some(target) = target {
        options.initial_target_var = target;
    }
    if let Some(unit) = unit {
        options.initial_unit = unit;
    }

    let config = AppConfig::load()?;
    info!(data_url = %config.data_url, "fetching viz data");
    let fetcher = CachedFetcher::new(
        HttpDataFetcher::new(
            config.data_url.as_str(),
            Duration::from_secs(config.fetch_timeout_secs),
        )?,
        config.cache_capacity,
        Duration::from_secs(config.cache_ttl_secs),
    );

    let container = output.display().to_string();
    VizController::initialize(
        &container,
        Arc::new(fetcher),
        Box::new(HtmlFileUi::new(output)),
        options,
    )
    .await?;

    info!(path = %output.display(), "initial plot written");
    Ok(())
}

fn check_options(path: &Path) -> Result<()> {
    let options = load_options(path)?;
    let errors = options.validate();
    if errors.is_empty() {
        println!("{}: OK", path.display());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("{error}");
        }
        anyhow::bail!("{} error(s) in {}", errors.len(), path.display())
    }
}
