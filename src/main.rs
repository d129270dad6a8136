//! Loss Ratio Dashboard CLI
//!
//! `generate` writes the synthetic dataset, `serve` runs the dashboard over it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use loss_ratio_dashboard::{
    analysis::summarize,
    config::DEFAULT_DATA_PATH,
    dataset::{write_star_schema, FACT_TABLE_FILE},
    load_dataset, server, write_dataset, DatasetGenerator, GeneratorConfig, ServerConfig,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "loss_ratio_dashboard")]
#[command(version, about = "Synthetic P&C loss ratio data and dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the synthetic fact table and dimension tables
    Generate {
        /// JSON generator configuration (defaults used for missing fields)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Directory receiving loss_experience.csv and dim_*.csv
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },

    /// Serve the interactive dashboard
    Serve {
        /// Fact table produced by `generate`
        #[arg(long, env = "DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "DASHBOARD_PORT", default_value = "8050")]
        port: u16,

        /// Verbose logging, including every recomputation
        #[arg(long, env = "DASHBOARD_DEBUG")]
        debug: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Command::Serve { debug: true, .. });
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::Generate { config, seed, out_dir } => generate(config, seed, out_dir),
        Command::Serve { data, host, port, debug } => {
            let config = ServerConfig { host, port, debug, data_path: data };
            run_server(config).await
        }
    }
}

fn generate(config_path: Option<PathBuf>, seed: Option<u64>, out_dir: PathBuf) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = match config_path {
        Some(ref path) => GeneratorConfig::from_json_path(path)
            .with_context(|| format!("loading generator config from {}", path.display()))?,
        None => GeneratorConfig::canonical(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let generator = DatasetGenerator::new(config).context("invalid generator configuration")?;
    for factor in generator.development_factors()? {
        log::debug!("{} / {}: development factor {:.4}", factor.business_line, factor.region, factor.factor);
    }

    let dataset = generator.generate()?;
    let fact_path = out_dir.join(FACT_TABLE_FILE);
    write_dataset(&dataset, &fact_path)
        .with_context(|| format!("writing {}", fact_path.display()))?;
    write_star_schema(generator.config(), &out_dir)
        .with_context(|| format!("writing dimension tables to {}", out_dir.display()))?;

    let rows: Vec<_> = dataset.records().iter().collect();
    let totals = summarize(&rows);
    log::info!(
        "Reported loss ratio {:.2}%, developed loss ratio {:.2}% over {} rows",
        totals.reported_loss_ratio * 100.0,
        totals.developed_loss_ratio * 100.0,
        totals.rows
    );
    log::info!("Data generation complete in {:?}", start.elapsed());
    Ok(())
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let dataset = load_dataset(&config.data_path)
        .with_context(|| format!("loading dashboard data from {}", config.data_path.display()))?;
    if config.debug {
        log::debug!("Debug mode on: logging every dashboard recomputation");
    }
    server::serve(&config, dataset).await?;
    Ok(())
}
