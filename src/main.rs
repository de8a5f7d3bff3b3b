use anyhow::Context;
use clap::Parser;
use crypto_movers::cli::{Cli, Commands};
use crypto_movers::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {:#}", cli.config, e);
            eprintln!("Using default configuration");
            Config::from_toml(include_str!("../config.toml.example"))
                .context("Invalid default config")?
        }
    };
    config.validate()?;

    // Initialize telemetry
    let telemetry = crypto_movers::telemetry::init_telemetry(&config.telemetry)?;
    if let Some(addr) = telemetry.metrics_address() {
        tracing::info!(%addr, "Prometheus exporter listening");
    }

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting dashboard server");
            args.execute(&config).await?;
        }
        Commands::Snapshot(args) => {
            tracing::info!("Rendering dashboard snapshot");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
