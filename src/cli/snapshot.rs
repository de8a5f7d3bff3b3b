//! Snapshot command implementation

use crate::config::Config;
use crate::server::AppState;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SnapshotArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let state = AppState::from_config(config)?;
        let html = state
            .build_dashboard()
            .await
            .context("Failed to fetch market data")?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, html)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "Dashboard snapshot written");
            }
            None => println!("{html}"),
        }
        Ok(())
    }
}
