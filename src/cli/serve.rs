//! Serve command implementation

use crate::config::Config;
use crate::server::{self, AppState};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overriding `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Bind address after applying overrides to `config`
    pub fn bind_address(&self, config: &Config) -> String {
        let mut server = config.server.clone();
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        server.bind_address()
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let state = Arc::new(AppState::from_config(config)?);
        server::start(self.bind_address(config), state).await
    }
}
