pub mod cli;
pub mod config;
pub mod domain;
pub mod fetchers;
pub mod http;
pub mod parsers;
pub mod rate_limiter;
pub mod services;
pub mod sink;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::ingestion::IngestionService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_ingest(lookback: Option<u32>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::from_env()?;
        if let Some(days) = lookback {
            config.windows.challenge_lookback_days = days;
        }
        let mut service = IngestionService::new(config)?;
        service.run().await?;
        Ok(())
    })
}
