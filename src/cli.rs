use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "pauper results ingestion backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Scrape recent league and challenge results and push them to the datastore
    Ingest {
        /// Challenge lookback window in days (overrides CHALLENGE_LOOKBACK_DAYS)
        #[arg(short, long)]
        lookback: Option<u32>,
    },
}
