mod profile;
mod render;
mod snapshot;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Folio dashboard analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll analytics on a fixed period and print the stat cards after every merge
    ///
    /// Each line read from stdin is treated as a navigation to that location
    /// and reloads the project list.
    Watch {
        /// Polling period in seconds (defaults to `FOLIO_POLL_INTERVAL_SECS`)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
    /// Run one merge round and one projects load, then print the state as JSON
    Snapshot {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show the signed-in user's identity
    Profile {
        /// Read the cached record instead of fetching
        #[arg(long)]
        cached: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = folio_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Watch { interval } => watch::run_watch(&config, interval).await,
        Commands::Snapshot { pretty } => snapshot::run_snapshot(&config, pretty).await,
        Commands::Profile { cached } => profile::run_profile(&config, cached).await,
    }
}

#[cfg(test)]
mod tests;
