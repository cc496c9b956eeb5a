//! Scryfall CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use scryfall_client::cli::{self, Cli, Commands};
use scryfall_client::infrastructure::config::ConfigLoader;
use scryfall_client::infrastructure::logging::{LogConfig, LoggerImpl};
use scryfall_client::services::ScryfallClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(&err, json);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::try_from(&config.logging)?)
        .context("Failed to initialize logging")?;

    let client = ScryfallClient::new(&config).context("Failed to build API client")?;

    match cli.command {
        Commands::Card(command) => cli::commands::card::execute(&client, command, cli.json).await,
        Commands::Rulings(args) => cli::commands::rulings::execute(&client, args, cli.json).await,
        Commands::Bulk(command) => cli::commands::bulk::execute(&client, command, cli.json).await,
    }
}
