use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

use crate::cli::output::TableFormatter;
use crate::cli::types::{RulingLookup, RulingsArgs};
use crate::domain::ports::HttpTransport;
use crate::services::ScryfallClient;

/// Handle the `rulings` command
pub async fn execute<T: HttpTransport>(
    client: &ScryfallClient<T>,
    args: RulingsArgs,
    json: bool,
) -> Result<()> {
    let rulings = client.rulings();
    let identifier = args.identifier.trim();

    let result = match args.by {
        RulingLookup::Scryfall => {
            let id = Uuid::parse_str(identifier)
                .with_context(|| format!("Invalid Scryfall id: {identifier}"))?;
            rulings.by_id(id).await
        }
        RulingLookup::Multiverse => rulings.by_multiverse_id(parse_numeric(identifier)?).await,
        RulingLookup::Mtgo => rulings.by_mtgo_id(parse_numeric(identifier)?).await,
        RulingLookup::Arena => rulings.by_arena_id(parse_numeric(identifier)?).await,
        RulingLookup::Collector => {
            let set = args
                .set
                .as_deref()
                .ok_or_else(|| anyhow!("--set is required with --by collector"))?;
            rulings.by_collector_number(set, identifier).await
        }
    };
    let rulings = result.context("Failed to fetch rulings")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rulings)?);
    } else if rulings.is_empty() {
        println!("No rulings for this card.");
    } else {
        println!("{}", TableFormatter::new().format_rulings(&rulings));
        println!("\nShowing {} ruling(s)", rulings.len());
    }

    Ok(())
}

fn parse_numeric(identifier: &str) -> Result<u64> {
    identifier
        .parse()
        .with_context(|| format!("Expected a numeric id, got: {identifier}"))
}
