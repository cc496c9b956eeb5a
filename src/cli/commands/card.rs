use anyhow::{Context, Result};

use crate::cli::output::TableFormatter;
use crate::cli::types::CardCommands;
use crate::domain::models::{CardSearchOptions, NamedCardRequest, RandomCardOptions};
use crate::domain::ports::HttpTransport;
use crate::services::ScryfallClient;

/// Dispatch a `card` subcommand
pub async fn execute<T: HttpTransport>(
    client: &ScryfallClient<T>,
    command: CardCommands,
    json: bool,
) -> Result<()> {
    match command {
        CardCommands::Named { name, fuzzy, set } => {
            handle_named(client, name, fuzzy, set, json).await
        }
        CardCommands::Search {
            query,
            order,
            dir,
            unique,
            include_extras,
            pages,
        } => {
            let options = CardSearchOptions {
                unique: unique.map(Into::into),
                order: order.map(Into::into),
                direction: dir.map(Into::into),
                include_extras,
                include_variations: false,
            };
            handle_search(client, &query, &options, pages, json).await
        }
        CardCommands::Random { query } => handle_random(client, query, json).await,
        CardCommands::Autocomplete { prefix } => handle_autocomplete(client, &prefix, json).await,
    }
}

async fn handle_named<T: HttpTransport>(
    client: &ScryfallClient<T>,
    name: String,
    fuzzy: bool,
    set: Option<String>,
    json: bool,
) -> Result<()> {
    let mut request = if fuzzy {
        NamedCardRequest::fuzzy(name)
    } else {
        NamedCardRequest::exact(name)
    };
    request.set = set;

    let card = client
        .cards()
        .named(&request)
        .await
        .with_context(|| format!("Failed to look up card '{}'", request.name.name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        println!("{}", TableFormatter::new().format_card_details(&card));
    }

    Ok(())
}

async fn handle_search<T: HttpTransport>(
    client: &ScryfallClient<T>,
    query: &str,
    options: &CardSearchOptions,
    max_pages: usize,
    json: bool,
) -> Result<()> {
    let mut pager = client.cards().search(query, options)?;
    let mut cards = Vec::new();

    while pager.pages_read() < max_pages {
        match pager.next_page().await {
            Ok(Some(page)) => cards.extend(page),
            Ok(None) => break,
            // Searches with no matches are reported as 404
            Err(err) if err.is_not_found() && pager.pages_read() == 0 => break,
            Err(err) => return Err(err).context("Search failed"),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_cards(&cards));
    let total = pager
        .total_cards()
        .map_or_else(String::new, |total| format!(" of {total}"));
    println!("\nShowing {}{total} card(s)", cards.len());
    if pager.has_more() {
        println!("More results available; raise --pages to read them.");
    }

    Ok(())
}

async fn handle_random<T: HttpTransport>(
    client: &ScryfallClient<T>,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let options = RandomCardOptions {
        query,
        ..RandomCardOptions::default()
    };
    let card = client
        .cards()
        .random(&options)
        .await
        .context("Failed to fetch a random card")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        println!("{}", TableFormatter::new().format_card_details(&card));
    }

    Ok(())
}

async fn handle_autocomplete<T: HttpTransport>(
    client: &ScryfallClient<T>,
    prefix: &str,
    json: bool,
) -> Result<()> {
    let names = client
        .cards()
        .autocomplete(prefix)
        .await
        .context("Autocomplete failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else if names.is_empty() {
        println!("No matching names.");
    } else {
        for name in names {
            println!("{name}");
        }
    }

    Ok(())
}
