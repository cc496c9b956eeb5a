use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, BufReader};

use crate::cli::output::{create_spinner, ProgressBarExt, TableFormatter};
use crate::cli::types::{BulkCommands, BulkKindArg};
use crate::domain::models::{BulkDataKind, Card, Ruling};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::bulk::BulkReader;
use crate::services::ScryfallClient;

/// Spinner refresh interval, in records
const PROGRESS_STEP: usize = 1_000;

/// Dispatch a `bulk` subcommand
pub async fn execute<T: HttpTransport>(
    client: &ScryfallClient<T>,
    command: BulkCommands,
    json: bool,
) -> Result<()> {
    match command {
        BulkCommands::Sources => handle_sources(client, json).await,
        BulkCommands::Count { kind, file } => handle_count(client, kind, file.as_deref(), json).await,
    }
}

async fn handle_sources<T: HttpTransport>(client: &ScryfallClient<T>, json: bool) -> Result<()> {
    let sources = client
        .bulk_data()
        .list()
        .await
        .context("Failed to list bulk data")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
    } else {
        println!("{}", TableFormatter::new().format_bulk_sources(&sources));
    }

    Ok(())
}

async fn handle_count<T: HttpTransport>(
    client: &ScryfallClient<T>,
    kind: BulkKindArg,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let kind = BulkDataKind::from(kind);
    let spinner = create_spinner(format!("Reading {kind}"), json);

    let result = if kind == BulkDataKind::Rulings {
        count_kind::<Ruling, T>(client, kind, file, &spinner).await
    } else {
        count_kind::<Card, T>(client, kind, file, &spinner).await
    };

    let count = match result {
        Ok(count) => {
            spinner.finish_success(format!("{count} {kind} records"));
            count
        }
        Err(err) => {
            spinner.finish_error(format!("Stopped after {} records", spinner.position()));
            return Err(err);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "kind": kind,
                "records": count,
            }))?
        );
    } else {
        println!("{count}");
    }

    Ok(())
}

async fn count_kind<Record, T>(
    client: &ScryfallClient<T>,
    kind: BulkDataKind,
    file: Option<&Path>,
    spinner: &ProgressBar,
) -> Result<usize>
where
    Record: DeserializeOwned,
    T: HttpTransport,
{
    if let Some(path) = file {
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BulkReader::<Record, _>::new(BufReader::new(file))
            .await
            .with_context(|| format!("{} is not a bulk data file", path.display()))?;
        return count_records(reader, spinner).await;
    }

    let sources = client
        .bulk_data()
        .list_sources()
        .await
        .context("Failed to list bulk data")?;
    let source = sources
        .get(kind)
        .ok_or_else(|| anyhow!("No {kind} dump is currently published"))?;

    spinner.set_message(format!("Downloading {} ({})", source.name, source.kind));
    let reader = client
        .bulk_data()
        .open::<Record>(source)
        .await
        .with_context(|| format!("Failed to open {}", source.download_uri))?;
    count_records(reader, spinner).await
}

/// Drain `reader`, ticking `spinner` as records arrive
async fn count_records<Record, R>(
    mut reader: BulkReader<Record, R>,
    spinner: &ProgressBar,
) -> Result<usize>
where
    Record: DeserializeOwned,
    R: AsyncBufRead + Unpin,
{
    while reader
        .next()
        .await
        .with_context(|| format!("Failed after {} records", reader.records_read()))?
        .is_some()
    {
        if reader.records_read() % PROGRESS_STEP == 0 {
            spinner.set_position(reader.records_read() as u64);
        }
    }

    spinner.set_position(reader.records_read() as u64);
    Ok(reader.records_read())
}
