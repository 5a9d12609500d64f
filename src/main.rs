// asin-cache binary.
// Runs lookups through the cache and prints results as JSON on stdout.

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use asin_cache::cli::{Cli, Command};
use asin_cache::logging::init_tracing;
use asin_cache::{Config, IdKind, RainforestClient, Result, Retriever};

/// One line of output per requested id.
#[derive(Serialize)]
struct Output<'a, T: Serialize> {
    id: &'a str,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn print<T: Serialize>(id: &str, data: Option<T>) -> Result<()> {
    let output = Output {
        id,
        found: data.is_some(),
        data,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env(cli.root.clone())?;
    cli.apply(&mut config);

    let client = RainforestClient::from_config(&config)?;
    let retriever = Retriever::open(&config, client)?;

    let outcome = match &cli.command {
        Command::Asin { ids } => lookup_all(&retriever, ids, IdKind::Asin).await,
        Command::Gtin { ids } => lookup_all(&retriever, ids, IdKind::Gtin).await,
        Command::Variant {
            asin,
            titles,
            binding,
        } => match retriever.retrieve_by_asin(asin).await {
            Ok(record) => {
                let variant = record.as_ref().and_then(|data| match binding {
                    Some(binding) => data.lookup_binding(*binding),
                    None => data.lookup_variant(titles.as_slice()),
                });
                print(asin, variant)
            }
            Err(e) => Err(e),
        },
        Command::Refetch { kind, id } => match retriever.force_refetch(id, (*kind).into()).await {
            Ok(record) => print(id, record),
            Err(e) => Err(e),
        },
    };

    // Persist missing-id knowledge even when a lookup failed part way
    let saved = retriever.save_missing_manifest();
    let stats = retriever.stats();
    info!(
        loads = stats.loads,
        missing_hits = stats.missing_hits,
        fetches = stats.fetches,
        stores = stats.stores,
        "run finished"
    );
    settle(outcome, saved)
}

/// Combine the lookup result with the manifest save, reporting the lookup error first.
fn settle(outcome: Result<()>, saved: Result<()>) -> Result<()> {
    match (outcome, saved) {
        (Err(lookup), Err(save)) => {
            error!(error = %save, "failed to save missing manifest");
            Err(lookup)
        }
        (outcome, saved) => outcome.and(saved),
    }
}

async fn lookup_all(
    retriever: &Retriever<RainforestClient>,
    ids: &[String],
    kind: IdKind,
) -> Result<()> {
    for id in ids {
        let record = retriever.retrieve(id, kind).await?;
        print(id, record)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing("info") {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "lookup failed");
            ExitCode::FAILURE
        }
    }
}
