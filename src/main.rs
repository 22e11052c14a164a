use anyhow::Result;
use clap::Parser;
use landsat_query::results::SearchResults;
use landsat_query::selection::{self, QuerySelection};
use landsat_query::CatalogClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Search the USGS Landsat inventory with a saved query selection
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file describing the search
    #[arg(short, long, default_value = "./inputs/query_selection.toml")]
    selection: PathBuf,

    /// Where to write the decoded scenes as JSON
    #[arg(short, long, default_value = "./outputs/search_results.json")]
    output: PathBuf,

    /// Write the bundled example selection to this path and exit
    #[arg(long)]
    template: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = args.template {
        QuerySelection::from_template(&selection::template())?.write(&path)?;
        tracing::info!("Wrote template selection to {}", path.display());
        return Ok(());
    }

    let selection = QuerySelection::read(&args.selection)?;
    let query = selection.to_query();

    let client = CatalogClient::new();
    tracing::info!("Searching {}", client.request_url(&query));
    let response = client.search(&query).await?;

    let results = SearchResults::new(&selection.id, response);
    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    results.write(&args.output)?;

    tracing::info!(
        "Found {} scenes, written to {}",
        results.len(),
        args.output.display()
    );
    Ok(())
}
