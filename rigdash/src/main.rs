#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;

use clap::{Parser, Subcommand};
use rigdash_api::Client as ApiClient;
use rigdash_assets::{AssetEngine, Resolved};
use rigdash_cache::AssetCache;
use rigdash_models::{AssetId, ListParams, SortOrder, ASSET_TYPES};
use std::{error::Error, sync::Arc};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "rigdash")]
#[command(about = "Resolve and list drilling assets from the remote asset API")]
#[command(
    after_help = "Environment:\n  RIGDASH_API_URL   Base url of the asset API\n  RIGDASH_API_KEY   API key sent with every request\n  RUST_LOG          Log filter, defaults to info"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an asset to the asset that should be shown for it, e.g. a rig to its active well
    Resolve { asset_id: AssetId },
    /// Load and list every asset of a type along with its parents
    List {
        asset_type: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "name")]
        sort_field: String,
        #[arg(long, default_value = "asc")]
        sort_order: SortOrder,
    },
    /// The rigs shown in navigation
    Recent,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let client = ApiClient::new(&config.api_url, &config.api_key);
    let engine = AssetEngine::new(AssetCache::new(), Arc::new(ASSET_TYPES.clone()), client);
    tracing::debug!(api = %engine.source().base_url(), "Asset engine ready");

    let output = match cli.command {
        Command::Resolve { asset_id } => {
            let resolved = engine.resolve_asset(asset_id).await?;
            match &resolved {
                Resolved::Found(_) => {}
                Resolved::NoActiveChild => {
                    tracing::info!(asset = %asset_id, "Asset has no active descendant");
                }
                Resolved::Unresolved | Resolved::NotLoaded => {
                    tracing::warn!(asset = %asset_id, outcome = ?resolved, "Active descendant is not available yet");
                }
            }
            serde_json::to_string_pretty(&resolved.view())?
        }
        Command::List {
            asset_type,
            search,
            sort_field,
            sort_order,
        } => {
            engine.load_assets_of_type(&asset_type).await?;
            let params = ListParams {
                search,
                sort_field,
                sort_order,
            };
            let list = engine.list_assets(&asset_type, &params);
            tracing::info!(count = list.assets.len(), asset_type = %asset_type, "Listed assets");
            serde_json::to_string_pretty(&list)?
        }
        Command::Recent => {
            engine
                .load_assets_of_type(rigdash_assets::listing::RECENT_ASSET_TYPE)
                .await?;
            serde_json::to_string_pretty(&engine.recent_assets())?
        }
    };

    println!("{}", output);
    Ok(())
}
