// Grid Tracker - paper grid trading over polled market prices
// Single entry point: catalog browsing and the tracking loop

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use grid_tracker::{
    catalog, AssetCatalog, CatalogCache, CoinGeckoClient, Config, ConsolePresenter, GridLedger,
    Tracker, TrackerResult,
};

#[derive(Parser)]
#[command(name = "grid-tracker")]
#[command(version = "0.1.0")]
#[command(about = "Paper grid trading over live market prices", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init,

    /// Browse the asset catalog
    #[command(subcommand)]
    Assets(AssetsCommands),

    /// Poll prices for one asset and run the grid ledger until Ctrl-C
    Track {
        /// Asset identifier, e.g. "bitcoin"
        asset: String,

        /// Quote currency (overrides the config)
        #[arg(long)]
        currency: Option<String>,

        /// Seconds between price fetches (overrides the config)
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AssetsCommands {
    /// List known assets
    List {
        /// Maximum number of entries to print
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Ignore the local cache and re-fetch the listing
        #[arg(short, long)]
        refresh: bool,
    },

    /// Search assets by id, symbol or name
    Search {
        /// Case-insensitive query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging first so config errors are visible
    let log_level = if cli.verbose { "debug" } else { "info" };
    std::env::set_var("RUST_LOG", log_level);
    tracing_subscriber::fmt::init();

    match cli.command {
        // Init doesn't require config (it creates it)
        Commands::Init => {
            init_workspace(&cli.config)?;
        }

        Commands::Assets(cmd) => {
            let config = load_config_or_exit(&cli.config);
            handle_assets_command(cmd, &config).await?;
        }

        Commands::Track {
            asset,
            currency,
            interval_secs,
        } => {
            let mut config = load_config_or_exit(&cli.config);
            if let Some(currency) = currency {
                config.tracker.vs_currency = currency;
            }
            if let Some(secs) = interval_secs {
                config.tracker.poll_interval_secs = secs;
            }
            track_asset(&asset, &config).await?;
        }
    }

    Ok(())
}

/// Load config (creating the default on first run) or exit with a message
fn load_config_or_exit(path: &str) -> Config {
    match Config::load_or_create(path) {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {}", e);
            error!("💡 Fix {} or delete it to regenerate the defaults", path);
            std::process::exit(1);
        }
    }
}

fn init_workspace(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("🔧 Initializing workspace...");

    if !std::path::Path::new(config_path).exists() {
        let default_config = include_str!("../../config.toml.example");
        std::fs::write(config_path, default_config)?;
        info!("📝 Created {}", config_path);
    } else {
        warn!("⚠️  {} already exists, skipping", config_path);
    }

    Ok(())
}

async fn handle_assets_command(
    cmd: AssetsCommands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = CoinGeckoClient::new(&config.api)?;
    let cache = CatalogCache::new(&config.api.asset_list_file);

    match cmd {
        AssetsCommands::List { limit, refresh } => {
            let catalog = load_catalog(&client, &cache, refresh).await;
            if catalog.is_empty() {
                warn!("⚠️  The asset catalog is empty");
                return Ok(());
            }

            for asset in catalog.assets().iter().take(limit) {
                println!("{:<24} {}", asset.id, asset.label());
            }
            if catalog.len() > limit {
                println!("... and {} more (raise --limit to see them)", catalog.len() - limit);
            }
        }

        AssetsCommands::Search { query } => {
            let catalog = load_catalog(&client, &cache, false).await;
            let hits = catalog.search(&query);
            if hits.is_empty() {
                warn!("No assets match '{}'", query);
            }
            for asset in hits {
                println!("{:<24} {}", asset.id, asset.label());
            }
        }
    }

    Ok(())
}

/// Catalog loading is best-effort: an unavailable catalog is a notice, not
/// a reason to stop
async fn load_catalog(client: &CoinGeckoClient, cache: &CatalogCache, refresh: bool) -> AssetCatalog {
    match catalog::load_or_fetch(client, cache, refresh).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("⚠️  {}", e);
            warn!("   Continuing with an empty catalog");
            AssetCatalog::empty()
        }
    }
}

async fn track_asset(asset_id: &str, config: &Config) -> TrackerResult<()> {
    let client = CoinGeckoClient::new(&config.api)?;
    let cache = CatalogCache::new(&config.api.asset_list_file);
    let catalog = load_catalog(&client, &cache, false).await;

    match catalog.find(asset_id) {
        Some(asset) => info!("🎯 Tracking {}", asset.label()),
        None if catalog.is_empty() => {
            info!("🎯 Tracking {} (catalog unavailable, id unchecked)", asset_id)
        }
        None => warn!(
            "⚠️  '{}' is not in the asset catalog; tracking it anyway",
            asset_id
        ),
    }

    let ledger = GridLedger::new(&config.tracker);
    info!(
        "💰 Capital: {} {} in {} slices of {}",
        ledger.capital(),
        config.tracker.vs_currency,
        ledger.grid_size(),
        ledger.part_size()
    );
    info!(
        "⏱️  Polling every {}s (Ctrl-C to stop)",
        config.tracker.poll_interval_secs
    );

    let presenter = ConsolePresenter::new(config.logging.clone());
    let mut tracker = Tracker::new(
        ledger,
        client,
        presenter,
        asset_id,
        config.tracker.vs_currency.clone(),
        Duration::from_secs(config.tracker.poll_interval_secs),
    );

    tokio::select! {
        _ = tracker.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Stopping tracker");
        }
    }

    let ledger = tracker.ledger();
    info!(
        "📊 Session summary: {} positions opened, {} still open, {} {} deployed",
        ledger.positions().len(),
        ledger.open_count(),
        ledger.invested(),
        config.tracker.vs_currency
    );

    Ok(())
}
