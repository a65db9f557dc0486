// Asset catalog with a local file cache over the remote listing

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clients::coingecko::CoinGeckoClient;
use crate::error::{TrackerError, TrackerResult};

/// One listed asset from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl Asset {
    /// Selector label, e.g. "BTC - Bitcoin".
    pub fn label(&self) -> String {
        format!("{} - {}", self.symbol.to_uppercase(), self.name)
    }
}

/// In-memory catalog with id lookup and free-text search.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn find(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    /// Case-insensitive substring search over id, symbol and name.
    pub fn search(&self, query: &str) -> Vec<&Asset> {
        let needle = query.to_lowercase();
        self.assets
            .iter()
            .filter(|asset| {
                asset.id.to_lowercase().contains(&needle)
                    || asset.symbol.to_lowercase().contains(&needle)
                    || asset.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// File-backed cache of the asset listing.
///
/// An existing cache file is authoritative no matter how old it is; the
/// only way past it is an explicit refresh.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the cached listing, if the file is present.
    pub fn load(&self) -> TrackerResult<Option<Vec<Asset>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| TrackerError::FileRead(e.to_string()))?;
        let assets = serde_json::from_str(&content)?;
        Ok(Some(assets))
    }

    /// Write the listing as the flat JSON array the provider returns.
    pub fn store(&self, assets: &[Asset]) -> TrackerResult<()> {
        let content = serde_json::to_string(assets)?;
        fs::write(&self.path, content).map_err(|e| TrackerError::FileWrite(e.to_string()))?;
        Ok(())
    }
}

/// Load the catalog from cache, falling back to the remote listing.
///
/// `force_refresh` skips the cache read and re-fetches; the fetched
/// listing still lands in the cache file for the next run. A present but
/// unreadable cache is surfaced as `CatalogUnavailable` rather than
/// silently refetched, matching the cache file's authoritative role.
pub async fn load_or_fetch(
    client: &CoinGeckoClient,
    cache: &CatalogCache,
    force_refresh: bool,
) -> TrackerResult<AssetCatalog> {
    if !force_refresh {
        match cache.load() {
            Ok(Some(assets)) => {
                info!(
                    "📁 Loaded {} assets from {}",
                    assets.len(),
                    cache.path().display()
                );
                return Ok(AssetCatalog::new(assets));
            }
            Ok(None) => {}
            Err(err) => {
                return Err(TrackerError::CatalogUnavailable(format!(
                    "unreadable cache {}: {}",
                    cache.path().display(),
                    err
                )));
            }
        }
    }

    info!("🌐 Fetching the asset listing from the API...");
    let assets = client
        .coins_list()
        .await
        .map_err(|err| TrackerError::CatalogUnavailable(err.to_string()))?;

    if let Err(err) = cache.store(&assets) {
        warn!("⚠️  Could not write the catalog cache: {}", err);
    } else {
        info!(
            "💾 Cached {} assets to {}",
            assets.len(),
            cache.path().display()
        );
    }

    Ok(AssetCatalog::new(assets))
}
