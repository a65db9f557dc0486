// Grid Tracker Library
//
// A paper grid tracker over a polled market price: step into fixed-size
// positions on dips, release them on recovery

pub mod catalog;
pub mod clients;
pub mod config;
pub mod core;
pub mod error; // Unified error handling
pub mod presenter;

// Re-export core types
pub use core::{
    GridLedger, LedgerError, LedgerSnapshot, Position, PositionStatus, PriceSample, PriceSource,
    TickOutcome, Tracker,
};

// Re-export error types
pub use error::{TrackerError, TrackerResult};

// Re-export client types
pub use clients::{ApiError, CoinGeckoClient};

// Re-export catalog types
pub use catalog::{Asset, AssetCatalog, CatalogCache};

// Re-export configuration
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, TrackerConfig};

// Re-export the presenter seam
pub use presenter::{ConsolePresenter, Presenter};
