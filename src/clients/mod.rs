// HTTP clients for external market data providers

pub mod coingecko;

pub use coingecko::{ApiError, CoinGeckoClient};
