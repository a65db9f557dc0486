// Common test utilities and helpers

use grid_tracker::{ApiConfig, Asset, Config, LoggingConfig, TrackerConfig};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        tracker: TrackerConfig {
            capital: 100.0,
            grid_size: 10,
            buy_threshold: 0.02,
            sell_threshold: 0.02,
            poll_interval_secs: 1,
            vs_currency: "usd".to_string(),
        },
        api: ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
            asset_list_file: "list.json".to_string(),
        },
        logging: LoggingConfig {
            enable_price_logging: false,
            enable_event_logging: false,
        },
    }
}

/// A small asset listing in the provider's shape
pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "bitcoin".to_string(),
            symbol: "btc".to_string(),
            name: "Bitcoin".to_string(),
        },
        Asset {
            id: "ethereum".to_string(),
            symbol: "eth".to_string(),
            name: "Ethereum".to_string(),
        },
        Asset {
            id: "ripple".to_string(),
            symbol: "xrp".to_string(),
            name: "XRP".to_string(),
        },
    ]
}

/// Generate a random walk of strictly positive prices
pub fn generate_test_prices(base_price: f64, count: usize, volatility: f64) -> Vec<f64> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let mut prices = Vec::with_capacity(count);
    let mut current_price = base_price;

    for _ in 0..count {
        let change_pct = rng.gen_range(-volatility..volatility);
        current_price *= 1.0 + change_pct;
        prices.push(current_price);
    }

    prices
}
