// End-to-end tests: HTTP price source through the scheduler and ledger

mod common;

use std::time::Duration;

use common::create_test_config;
use grid_tracker::{
    CoinGeckoClient, GridLedger, LedgerSnapshot, Presenter, PriceSample, TickOutcome, Tracker,
};

/// Presenter that records what the scheduler hands it
#[derive(Default)]
struct RecordingPresenter {
    updates: Vec<(f64, LedgerSnapshot)>,
    failures: usize,
}

impl Presenter for RecordingPresenter {
    fn asset_selected(&mut self, _asset_id: &str) {}

    fn price_update(&mut self, _asset_id: &str, sample: &PriceSample, snapshot: &LedgerSnapshot) {
        self.updates.push((sample.value, snapshot.clone()));
    }

    fn fetch_failed(&mut self, _asset_id: &str) {
        self.failures += 1;
    }
}

fn price_body(asset_id: &str, vs_currency: &str, price: f64) -> String {
    format!(r#"{{"{}":{{"{}":{}}}}}"#, asset_id, vs_currency, price)
}

fn test_tracker(client: CoinGeckoClient) -> Tracker<CoinGeckoClient, RecordingPresenter> {
    let config = create_test_config();
    Tracker::new(
        GridLedger::new(&config.tracker),
        client,
        RecordingPresenter::default(),
        "bitcoin",
        "usd",
        Duration::from_secs(config.tracker.poll_interval_secs),
    )
}

#[tokio::test]
async fn test_tick_fetches_evaluates_and_presents() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/simple/price")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(price_body("bitcoin", "usd", 100.0))
        .create_async()
        .await;

    let mut tracker = test_tracker(CoinGeckoClient::with_base_url(server.url()));

    assert_eq!(tracker.tick().await, TickOutcome::Updated);
    assert_eq!(tracker.ledger().positions().len(), 1);
    assert_eq!(tracker.ledger().positions()[0].buy_price, 100.0);

    let presenter = tracker.presenter();
    assert_eq!(presenter.updates.len(), 1);
    assert_eq!(presenter.updates[0].0, 100.0);
    assert!(presenter.updates[0].1.opened.is_some());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_skips_the_tick() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/simple/price")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let mut tracker = test_tracker(CoinGeckoClient::with_base_url(server.url()));

    assert_eq!(tracker.tick().await, TickOutcome::Skipped);
    assert!(tracker.ledger().positions().is_empty());
    assert_eq!(tracker.presenter().failures, 1);
    assert!(tracker.presenter().updates.is_empty());
}

#[tokio::test]
async fn test_missing_price_key_skips_the_tick() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/simple/price")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let mut tracker = test_tracker(CoinGeckoClient::with_base_url(server.url()));

    assert_eq!(tracker.tick().await, TickOutcome::Skipped);
    assert!(tracker.ledger().positions().is_empty());
    assert_eq!(tracker.presenter().failures, 1);
}

#[tokio::test]
async fn test_dip_and_recovery_across_ticks() {
    let mut server = mockito::Server::new_async().await;
    let mut tracker = test_tracker(CoinGeckoClient::with_base_url(server.url()));

    // Three polls: open at 100, open again at 97, close the 97 slice at 99.
    // The newest mock wins, so register each price just before its tick.
    for price in [100.0, 97.0, 99.0] {
        server
            .mock("GET", "/api/v3/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(price_body("bitcoin", "usd", price))
            .create_async()
            .await;
        tracker.tick().await;
    }

    let positions = tracker.ledger().positions();
    assert_eq!(positions.len(), 2);
    assert!(positions[0].is_open());
    assert!(!positions[1].is_open());

    let last_snapshot = &tracker.presenter().updates.last().unwrap().1;
    assert_eq!(last_snapshot.closed.len(), 1);
    assert_eq!(last_snapshot.closed[0].buy_price, 97.0);
}
