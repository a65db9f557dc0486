// Integration tests for the grid ledger invariants

mod common;

use common::{create_test_config, generate_test_prices};
use grid_tracker::{GridLedger, PositionStatus};

#[test]
fn test_position_count_never_exceeds_grid_size() {
    let config = create_test_config();
    let mut ledger = GridLedger::new(&config.tracker);

    for price in generate_test_prices(100.0, 500, 0.05) {
        ledger.on_price(price).unwrap();
        assert!(ledger.positions().len() <= config.tracker.grid_size);
    }
}

#[test]
fn test_every_amount_equals_capital_over_grid_size() {
    let config = create_test_config();
    let part_size = config.tracker.capital / config.tracker.grid_size as f64;
    let mut ledger = GridLedger::new(&config.tracker);

    for price in generate_test_prices(250.0, 300, 0.04) {
        ledger.on_price(price).unwrap();
    }

    for position in ledger.positions() {
        assert_eq!(position.amount, part_size);
    }
}

#[test]
fn test_buy_chain_is_strictly_stepped() {
    let config = create_test_config();
    let mut ledger = GridLedger::new(&config.tracker);

    for price in generate_test_prices(100.0, 500, 0.03) {
        ledger.on_price(price).unwrap();
    }

    // Each entry had to be strictly below the previous one's buy level at
    // the moment it opened
    let positions = ledger.positions();
    for pair in positions.windows(2) {
        assert!(pair[1].buy_price < pair[0].buy_price * (1.0 - config.tracker.buy_threshold));
    }
}

#[test]
fn test_closed_positions_never_reopen() {
    let config = create_test_config();
    let mut ledger = GridLedger::new(&config.tracker);
    let mut closed_seen = vec![false; config.tracker.grid_size];

    for price in generate_test_prices(100.0, 500, 0.05) {
        ledger.on_price(price).unwrap();
        for (i, position) in ledger.positions().iter().enumerate() {
            if closed_seen[i] {
                assert_eq!(position.status, PositionStatus::Closed);
            }
            if position.status == PositionStatus::Closed {
                closed_seen[i] = true;
            }
        }
    }
}

#[test]
fn test_full_cycle_permanently_exhausts_the_grid() {
    let config = create_test_config();
    let mut ledger = GridLedger::new(&config.tracker);

    // Walk the price down until every slice is deployed
    let mut price = 100.0;
    while ledger.positions().len() < config.tracker.grid_size {
        ledger.on_price(price).unwrap();
        price *= 0.95;
    }

    // Recover past every entry, then dip again: the grid stays exhausted
    ledger.on_price(500.0).unwrap();
    assert_eq!(ledger.open_count(), 0);

    for price in generate_test_prices(50.0, 100, 0.05) {
        let snapshot = ledger.on_price(price).unwrap();
        assert!(snapshot.opened.is_none());
    }
    assert_eq!(ledger.positions().len(), config.tracker.grid_size);
}
