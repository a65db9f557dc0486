// Grid ledger: capital partitioning and the position lifecycle

use crate::config::TrackerConfig;
use crate::core::types::{LedgerSnapshot, Position, PositionStatus};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid price sample {0}: price must be finite and positive")]
    InvalidPrice(f64),
}

/// The grid ledger. Splits a fixed amount of capital into `grid_size`
/// equal slices and deploys one more slice on each sufficiently deep dip
/// below the previous entry, releasing slices on recovery.
///
/// The ledger exclusively owns its positions; callers only ever see
/// snapshots.
#[derive(Debug, Clone)]
pub struct GridLedger {
    capital: f64,
    grid_size: usize,
    part_size: f64,
    buy_threshold: f64,
    sell_threshold: f64,
    positions: Vec<Position>,
}

impl GridLedger {
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_grid(
            config.capital,
            config.grid_size,
            config.buy_threshold,
            config.sell_threshold,
        )
    }

    pub fn with_grid(
        capital: f64,
        grid_size: usize,
        buy_threshold: f64,
        sell_threshold: f64,
    ) -> Self {
        Self {
            capital,
            grid_size,
            part_size: capital / grid_size as f64,
            buy_threshold,
            sell_threshold,
            positions: Vec::with_capacity(grid_size),
        }
    }

    /// Evaluate one price observation against the grid.
    ///
    /// At most one position opens per call; any number of open positions
    /// may close in the same call. A rejected sample leaves the ledger
    /// untouched.
    pub fn on_price(&mut self, price: f64) -> Result<LedgerSnapshot, LedgerError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(LedgerError::InvalidPrice(price));
        }

        // Buy one more step down. The reference level is the most recently
        // appended position, open or closed, not the cheapest one. Both
        // thresholds are strict: hitting the level exactly does nothing.
        let mut opened = None;
        if self.positions.len() < self.grid_size {
            let should_buy = match self.positions.last() {
                None => true,
                Some(last) => price < last.buy_price * (1.0 - self.buy_threshold),
            };
            if should_buy {
                let position = Position {
                    buy_price: price,
                    amount: self.part_size,
                    status: PositionStatus::Open,
                };
                self.positions.push(position.clone());
                opened = Some(position);
            }
        }

        // Release every open slice the price has recovered past. Closed
        // slices stay in place as session history and their slot is never
        // reused: once grid_size buys have happened, buying is over for
        // good even if everything closes.
        let mut closed = Vec::new();
        for position in &mut self.positions {
            if position.is_open() && price > position.buy_price * (1.0 + self.sell_threshold) {
                position.status = PositionStatus::Closed;
                closed.push(position.clone());
            }
        }

        Ok(LedgerSnapshot {
            opened,
            closed,
            positions: self.positions.clone(),
        })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn open_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_open()).count()
    }

    /// Capital currently deployed in open slices.
    pub fn invested(&self) -> f64 {
        self.open_count() as f64 * self.part_size
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn part_size(&self) -> f64 {
        self.part_size
    }
}
