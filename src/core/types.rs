// Common types used across the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a single capital slice. A slice opens once and closes at
/// most once; there is no way back to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Open,
    Closed,
}

/// One capital slice with its recorded entry price.
///
/// `buy_price` and `amount` are fixed at creation; only `status` ever
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub buy_price: f64,
    pub amount: f64,
    pub status: PositionStatus,
}

impl Position {
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }
}

/// A single observed price, stamped when it was fetched. Not retained by
/// the ledger; history keeping is the presenter's business.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub value: f64,
    pub observed_at: DateTime<Utc>,
}

impl PriceSample {
    pub fn now(value: f64) -> Self {
        Self {
            value,
            observed_at: Utc::now(),
        }
    }
}

/// What one ledger evaluation produced: the slice opened this call (if
/// any), the slices closed this call, and the full position list.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub opened: Option<Position>,
    pub closed: Vec<Position>,
    pub positions: Vec<Position>,
}

impl LedgerSnapshot {
    pub fn open_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_open()).count()
    }
}

/// Whether a scheduler tick updated the ledger or had to be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Updated,
    Skipped,
}

// Reference grid parameters: 100 units of capital in 10 slices, 2% steps
// both ways, a fresh price every 10 seconds.
pub const DEFAULT_CAPITAL: f64 = 100.0;
pub const DEFAULT_GRID_SIZE: usize = 10;
pub const DEFAULT_BUY_THRESHOLD: f64 = 0.02;
pub const DEFAULT_SELL_THRESHOLD: f64 = 0.02;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_VS_CURRENCY: &str = "usd";
