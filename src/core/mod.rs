// Ledger and scheduling core

pub mod ledger;
pub mod scheduler;
pub mod types;

// Re-export commonly used types
pub use ledger::{GridLedger, LedgerError};
pub use scheduler::{PriceSource, Tracker};
pub use types::{LedgerSnapshot, Position, PositionStatus, PriceSample, TickOutcome};
