// Presentation seam between the scheduler and whatever renders ticks

use tracing::{info, warn};

use crate::config::LoggingConfig;
use crate::core::types::{LedgerSnapshot, PriceSample};

/// Consumer of per-tick results. Rendering lives behind this trait so the
/// ledger and scheduler stay headless and testable.
pub trait Presenter {
    /// The tracked asset changed; transient display state starts over.
    fn asset_selected(&mut self, asset_id: &str);

    /// A tick produced a price and an updated ledger snapshot.
    fn price_update(&mut self, asset_id: &str, sample: &PriceSample, snapshot: &LedgerSnapshot);

    /// A tick could not obtain a usable price.
    fn fetch_failed(&mut self, asset_id: &str);
}

/// Console renderer: log lines stand in for the original chart window.
/// Keeps the session's price history so a richer front end could plot it;
/// the history resets when the tracked asset changes.
pub struct ConsolePresenter {
    logging: LoggingConfig,
    history: Vec<PriceSample>,
}

impl ConsolePresenter {
    pub fn new(logging: LoggingConfig) -> Self {
        Self {
            logging,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[PriceSample] {
        &self.history
    }
}

impl Presenter for ConsolePresenter {
    fn asset_selected(&mut self, asset_id: &str) {
        self.history.clear();
        info!("🔄 Now tracking {}", asset_id);
    }

    fn price_update(&mut self, asset_id: &str, sample: &PriceSample, snapshot: &LedgerSnapshot) {
        self.history.push(sample.clone());

        if self.logging.enable_price_logging {
            info!("💱 {} = {}", asset_id, sample.value);
        }

        if self.logging.enable_event_logging {
            if let Some(opened) = &snapshot.opened {
                info!("🟢 Bought {:.2} at {}", opened.amount, opened.buy_price);
            }
            for closed in &snapshot.closed {
                info!(
                    "🔴 Sold {:.2} bought at {} (exit {})",
                    closed.amount, closed.buy_price, sample.value
                );
            }
            if snapshot.opened.is_some() || !snapshot.closed.is_empty() {
                info!(
                    "   📊 Positions: {} open / {} closed",
                    snapshot.open_count(),
                    snapshot.positions.len() - snapshot.open_count()
                );
            }
        }
    }

    fn fetch_failed(&mut self, asset_id: &str) {
        warn!("⚠️  Could not fetch a price for {}", asset_id);
    }
}
