// Polling scheduler: one tick = fetch, evaluate, present

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, MissedTickBehavior};
use tracing::warn;

use crate::core::ledger::GridLedger;
use crate::core::types::{PriceSample, TickOutcome};
use crate::error::TrackerResult;
use crate::presenter::Presenter;

/// Source of the current price for one asset in one quote currency.
/// Any error means the price is unavailable this round.
#[async_trait]
pub trait PriceSource {
    async fn current_price(&self, asset_id: &str, vs_currency: &str) -> TrackerResult<f64>;
}

/// Drives the fetch-evaluate-present cycle for one tracked asset at a
/// time. Owns the ledger outright; nothing else mutates it.
pub struct Tracker<S, P> {
    source: S,
    presenter: P,
    ledger: GridLedger,
    asset_id: String,
    vs_currency: String,
    poll_interval: Duration,
}

impl<S, P> Tracker<S, P>
where
    S: PriceSource,
    P: Presenter,
{
    pub fn new(
        ledger: GridLedger,
        source: S,
        presenter: P,
        asset_id: impl Into<String>,
        vs_currency: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            presenter,
            ledger,
            asset_id: asset_id.into(),
            vs_currency: vs_currency.into(),
            poll_interval,
        }
    }

    /// Switch the tracked asset, taking effect on the next tick.
    ///
    /// The presenter starts a fresh display history; the ledger keeps its
    /// positions. Positions surviving an asset switch is inherited,
    /// caller-visible behavior, not an accident of this implementation.
    pub fn select_asset(&mut self, asset_id: impl Into<String>) {
        self.asset_id = asset_id.into();
        self.presenter.asset_selected(&self.asset_id);
    }

    /// One fetch-evaluate-present cycle.
    ///
    /// Fetch failures and unusable prices skip the ledger update for this
    /// tick and notify the presenter; neither ends the run loop.
    pub async fn tick(&mut self) -> TickOutcome {
        let price = match self
            .source
            .current_price(&self.asset_id, &self.vs_currency)
            .await
        {
            Ok(price) => price,
            Err(err) => {
                warn!("⚠️  No price for {}: {}", self.asset_id, err);
                self.presenter.fetch_failed(&self.asset_id);
                return TickOutcome::Skipped;
            }
        };

        let sample = PriceSample::now(price);
        match self.ledger.on_price(price) {
            Ok(snapshot) => {
                self.presenter
                    .price_update(&self.asset_id, &sample, &snapshot);
                TickOutcome::Updated
            }
            Err(err) => {
                // Providers can hand back zero or junk; treat it like an
                // unavailable tick instead of tearing the loop down.
                warn!("⚠️  Discarding price for {}: {}", self.asset_id, err);
                self.presenter.fetch_failed(&self.asset_id);
                TickOutcome::Skipped
            }
        }
    }

    /// Run ticks at the configured cadence until the task is dropped.
    ///
    /// Each tick runs to completion before the next one fires, so ledger
    /// updates never interleave. A slow fetch delays the following tick
    /// rather than stacking a second one behind it.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    pub fn ledger(&self) -> &GridLedger {
        &self.ledger
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
