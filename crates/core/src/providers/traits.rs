use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::series::RateTable;

/// Trait abstraction for all rate/price data sources.
///
/// Each external API (Binance for crypto, Frankfurter for fiat) implements
/// this trait. If a source stops working or changes its format, only that
/// one implementation is touched — the aligner and the investment tracker
/// never see source-specific payloads.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this source (for errors).
    fn name(&self) -> &str;

    /// Whether this source can serve the given logical target id.
    fn handles(&self, target: &str) -> bool;

    /// Fetch the daily series for `target` denominated in `base` over the
    /// inclusive date range, as a per-date rate table keyed by the target's
    /// canonical symbol. No retries; failures propagate uninterpreted.
    async fn fetch_history(
        &self,
        base: &str,
        target: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RateTable, CoreError>;

    /// Current spot price/rate of `target`.
    async fn latest_price(&self, target: &str) -> Result<f64, CoreError>;

    /// Daily close for the 24-hour window starting at `date`.
    /// `Ok(None)` when the source has no data for that day.
    async fn close_on(&self, target: &str, date: NaiveDate) -> Result<Option<f64>, CoreError>;
}
