use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::investment::InvestmentRecord;
use crate::providers::registry::RateProviderRegistry;
use crate::symbols;

/// Tracks simple buy-and-hold crypto purchases in an append-only ledger.
///
/// Each recorded purchase fetches the spot price and the daily close
/// nearest the purchase date, computes value/profit/recommendation once,
/// and appends an immutable row. Prior rows are never recomputed — the
/// ledger shows what was true when each row was entered.
pub struct InvestmentService {
    ledger: Vec<InvestmentRecord>,
}

impl InvestmentService {
    pub fn new() -> Self {
        Self { ledger: Vec::new() }
    }

    /// Record one purchase and append it to the ledger.
    ///
    /// When the purchase-date candle lookup returns no data, the buy price
    /// falls back to the current price and profit computes to exactly zero;
    /// the row is still appended.
    pub async fn record_purchase(
        &mut self,
        registry: &RateProviderRegistry,
        coin_id: &str,
        purchase_date: NaiveDate,
        quantity: f64,
    ) -> Result<&InvestmentRecord, CoreError> {
        if !symbols::is_crypto(coin_id) {
            return Err(CoreError::ValidationError(format!(
                "'{coin_id}' is not a recognized crypto asset"
            )));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Quantity must be a positive number, got {quantity}"
            )));
        }

        let provider = registry
            .provider_for(coin_id)
            .ok_or_else(|| CoreError::NoProvider(coin_id.to_string()))?;

        let current_price = provider.latest_price(coin_id).await?;
        let buy_price = provider
            .close_on(coin_id, purchase_date)
            .await?
            .unwrap_or(current_price);

        let record =
            InvestmentRecord::new(coin_id, purchase_date, quantity, buy_price, current_price);
        let idx = self.ledger.len();
        self.ledger.push(record);
        Ok(&self.ledger[idx])
    }

    /// All recorded purchases, oldest first.
    #[must_use]
    pub fn ledger(&self) -> &[InvestmentRecord] {
        &self.ledger
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

impl Default for InvestmentService {
    fn default() -> Self {
        Self::new()
    }
}
