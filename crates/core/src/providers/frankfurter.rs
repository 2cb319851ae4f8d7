use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::series::RateTable;
use crate::symbols;
use super::traits::RateProvider;

const BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Frankfurter API provider for fiat currency exchange rates.
///
/// - **Free**: No API key, no rate limits, open-source.
/// - **Source**: European Central Bank (ECB) data.
/// - **Coverage**: ~30+ currencies (EUR, USD, PLN, GBP, JPY, etc.)
/// - **Endpoints**: `/latest`, `/{date}`, `/{start}..{end}`
///
/// Rates only exist for ECB business days; weekends and holidays are
/// simply absent from the time series, and this provider does not fill
/// them in.
pub struct FrankfurterProvider {
    client: Client,
}

impl FrankfurterProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Frankfurter API response types ──────────────────────────────────

#[derive(Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

#[derive(Deserialize)]
struct TimeSeriesResponse {
    rates: HashMap<String, HashMap<String, f64>>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for FrankfurterProvider {
    fn name(&self) -> &str {
        "Frankfurter"
    }

    /// Anything outside the crypto id set is treated as a fiat code.
    fn handles(&self, target: &str) -> bool {
        !symbols::is_crypto(target)
    }

    /// Fetch the daily rate table for `base` → `target` over the inclusive
    /// range. The per-date maps come back keyed by currency code already,
    /// so no reshaping is needed; value extraction happens in the
    /// downsampler.
    async fn fetch_history(
        &self,
        base: &str,
        target: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RateTable, CoreError> {
        let base = base.to_uppercase();
        let target = symbols::resolve(target);

        let from_str = from.format("%Y-%m-%d");
        let to_str = to.format("%Y-%m-%d");
        let url = format!("{BASE_URL}/{from_str}..{to_str}?base={base}&symbols={target}");

        let resp: TimeSeriesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("Failed to parse time series for {base}/{target}: {e}"),
            })?;

        let mut table = RateTable::new();
        for (date_str, rates) in resp.rates {
            let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") else {
                continue;
            };
            table.insert(date, rates);
        }

        Ok(table)
    }

    async fn latest_price(&self, target: &str) -> Result<f64, CoreError> {
        let base = symbols::resolve(target);
        let quote = "USD";

        // Same currency → rate is 1.0
        if base == quote {
            return Ok(1.0);
        }

        let url = format!("{BASE_URL}/latest?base={base}&symbols={quote}");

        let resp: RatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("Failed to parse latest rate for {base}/{quote}: {e}"),
            })?;

        resp.rates.get(quote).copied().ok_or_else(|| CoreError::Api {
            provider: "Frankfurter".into(),
            message: format!("No rate found for {base} → {quote}"),
        })
    }

    async fn close_on(&self, target: &str, date: NaiveDate) -> Result<Option<f64>, CoreError> {
        let base = symbols::resolve(target);
        let quote = "USD";

        if base == quote {
            return Ok(Some(1.0));
        }

        let date_str = date.format("%Y-%m-%d");
        let url = format!("{BASE_URL}/{date_str}?base={base}&symbols={quote}");

        let resp: RatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("Failed to parse rate for {base}/{quote} on {date}: {e}"),
            })?;

        Ok(resp.rates.get(quote).copied())
    }
}
