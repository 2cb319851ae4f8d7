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

const BASE_URL: &str = "https://api.binance.com/api/v3";

/// Maximum number of daily candles per request.
///
/// This is a hard boundary, not a page size: a range producing more than
/// 1000 daily candles (~2.7 years) is silently truncated to the window the
/// exchange returns. Known limitation — no pagination is attempted.
const MAX_CANDLES: u32 = 1000;

/// Stablecoin denomination for spot and purchase-date lookups.
const SPOT_QUOTE: &str = "USDT";

/// Binance API provider for cryptocurrency daily candles and spot prices.
///
/// - **Free**: No API key required for public market data.
/// - **Endpoints**: `/klines` (daily OHLCV), `/ticker/price` (spot).
/// - **Format**: klines are positional JSON arrays; prices are numeric
///   strings and are parsed with validation at this boundary, so malformed
///   payloads surface as typed errors instead of NaN downstream.
pub struct BinanceProvider {
    client: Client,
}

impl BinanceProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    /// Parse a numeric-string price field, rejecting garbage and
    /// non-finite values with a typed error.
    fn parse_price(raw: &str, context: &str) -> Result<f64, CoreError> {
        let price: f64 = raw.parse().map_err(|e| CoreError::Api {
            provider: "Binance".into(),
            message: format!("Invalid price format for {context}: {e}"),
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Api {
                provider: "Binance".into(),
                message: format!("Invalid price value for {context}: {price}"),
            });
        }
        Ok(price)
    }

    /// Fetch daily candles for a trading pair over a millisecond range.
    async fn fetch_klines(
        &self,
        pair: &str,
        start_ms: i64,
        end_ms: i64,
        limit: u32,
    ) -> Result<Vec<Kline>, CoreError> {
        let url = format!(
            "{BASE_URL}/klines?symbol={pair}&interval=1d&startTime={start_ms}&endTime={end_ms}&limit={limit}"
        );

        let resp: Vec<Kline> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Binance".into(),
                message: format!("Failed to parse klines for {pair}: {e}"),
            })?;

        Ok(resp)
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Binance API response types ──────────────────────────────────────

/// One daily candle, as the positional array Binance returns.
/// Only open time and close are read; the rest must still be present
/// for the array to deserialize.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Kline(
    i64,    // 0: Open time (epoch ms)
    String, // 1: Open
    String, // 2: High
    String, // 3: Low
    String, // 4: Close
    String, // 5: Volume
    i64,    // 6: Close time
    String, // 7: Quote asset volume
    i64,    // 8: Number of trades
    String, // 9: Taker buy base volume
    String, // 10: Taker buy quote volume
    String, // 11: Ignore
);

impl Kline {
    fn open_time_ms(&self) -> i64 {
        self.0
    }

    fn close_str(&self) -> &str {
        &self.4
    }
}

#[derive(Deserialize)]
struct TickerPriceResponse {
    price: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for BinanceProvider {
    fn name(&self) -> &str {
        "Binance"
    }

    fn handles(&self, target: &str) -> bool {
        symbols::is_crypto(target)
    }

    /// Fetch daily closes for `target` quoted in `base`, reshaped into a
    /// per-date table keyed by the resolved ticker symbol.
    ///
    /// Ranges longer than [`MAX_CANDLES`] days truncate to the exchange's
    /// returned window.
    async fn fetch_history(
        &self,
        base: &str,
        target: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RateTable, CoreError> {
        let symbol = symbols::resolve(target);
        let pair = format!("{}{}", symbol, base.to_uppercase());

        let start_ms = from
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc()
            .timestamp_millis();
        let end_ms = to
            .and_hms_opt(23, 59, 59)
            .unwrap_or_default()
            .and_utc()
            .timestamp_millis();

        let klines = self.fetch_klines(&pair, start_ms, end_ms, MAX_CANDLES).await?;

        let mut table = RateTable::new();
        for kline in &klines {
            let Some(dt) = chrono::DateTime::from_timestamp_millis(kline.open_time_ms()) else {
                continue;
            };
            let close = Self::parse_price(kline.close_str(), &pair)?;
            table
                .entry(dt.date_naive())
                .or_insert_with(HashMap::new)
                .insert(symbol.clone(), close);
        }

        Ok(table)
    }

    async fn latest_price(&self, target: &str) -> Result<f64, CoreError> {
        let symbol = symbols::resolve(target);
        let pair = format!("{symbol}{SPOT_QUOTE}");
        let url = format!("{BASE_URL}/ticker/price?symbol={pair}");

        let resp: TickerPriceResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Binance".into(),
                message: format!("Failed to parse ticker price for {pair}: {e}"),
            })?;

        Self::parse_price(&resp.price, &pair)
    }

    /// Single-candle lookup for the 24-hour window starting at `date`,
    /// against the stablecoin pair. An empty response is `Ok(None)` — the
    /// caller decides how to degrade.
    async fn close_on(&self, target: &str, date: NaiveDate) -> Result<Option<f64>, CoreError> {
        let symbol = symbols::resolve(target);
        let pair = format!("{symbol}{SPOT_QUOTE}");

        let start_ms = date
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc()
            .timestamp_millis();
        let end_ms = start_ms + 24 * 60 * 60 * 1000;

        let klines = self.fetch_klines(&pair, start_ms, end_ms, 1).await?;

        match klines.first() {
            Some(kline) => Ok(Some(Self::parse_price(kline.close_str(), &pair)?)),
            None => Ok(None),
        }
    }
}
