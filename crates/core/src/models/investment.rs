use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discrete buy/hold/sell advice derived from the profit percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Profit above +20% — take the gain
    Sell,
    /// Loss beyond −10% — average down
    BuyMore,
    /// Anything in between
    Hold,
}

impl Recommendation {
    /// Pure function of the profit percentage.
    ///
    /// Degenerate inputs never panic: NaN fails both threshold comparisons
    /// and lands on `Hold`; ±∞ (zero buy value) follows its sign.
    #[must_use]
    pub fn for_profit_percent(percent: f64) -> Self {
        if percent > 20.0 {
            Recommendation::Sell
        } else if percent < -10.0 {
            Recommendation::BuyMore
        } else {
            Recommendation::Hold
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Sell => write!(f, "Sell"),
            Recommendation::BuyMore => write!(f, "Buy More"),
            Recommendation::Hold => write!(f, "Hold"),
        }
    }
}

/// One row of the investment ledger.
///
/// Computed once at record time and never updated afterwards; a recorded
/// purchase keeps the prices that were current when it was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Logical crypto id, e.g. "bitcoin"
    pub coin_id: String,

    /// Date of the purchase (daily granularity)
    pub purchase_date: NaiveDate,

    /// Quantity purchased (always positive)
    pub quantity: f64,

    /// Daily close on the purchase date, in USDT. Falls back to the
    /// current price when no candle exists for that day, in which case
    /// profit computes to exactly zero.
    pub buy_price: f64,

    /// Spot price at record time, in USDT
    pub current_price: f64,

    /// quantity × buy_price
    pub buy_value: f64,

    /// quantity × current_price
    pub current_value: f64,

    /// current_value − buy_value
    pub profit: f64,

    /// profit / buy_value × 100, rounded to 2 decimal places.
    /// Non-finite when buy_value is zero — stored as computed.
    pub profit_percent: f64,

    pub recommendation: Recommendation,
}

impl InvestmentRecord {
    /// Build a record from the two fetched prices.
    pub fn new(
        coin_id: impl Into<String>,
        purchase_date: NaiveDate,
        quantity: f64,
        buy_price: f64,
        current_price: f64,
    ) -> Self {
        let buy_value = quantity * buy_price;
        let current_value = quantity * current_price;
        let profit = current_value - buy_value;
        let profit_percent = round2(profit / buy_value * 100.0);

        Self {
            id: Uuid::new_v4(),
            coin_id: coin_id.into(),
            purchase_date,
            quantity,
            buy_price,
            current_price,
            buy_value,
            current_value,
            profit,
            profit_percent,
            recommendation: Recommendation::for_profit_percent(profit_percent),
        }
    }
}

/// Round to 2 decimal places. Non-finite values pass through unchanged.
fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        value
    }
}
