// ═══════════════════════════════════════════════════════════════════
// Model Tests — symbols, DownsampledSeries, ChartSession,
// Recommendation, InvestmentRecord
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use currency_charts_core::errors::CoreError;
use currency_charts_core::models::chart::{
    AxisPolicy, Chart, ChartDataset, ChartKind, ChartSession, SessionProgress,
};
use currency_charts_core::models::investment::{InvestmentRecord, Recommendation};
use currency_charts_core::models::series::DownsampledSeries;
use currency_charts_core::symbols;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Symbol Resolver
// ═══════════════════════════════════════════════════════════════════

mod symbol_resolver {
    use super::*;

    #[test]
    fn known_crypto_ids_resolve_to_tickers() {
        assert_eq!(symbols::resolve("bitcoin"), "BTC");
        assert_eq!(symbols::resolve("ethereum"), "ETH");
        assert_eq!(symbols::resolve("dogecoin"), "DOGE");
    }

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(symbols::resolve("Bitcoin"), "BTC");
        assert_eq!(symbols::resolve("DOGECOIN"), "DOGE");
    }

    #[test]
    fn unknown_ids_are_uppercased_fiat_codes() {
        assert_eq!(symbols::resolve("usd"), "USD");
        assert_eq!(symbols::resolve("eur"), "EUR");
        assert_eq!(symbols::resolve("pln"), "PLN");
    }

    #[test]
    fn resolver_is_total() {
        // Every string input yields a defined output, garbage included.
        assert_eq!(symbols::resolve(""), "");
        assert_eq!(symbols::resolve("  chf  "), "CHF");
        assert_eq!(symbols::resolve("not-a-currency"), "NOT-A-CURRENCY");
    }

    #[test]
    fn resolve_is_idempotent_on_its_output() {
        for id in ["bitcoin", "usd", "EUR", "dogecoin", "chf"] {
            let once = symbols::resolve(id);
            assert_eq!(symbols::resolve(&once), once);
        }
    }

    #[test]
    fn is_crypto_matches_the_resolver_key_set() {
        assert!(symbols::is_crypto("bitcoin"));
        assert!(symbols::is_crypto("Ethereum"));
        assert!(!symbols::is_crypto("usd"));
        assert!(!symbols::is_crypto("BTC")); // tickers are outputs, not ids
    }
}

// ═══════════════════════════════════════════════════════════════════
// DownsampledSeries
// ═══════════════════════════════════════════════════════════════════

mod downsampled_series {
    use super::*;

    #[test]
    fn empty_series_has_no_points() {
        let series = DownsampledSeries::empty();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn len_counts_labels() {
        let series = DownsampledSeries {
            labels: vec![date("2024-01-01"), date("2024-01-03")],
            values: vec![Some(100.0), None],
        };
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartSession — target selection
// ═══════════════════════════════════════════════════════════════════

mod chart_session {
    use super::*;

    #[test]
    fn targets_accumulate_until_ready() {
        let mut session = ChartSession::new("usd", 2);

        let progress = session.add_target("bitcoin", "#f00").unwrap();
        assert_eq!(
            progress,
            SessionProgress::Pending {
                selected: 1,
                required: 2
            }
        );

        let progress = session.add_target("eur", "#0f0").unwrap();
        assert_eq!(progress, SessionProgress::Ready);
        assert_eq!(session.selected(), ["bitcoin", "eur"]);
    }

    #[test]
    fn base_itself_is_rejected() {
        let mut session = ChartSession::new("usd", 2);
        let err = session.add_target("usd", "#f00").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(session.selected().is_empty());
    }

    #[test]
    fn duplicate_target_does_not_advance_the_counter() {
        let mut session = ChartSession::new("usd", 2);
        session.add_target("bitcoin", "#f00").unwrap();

        let err = session.add_target("bitcoin", "#0f0").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(err.to_string().contains("BTC"));

        // Still one selected; next distinct target completes the pair.
        assert_eq!(session.selected().len(), 1);
        let progress = session.add_target("eur", "#0f0").unwrap();
        assert_eq!(progress, SessionProgress::Ready);
    }

    #[test]
    fn completed_session_builds_a_request() {
        let mut session = ChartSession::new("usd", 2);
        session.add_target("bitcoin", "#f00").unwrap();
        session.add_target("eur", "#0f0").unwrap();

        let request = session
            .into_request(date("2024-01-01"), date("2024-02-01"), "box-1")
            .unwrap();
        assert_eq!(request.base, "usd");
        assert_eq!(request.targets, ["bitcoin", "eur"]);
        assert_eq!(request.colors, ["#f00", "#0f0"]);
        assert_eq!(request.container, "box-1");
    }

    #[test]
    fn incomplete_session_refuses_to_build() {
        let mut session = ChartSession::new("usd", 3);
        session.add_target("bitcoin", "#f00").unwrap();

        let err = session
            .into_request(date("2024-01-01"), date("2024-02-01"), "box-1")
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Recommendation
// ═══════════════════════════════════════════════════════════════════

mod recommendation {
    use super::*;

    #[test]
    fn thresholds_map_to_recommendations() {
        assert_eq!(Recommendation::for_profit_percent(50.0), Recommendation::Sell);
        assert_eq!(Recommendation::for_profit_percent(20.01), Recommendation::Sell);
        assert_eq!(Recommendation::for_profit_percent(20.0), Recommendation::Hold);
        assert_eq!(Recommendation::for_profit_percent(0.0), Recommendation::Hold);
        assert_eq!(Recommendation::for_profit_percent(-10.0), Recommendation::Hold);
        assert_eq!(Recommendation::for_profit_percent(-10.01), Recommendation::BuyMore);
    }

    #[test]
    fn non_finite_percent_never_panics() {
        assert_eq!(Recommendation::for_profit_percent(f64::NAN), Recommendation::Hold);
        assert_eq!(Recommendation::for_profit_percent(f64::INFINITY), Recommendation::Sell);
        assert_eq!(
            Recommendation::for_profit_percent(f64::NEG_INFINITY),
            Recommendation::BuyMore
        );
    }

    #[test]
    fn display_matches_ledger_badges() {
        assert_eq!(Recommendation::Sell.to_string(), "Sell");
        assert_eq!(Recommendation::BuyMore.to_string(), "Buy More");
        assert_eq!(Recommendation::Hold.to_string(), "Hold");
    }
}

// ═══════════════════════════════════════════════════════════════════
// InvestmentRecord
// ═══════════════════════════════════════════════════════════════════

mod investment_record {
    use super::*;

    #[test]
    fn profit_math_for_a_winning_position() {
        // quantity 2, bought at 100, now 150
        let record = InvestmentRecord::new("bitcoin", date("2024-01-01"), 2.0, 100.0, 150.0);
        assert_eq!(record.buy_value, 200.0);
        assert_eq!(record.current_value, 300.0);
        assert_eq!(record.profit, 100.0);
        assert_eq!(record.profit_percent, 50.0);
        assert_eq!(record.recommendation, Recommendation::Sell);
    }

    #[test]
    fn equal_prices_mean_zero_profit_and_hold() {
        // The shape of the missing-candle fallback: buy price == current price.
        let record = InvestmentRecord::new("ethereum", date("2024-03-05"), 3.0, 2000.0, 2000.0);
        assert_eq!(record.profit, 0.0);
        assert_eq!(record.profit_percent, 0.0);
        assert_eq!(record.recommendation, Recommendation::Hold);
    }

    #[test]
    fn percent_rounds_to_two_decimals() {
        // profit 10 on 30 invested → 33.333…% → 33.33
        let record = InvestmentRecord::new("dogecoin", date("2024-01-01"), 1.0, 30.0, 40.0);
        assert_eq!(record.profit_percent, 33.33);
    }

    #[test]
    fn zero_buy_price_does_not_panic() {
        // Degenerate division: percent is non-finite but the record builds.
        let record = InvestmentRecord::new("bitcoin", date("2024-01-01"), 2.0, 0.0, 150.0);
        assert_eq!(record.buy_value, 0.0);
        assert_eq!(record.profit, 300.0);
        assert!(record.profit_percent.is_infinite());
        assert_eq!(record.recommendation, Recommendation::Sell);

        let flat = InvestmentRecord::new("bitcoin", date("2024-01-01"), 2.0, 0.0, 0.0);
        assert!(flat.profit_percent.is_nan());
        assert_eq!(flat.recommendation, Recommendation::Hold);
    }

    #[test]
    fn records_get_unique_ids() {
        let a = InvestmentRecord::new("bitcoin", date("2024-01-01"), 1.0, 100.0, 110.0);
        let b = InvestmentRecord::new("bitcoin", date("2024-01-01"), 1.0, 100.0, 110.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn record_serializes_to_json() {
        let record = InvestmentRecord::new("bitcoin", date("2024-01-01"), 2.0, 100.0, 150.0);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"coin_id\":\"bitcoin\""));
        assert!(json.contains("\"recommendation\":\"Sell\""));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chart model
// ═══════════════════════════════════════════════════════════════════

mod chart_model {
    use super::*;

    #[test]
    fn axis_policy_defaults_to_first_series() {
        assert_eq!(AxisPolicy::default(), AxisPolicy::FirstSeries);
    }

    #[test]
    fn chart_round_trips_through_json() {
        let chart = Chart {
            title: "USD → bitcoin".into(),
            labels: vec![date("2024-01-01"), date("2024-01-03")],
            datasets: vec![ChartDataset {
                name: "USD/bitcoin".into(),
                kind: ChartKind::Line,
                color: "#e8590c".into(),
                values: vec![Some(42000.0), None],
            }],
        };

        let json = serde_json::to_string(&chart).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart);
    }
}
