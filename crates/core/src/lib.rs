pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod symbols;

use chrono::NaiveDate;
use models::{
    chart::{AxisPolicy, Chart, ChartOutcome, ChartRequest},
    investment::InvestmentRecord,
};
use providers::registry::RateProviderRegistry;
use services::{
    chart_service::{ChartRegistry, ChartService},
    downsample::DEFAULT_MAX_POINTS,
    investment_service::InvestmentService,
};

use errors::CoreError;

/// Proof that a chart build was started for a container.
///
/// A ticket is taken when the user interaction begins (e.g. the final drop
/// lands) and presented when the build completes. Starting a newer build
/// for the same container invalidates every earlier ticket, so overlapping
/// interactions cannot race each other's results into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTicket {
    container: String,
    generation: u64,
}

/// Main entry point for the Currency Charts core library.
///
/// Owns the rate providers, the per-container chart registry, and the
/// investment ledger. All external fetches are awaited sequentially;
/// there is no shared mutable state beyond this struct itself.
#[must_use]
pub struct CurrencyCharts {
    registry: RateProviderRegistry,
    chart_service: ChartService,
    charts: ChartRegistry,
    investments: InvestmentService,
    axis_policy: AxisPolicy,
    max_points: usize,
}

impl std::fmt::Debug for CurrencyCharts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyCharts")
            .field("charts", &self.charts.containers().len())
            .field("ledger_rows", &self.investments.len())
            .field("axis_policy", &self.axis_policy)
            .field("max_points", &self.max_points)
            .finish()
    }
}

impl CurrencyCharts {
    /// Create a tracker wired to the default Binance + Frankfurter sources.
    pub fn new() -> Self {
        Self::with_providers(RateProviderRegistry::new_with_defaults())
    }

    /// Create a tracker with a caller-supplied provider registry.
    /// The seam used by tests and by frontends with their own sources.
    pub fn with_providers(registry: RateProviderRegistry) -> Self {
        Self {
            registry,
            chart_service: ChartService::new(),
            charts: ChartRegistry::new(),
            investments: InvestmentService::new(),
            axis_policy: AxisPolicy::default(),
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    // ── Configuration ───────────────────────────────────────────────

    /// Select how multiple series share one label axis.
    pub fn set_axis_policy(&mut self, policy: AxisPolicy) {
        self.axis_policy = policy;
    }

    #[must_use]
    pub fn axis_policy(&self) -> AxisPolicy {
        self.axis_policy
    }

    /// Set the per-series point budget. Must be at least 1.
    pub fn set_max_points(&mut self, max_points: usize) -> Result<(), CoreError> {
        if max_points == 0 {
            return Err(CoreError::ValidationError(
                "max_points must be at least 1".to_string(),
            ));
        }
        self.max_points = max_points;
        Ok(())
    }

    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Start a build interaction for a container, superseding any build
    /// still in flight for the same container.
    pub fn begin_build(&mut self, container: &str) -> BuildTicket {
        BuildTicket {
            container: container.to_string(),
            generation: self.charts.begin_build(container),
        }
    }

    /// Build one multi-series chart and install it for its container.
    ///
    /// Equivalent to [`begin_build`](Self::begin_build) followed by
    /// [`draw_chart_with`](Self::draw_chart_with).
    pub async fn draw_chart(&mut self, request: ChartRequest) -> Result<ChartOutcome, CoreError> {
        let ticket = self.begin_build(&request.container);
        self.draw_chart_with(ticket, request).await
    }

    /// Build one multi-series chart under a previously taken ticket.
    ///
    /// Targets are fetched and downsampled one at a time, in caller order;
    /// a single failed fetch aborts the whole build. If a newer ticket was
    /// taken for the same container while this build ran, the result is
    /// discarded and `ChartOutcome::Superseded` is returned.
    pub async fn draw_chart_with(
        &mut self,
        ticket: BuildTicket,
        request: ChartRequest,
    ) -> Result<ChartOutcome, CoreError> {
        if ticket.container != request.container {
            return Err(CoreError::ValidationError(format!(
                "Build ticket for '{}' used with container '{}'",
                ticket.container, request.container
            )));
        }

        let chart = self
            .chart_service
            .build_chart(&self.registry, &request, self.axis_policy, self.max_points)
            .await?;

        if self
            .charts
            .install(&request.container, ticket.generation, chart.clone())
        {
            Ok(ChartOutcome::Drawn(chart))
        } else {
            Ok(ChartOutcome::Superseded)
        }
    }

    /// The chart currently installed for a container — the export path.
    /// Fails with `ChartNotFound` when no chart has been drawn there.
    pub fn chart_for(&self, container: &str) -> Result<&Chart, CoreError> {
        self.charts.chart_for(container)
    }

    /// Containers that currently have a chart, sorted.
    #[must_use]
    pub fn containers(&self) -> Vec<&str> {
        self.charts.containers()
    }

    // ── Investments ─────────────────────────────────────────────────

    /// Record a buy-and-hold purchase and append it to the ledger.
    /// Returns the computed row.
    pub async fn record_purchase(
        &mut self,
        coin_id: &str,
        purchase_date: NaiveDate,
        quantity: f64,
    ) -> Result<InvestmentRecord, CoreError> {
        self.investments
            .record_purchase(&self.registry, coin_id, purchase_date, quantity)
            .await
            .cloned()
    }

    /// All recorded purchases, oldest first.
    #[must_use]
    pub fn ledger(&self) -> &[InvestmentRecord] {
        self.investments.ledger()
    }

    #[must_use]
    pub fn ledger_len(&self) -> usize {
        self.investments.len()
    }

    /// Export the ledger as a JSON string for display layers.
    pub fn ledger_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self.investments.ledger()).map_err(CoreError::from)
    }
}

impl Default for CurrencyCharts {
    fn default() -> Self {
        Self::new()
    }
}
