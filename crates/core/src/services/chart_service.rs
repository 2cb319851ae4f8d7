use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::chart::{AxisPolicy, Chart, ChartDataset, ChartKind, ChartRequest};
use crate::models::series::RateTable;
use crate::providers::registry::RateProviderRegistry;
use crate::services::downsample::{downsample, sample_dates};
use crate::symbols;

/// Builds multi-series comparison charts.
///
/// For each requested target, in caller order: route to the matching
/// source, fetch the daily series against the shared base, downsample it,
/// and place it as one dataset on a shared date axis. Fetches are awaited
/// one at a time; a single failed fetch aborts the whole build with no
/// partial chart.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Check a request before any fetch is made.
    ///
    /// Rejects empty target lists, color/target length mismatches,
    /// reversed date ranges, duplicate targets, and a target equal to
    /// the base.
    pub fn validate(request: &ChartRequest) -> Result<(), CoreError> {
        if request.targets.is_empty() {
            return Err(CoreError::ValidationError(
                "At least one target currency is required".to_string(),
            ));
        }
        if request.colors.len() != request.targets.len() {
            return Err(CoreError::ValidationError(format!(
                "{} colors supplied for {} targets",
                request.colors.len(),
                request.targets.len()
            )));
        }
        if request.from > request.to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({}) must not be after 'to' date ({})",
                request.from, request.to
            )));
        }
        for (i, target) in request.targets.iter().enumerate() {
            if *target == request.base {
                return Err(CoreError::ValidationError(
                    "Cannot use same currency as base".to_string(),
                ));
            }
            if request.targets[..i].contains(target) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate target: {target}"
                )));
            }
        }
        Ok(())
    }

    /// Fetch, downsample, and align every target onto one chart.
    pub async fn build_chart(
        &self,
        registry: &RateProviderRegistry,
        request: &ChartRequest,
        policy: AxisPolicy,
        max_points: usize,
    ) -> Result<Chart, CoreError> {
        Self::validate(request)?;

        // Fetch all targets sequentially, preserving caller order.
        let mut tables: Vec<(String, RateTable)> = Vec::with_capacity(request.targets.len());
        for target in &request.targets {
            let provider = registry
                .provider_for(target)
                .ok_or_else(|| CoreError::NoProvider(target.clone()))?;
            let table = provider
                .fetch_history(&request.base, target, request.from, request.to)
                .await?;
            tables.push((target.clone(), table));
        }

        let (labels, value_sets) = match policy {
            AxisPolicy::FirstSeries => Self::first_series_axis(&tables, max_points),
            AxisPolicy::UnionDates => Self::union_axis(&tables, max_points),
        };

        let datasets = request
            .targets
            .iter()
            .zip(request.colors.iter())
            .zip(value_sets)
            .map(|((target, color), values)| ChartDataset {
                name: format!("{}/{}", request.base, target),
                kind: ChartKind::Line,
                color: color.clone(),
                values,
            })
            .collect();

        Ok(Chart {
            title: format!("{} → {}", request.base, request.targets.join(", ")),
            labels,
            datasets,
        })
    }

    /// First-series-defines-axis policy.
    ///
    /// The axis is the first target's downsampled labels; every later
    /// series keeps its own sampling and is assumed (not verified) to line
    /// up positionally. When targets differ in data availability a later
    /// point may sit under a label from a different date — the documented
    /// caveat of this policy.
    fn first_series_axis(
        tables: &[(String, RateTable)],
        max_points: usize,
    ) -> (Vec<NaiveDate>, Vec<Vec<Option<f64>>>) {
        let mut labels = Vec::new();
        let mut value_sets = Vec::with_capacity(tables.len());

        for (i, (target, table)) in tables.iter().enumerate() {
            let refined = downsample(table, &symbols::resolve(target), max_points);
            if i == 0 {
                labels = refined.labels;
            }
            value_sets.push(refined.values);
        }

        (labels, value_sets)
    }

    /// Union-of-dates policy.
    ///
    /// The union of all series' date keys is downsampled once into a shared
    /// axis, then every series is sampled at exactly those labels, `None`
    /// where it has no data.
    fn union_axis(
        tables: &[(String, RateTable)],
        max_points: usize,
    ) -> (Vec<NaiveDate>, Vec<Vec<Option<f64>>>) {
        let union: BTreeSet<NaiveDate> = tables
            .iter()
            .flat_map(|(_, table)| table.keys().copied())
            .collect();
        let all_dates: Vec<NaiveDate> = union.into_iter().collect();
        let labels = sample_dates(&all_dates, max_points);

        let value_sets = tables
            .iter()
            .map(|(target, table)| {
                let key = symbols::resolve(target);
                labels
                    .iter()
                    .map(|date| table.get(date).and_then(|rates| rates.get(&key)).copied())
                    .collect()
            })
            .collect();

        (labels, value_sets)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-container chart registry with build supersession.
///
/// Replaces a single mutable "last chart" reference: every rendered chart
/// is keyed by the identity of its render container, so multiple charts
/// coexist and export always targets a caller-named container.
///
/// Each build takes a generation number for its container via
/// [`begin_build`](Self::begin_build). Installation only succeeds while
/// that generation is still current, so a newer build for the same
/// container makes any older in-flight build's result a no-op instead of
/// clobbering the newer chart.
#[derive(Default)]
pub struct ChartRegistry {
    charts: HashMap<String, Chart>,
    generations: HashMap<String, u64>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a build for a container, superseding any build still in
    /// flight for it. Returns the generation the new build must present
    /// at install time.
    pub fn begin_build(&mut self, container: &str) -> u64 {
        let generation = self.generations.entry(container.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Install a finished chart. Returns `false` (leaving the registry
    /// untouched) when a newer build has started for this container since
    /// `generation` was taken.
    pub fn install(&mut self, container: &str, generation: u64, chart: Chart) -> bool {
        if self.generations.get(container).copied() != Some(generation) {
            return false;
        }
        self.charts.insert(container.to_string(), chart);
        true
    }

    /// The chart currently installed for a container, if any.
    #[must_use]
    pub fn get(&self, container: &str) -> Option<&Chart> {
        self.charts.get(container)
    }

    /// The chart for a container, as an error when none exists — the
    /// export path, where "create a chart first" must be reportable.
    pub fn chart_for(&self, container: &str) -> Result<&Chart, CoreError> {
        self.charts
            .get(container)
            .ok_or_else(|| CoreError::ChartNotFound(container.to_string()))
    }

    /// Containers that currently have a chart, sorted for determinism.
    #[must_use]
    pub fn containers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.charts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The latest build generation issued for a container (0 if none).
    #[must_use]
    pub fn current_generation(&self, container: &str) -> u64 {
        self.generations.get(container).copied().unwrap_or(0)
    }
}
