use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How a dataset is drawn. Daily price series always render as lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
}

/// Policy for the shared label axis when several series are plotted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisPolicy {
    /// The axis is the first processed target's downsampled labels.
    ///
    /// Later series keep their own sampling and are assumed to align
    /// positionally. Cheap, but if targets differ in data availability
    /// (weekend gaps in fiat data vs. seven-day crypto data) a point of a
    /// later series may sit under a label from a different date.
    #[default]
    FirstSeries,

    /// The axis is the downsampled union of all series' date keys.
    ///
    /// Every series is then sampled at the shared labels, with `None`
    /// filling dates it has no data for. Slightly more work, exact
    /// date alignment.
    UnionDates,
}

/// One named series on a chart, with its display color.
///
/// `values` align 1:1 with the owning chart's `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    /// Display name, e.g. "USD/bitcoin"
    pub name: String,

    pub kind: ChartKind,

    /// Caller-supplied display color (e.g. "#e8590c")
    pub color: String,

    /// One value per axis label; `None` where the series has no data
    pub values: Vec<Option<f64>>,
}

/// A fully computed, renderable chart description.
///
/// The core computes all the numbers — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Display title, e.g. "USD → bitcoin, EUR"
    pub title: String,

    /// Shared ascending date axis
    pub labels: Vec<NaiveDate>,

    /// One dataset per requested target, in caller order
    pub datasets: Vec<ChartDataset>,
}

/// Everything needed to build one multi-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Denominating currency code (e.g. "USD")
    pub base: String,

    /// Compared currencies/assets, in render order
    pub targets: Vec<String>,

    /// One display color per target
    pub colors: Vec<String>,

    /// Inclusive date range
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// Identity of the render target; keys the chart registry
    pub container: String,
}

/// Result of a chart build attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    /// The chart was computed and installed for its container.
    Drawn(Chart),
    /// A newer build for the same container started while this one was in
    /// flight; this result was discarded and the registry left untouched.
    Superseded,
}

/// Progress of an in-flight target-selection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProgress {
    /// More targets are still needed before a chart can be drawn.
    Pending { selected: usize, required: usize },
    /// The required number of targets has been selected.
    Ready,
}

/// Accumulates the base-then-targets selection for one chart.
///
/// Mirrors the drag-and-drop interaction: the user first picks a base, then
/// drops targets one at a time until `required` are collected. Rejected
/// drops (the base itself, or a repeat) do not advance the selected count.
#[derive(Debug, Clone)]
pub struct ChartSession {
    base: String,
    required: usize,
    targets: Vec<String>,
    colors: Vec<String>,
}

impl ChartSession {
    pub fn new(base: impl Into<String>, required: usize) -> Self {
        Self {
            base: base.into(),
            required,
            targets: Vec::new(),
            colors: Vec::new(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.targets
    }

    /// Record one dropped target with its display color.
    ///
    /// The base itself and already-selected targets are rejected with
    /// `ValidationError`; the selection counter is left where it was.
    pub fn add_target(
        &mut self,
        target: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<SessionProgress, CoreError> {
        let target = target.into();
        if target == self.base {
            return Err(CoreError::ValidationError(
                "Cannot use same currency as base".to_string(),
            ));
        }
        if self.targets.contains(&target) {
            return Err(CoreError::ValidationError(format!(
                "Already added {} — select another currency",
                crate::symbols::resolve(&target)
            )));
        }

        self.targets.push(target);
        self.colors.push(color.into());

        if self.targets.len() >= self.required {
            Ok(SessionProgress::Ready)
        } else {
            Ok(SessionProgress::Pending {
                selected: self.targets.len(),
                required: self.required,
            })
        }
    }

    /// Turn a completed selection into a build request.
    pub fn into_request(
        self,
        from: NaiveDate,
        to: NaiveDate,
        container: impl Into<String>,
    ) -> Result<ChartRequest, CoreError> {
        if self.targets.len() < self.required {
            return Err(CoreError::ValidationError(format!(
                "Selected {} of {} currencies",
                self.targets.len(),
                self.required
            )));
        }
        Ok(ChartRequest {
            base: self.base,
            targets: self.targets,
            colors: self.colors,
            from,
            to,
            container: container.into(),
        })
    }
}
