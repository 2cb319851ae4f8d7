use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-date rate mapping, common to both sources after fetching.
///
/// The crypto fetcher reshapes candle records into `{date: {SYMBOL: close}}`;
/// the fiat source already returns `{date: {CODE: rate}}`. Keys are unique
/// per date and the `BTreeMap` iterates in chronological order, so the
/// series is sortable by date at any point without extra work. Dates for
/// which a source returned no data are simply absent — no interpolation.
pub type RateTable = BTreeMap<NaiveDate, HashMap<String, f64>>;

/// A series reduced to at most the configured number of plottable points.
///
/// `labels` and `values` are parallel sequences of equal length, labels
/// ascending. A value is `None` when the extraction key was missing for
/// that date; chart renderers must tolerate the gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownsampledSeries {
    pub labels: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl DownsampledSeries {
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of plotted points (labels and values always agree).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
