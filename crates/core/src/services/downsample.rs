use chrono::NaiveDate;

use crate::models::series::{DownsampledSeries, RateTable};

/// Default upper bound on plotted points per series.
pub const DEFAULT_MAX_POINTS: usize = 20;

/// Reduce a per-date rate table to at most `max_points` plottable points,
/// extracting `key` from each date's inner map.
///
/// Fixed-stride sampling over the ascending date keys: stride is
/// `ceil(total / max_points)`, walked from index 0. The earliest date is
/// therefore always included; the latest date is not guaranteed to be.
/// A missing `key` on a visited date yields `None` at that position;
/// renderers must tolerate the gap.
///
/// An empty table, or `max_points == 0`, produces empty sequences.
#[must_use]
pub fn downsample(table: &RateTable, key: &str, max_points: usize) -> DownsampledSeries {
    let dates: Vec<NaiveDate> = table.keys().copied().collect();
    let labels = sample_dates(&dates, max_points);

    let values = labels
        .iter()
        .map(|date| table.get(date).and_then(|rates| rates.get(key)).copied())
        .collect();

    DownsampledSeries { labels, values }
}

/// Fixed-stride selection over an ascending date slice.
///
/// Shared between per-series downsampling and the union-axis path, so
/// both derive labels with identical stride arithmetic.
#[must_use]
pub fn sample_dates(sorted: &[NaiveDate], max_points: usize) -> Vec<NaiveDate> {
    if sorted.is_empty() || max_points == 0 {
        return Vec::new();
    }

    let stride = sorted.len().div_ceil(max_points);
    sorted.iter().step_by(stride).copied().collect()
}
