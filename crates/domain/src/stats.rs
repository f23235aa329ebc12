//! Aggregation engine — statistics over a filtered set of readings.
//!
//! All functions operate on an immutable, request-local snapshot of rows and
//! have no side effects. Empty input yields `None` (or an empty vec for the
//! summary); callers decide how to report that.
//!
//! Percentiles use the R-7 linear-interpolation estimator: for sorted values
//! indexed `0..n-1`, the p-quantile sits at position `p * (n - 1)` and is
//! interpolated between the two bracketing indices. Median and quartiles are
//! order-independent: permuting the input does not change the result.

use std::collections::HashMap;

use serde::Serialize;

use crate::reading::Reading;

/// Interpolated median of a reading set, estimated independently over the
/// value axis and the time axis. The timestamp is interpolated too, so it
/// need not coincide with any real reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MedianPoint {
    pub value: f64,
    pub date_created: f64,
}

/// First and third quartile of the reading values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub quartile_1: f64,
    pub quartile_3: f64,
}

/// Per-device rollup produced by the summary operation.
///
/// Field names match the wire shape of the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub device_uuid: String,
    pub number_of_readings: usize,
    pub max_reading_value: i64,
    pub mean_reading_value: f64,
    pub median_reading_value: f64,
    pub quartile_1_value: f64,
    pub quartile_3_value: f64,
}

/// R-7 quantile of `values` at probability `p` (`0.0..=1.0`).
///
/// Returns `None` on empty input.
#[must_use]
pub fn quantile(values: &[i64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    #[allow(clippy::cast_precision_loss)]
    let position = p * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (lo, hi) = (position.floor() as usize, position.ceil() as usize);

    #[allow(clippy::cast_precision_loss)]
    let (low, high) = (sorted[lo] as f64, sorted[hi] as f64);
    #[allow(clippy::cast_precision_loss)]
    let fraction = position - lo as f64;
    Some(low + (high - low) * fraction)
}

/// Arithmetic mean (sum / count, floating-point division).
///
/// Returns `None` on empty input — distinct from a computed zero.
#[must_use]
pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    Some(sum as f64 / values.len() as f64)
}

/// Most frequent value. Ties are broken by first occurrence in input order,
/// which keeps the result deterministic for a given scan order.
#[must_use]
pub fn mode(values: &[i64]) -> Option<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for value in values {
        let count = counts[value];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((*value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// The reading carrying the minimal value; the first such row in scan order
/// when several tie.
#[must_use]
pub fn min_reading(rows: &[Reading]) -> Option<&Reading> {
    rows.iter()
        .fold(None, |best: Option<&Reading>, row| match best {
            Some(current) if current.value <= row.value => Some(current),
            _ => Some(row),
        })
}

/// The reading carrying the maximal value; the first such row in scan order
/// when several tie.
#[must_use]
pub fn max_reading(rows: &[Reading]) -> Option<&Reading> {
    rows.iter()
        .fold(None, |best: Option<&Reading>, row| match best {
            Some(current) if current.value >= row.value => Some(current),
            _ => Some(row),
        })
}

/// R-7 median over both the value axis and the time axis.
#[must_use]
pub fn median_point(rows: &[Reading]) -> Option<MedianPoint> {
    let values: Vec<i64> = rows.iter().map(|r| r.value).collect();
    let dates: Vec<i64> = rows.iter().map(|r| r.date_created).collect();
    Some(MedianPoint {
        value: quantile(&values, 0.5)?,
        date_created: quantile(&dates, 0.5)?,
    })
}

/// First and third R-7 quartile of the reading values.
#[must_use]
pub fn quartiles(values: &[i64]) -> Option<Quartiles> {
    Some(Quartiles {
        quartile_1: quantile(values, 0.25)?,
        quartile_3: quantile(values, 0.75)?,
    })
}

/// Group readings by device and compute the per-device rollup.
///
/// Groups form in first-seen scan order, then sort by reading count
/// descending. The sort is stable, so groups with equal counts keep their
/// scan order.
#[must_use]
pub fn summarize(rows: &[Reading]) -> Vec<DeviceSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<i64>> = HashMap::new();
    for row in rows {
        groups
            .entry(row.device_uuid.clone())
            .or_insert_with(|| {
                order.push(row.device_uuid.clone());
                Vec::new()
            })
            .push(row.value);
    }

    let mut summaries: Vec<DeviceSummary> = order
        .into_iter()
        .map(|device_uuid| {
            let values = &groups[&device_uuid];
            // Non-empty by construction: a group exists only because a row did.
            let max = values.iter().copied().max().unwrap_or_default();
            let quartiles = quartiles(values).unwrap_or(Quartiles {
                quartile_1: 0.0,
                quartile_3: 0.0,
            });
            DeviceSummary {
                device_uuid,
                number_of_readings: values.len(),
                max_reading_value: max,
                mean_reading_value: mean(values).unwrap_or_default(),
                median_reading_value: quantile(values, 0.5).unwrap_or_default(),
                quartile_1_value: quartiles.quartile_1,
                quartile_3_value: quartiles.quartile_3,
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.number_of_readings.cmp(&a.number_of_readings));
    summaries
}
