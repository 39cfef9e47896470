//! Persistence-facing row projections of the contingency tables.

use chrono::NaiveDate;
use ombros_contingency::{Cell, ContingencyTable, SummedTable, ThresholdMm};

/// One per-station contingency row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRow {
    /// The verified day.
    pub day: NaiveDate,
    /// Window length in hours.
    pub threshold_hour: i64,
    /// Window label (`s` column).
    pub window: i64,
    /// Threshold depth.
    pub threshold: ThresholdMm,
    /// Station id.
    pub station: u32,
    /// The counts.
    pub cell: Cell,
}

/// One cross-station summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// The verified day.
    pub day: NaiveDate,
    /// Window length in hours.
    pub threshold_hour: i64,
    /// Window label (`s` column).
    pub window: i64,
    /// Threshold depth.
    pub threshold: ThresholdMm,
    /// Model code.
    pub model: String,
    /// The summed counts.
    pub cell: Cell,
}

/// Flattens a per-station table onto the full output grid.
///
/// Every (threshold, label, station) combination yields a row; labels
/// the classification never reached carry an empty cell.
pub fn station_rows(
    day: NaiveDate,
    threshold_hour: i64,
    thresholds: &[ThresholdMm],
    labels: &[i64],
    stations: &[u32],
    table: &ContingencyTable,
) -> Vec<StationRow> {
    let mut rows = Vec::with_capacity(thresholds.len() * labels.len() * stations.len());
    for &threshold in thresholds {
        for &window in labels {
            for &station in stations {
                let cell = table
                    .cell(threshold, station, window)
                    .copied()
                    .unwrap_or_default();
                rows.push(StationRow {
                    day,
                    threshold_hour,
                    window,
                    threshold,
                    station,
                    cell,
                });
            }
        }
    }
    rows
}

/// Flattens a summed table onto the full output grid.
pub fn summary_rows(
    day: NaiveDate,
    threshold_hour: i64,
    model: &str,
    thresholds: &[ThresholdMm],
    labels: &[i64],
    summed: &SummedTable,
) -> Vec<SummaryRow> {
    let mut rows = Vec::with_capacity(thresholds.len() * labels.len());
    for &threshold in thresholds {
        for &window in labels {
            let cell = summed.cell(threshold, window).copied().unwrap_or_default();
            rows.push(SummaryRow {
                day,
                threshold_hour,
                window,
                threshold,
                model: model.to_string(),
                cell,
            });
        }
    }
    rows
}
