//! Contingency tables over a verification plan.

use std::collections::BTreeMap;

use ombros_accum::{FcstAccum, ObsAccum};
use ombros_window::VerificationPlan;

use crate::cell::{Cell, classify};
use crate::threshold::ThresholdMm;

/// Per-station contingency counts: threshold -> station -> label.
#[derive(Debug, Clone, Default)]
pub struct ContingencyTable {
    cells: BTreeMap<ThresholdMm, BTreeMap<u32, BTreeMap<i64, Cell>>>,
}

impl ContingencyTable {
    /// The cell for one threshold, station, and output label.
    pub fn cell(&self, threshold: ThresholdMm, station: u32, label: i64) -> Option<&Cell> {
        self.cells.get(&threshold)?.get(&station)?.get(&label)
    }

    /// Iterates `(threshold, station, label, cell)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ThresholdMm, u32, i64, &Cell)> {
        self.cells.iter().flat_map(|(&mm, stations)| {
            stations.iter().flat_map(move |(&stn, labels)| {
                labels.iter().map(move |(&label, cell)| (mm, stn, label, cell))
            })
        })
    }

    /// Sums the counts of every station into one cell per
    /// (threshold, label).
    pub fn sum_stations(&self) -> SummedTable {
        let mut summed = SummedTable::default();
        for (mm, stn_cells) in &self.cells {
            for labels in stn_cells.values() {
                for (&label, cell) in labels {
                    summed.merge_cell(*mm, label, cell);
                }
            }
        }
        summed
    }
}

/// Classifies every comparison slot of the plan, once per threshold
/// and station.
///
/// Missing or null accumulated values compare as 0. The slot list is
/// the single source of what gets counted; windows present in the
/// accumulators but absent from the plan contribute nothing.
pub fn build_table(
    plan: &VerificationPlan,
    obs: &ObsAccum,
    fcst: &FcstAccum,
    thresholds: &[ThresholdMm],
    stations: &[u32],
) -> ContingencyTable {
    let mut table = ContingencyTable::default();
    for &mm in thresholds {
        let by_station = table.cells.entry(mm).or_default();
        for &stn in stations {
            let by_label = by_station.entry(stn).or_default();
            for slot in &plan.slots {
                let forecast = fcst
                    .value(stn, slot.cycle, slot.forecast_window)
                    .unwrap_or(0.0);
                let observed = obs.value(stn, slot.obs_window).unwrap_or(0.0);
                by_label
                    .entry(slot.label)
                    .or_default()
                    .record(classify(forecast, observed, mm));
            }
        }
    }
    table
}

/// Cross-station contingency counts: threshold -> label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummedTable {
    cells: BTreeMap<ThresholdMm, BTreeMap<i64, Cell>>,
}

impl SummedTable {
    /// The summed cell for one threshold and label.
    pub fn cell(&self, threshold: ThresholdMm, label: i64) -> Option<&Cell> {
        self.cells.get(&threshold)?.get(&label)
    }

    /// Adds a cell's counts into the (threshold, label) slot.
    pub fn merge_cell(&mut self, threshold: ThresholdMm, label: i64, cell: &Cell) {
        self.cells
            .entry(threshold)
            .or_default()
            .entry(label)
            .or_default()
            .merge(cell);
    }

    /// Iterates `(threshold, label, cell)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ThresholdMm, i64, &Cell)> {
        self.cells.iter().flat_map(|(&mm, labels)| {
            labels.iter().map(move |(&label, cell)| (mm, label, cell))
        })
    }
}
