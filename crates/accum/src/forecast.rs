//! Forecast accumulation into plan windows, cycle by cycle.

use std::collections::{BTreeMap, BTreeSet};

use ombros_window::{CycleRequirement, VerificationPlan, WindowRule};

use crate::error::AccumError;
use crate::series::ForecastExtract;

/// Rounds to two decimal places, half away from zero.
///
/// Forecast depths carry one more digit than observations; as on the
/// observation side, the running totals are rounded after every
/// addition.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Per-station accumulated forecast depths, keyed by (cycle index,
/// window index).
///
/// A cell of `None` never received a contribution; it compares as 0
/// but remains distinguishable from an accumulated zero. Cells under
/// the hour-ceiling rule start at `Some(0.0)` instead, matching the
/// calendar-day regime's zero-filled grid.
#[derive(Debug, Clone)]
pub struct FcstAccum {
    sums: BTreeMap<u32, BTreeMap<(usize, i64), Option<f64>>>,
}

impl FcstAccum {
    /// Accumulated depth for one station, cycle, and window. Outer
    /// `None` means the cell is not part of the plan; inner `None`
    /// means no step contributed to it.
    pub fn value(&self, station: u32, cycle: usize, window: i64) -> Option<f64> {
        self.sums
            .get(&station)?
            .get(&(cycle, window))
            .copied()
            .flatten()
    }

    /// Number of stations carried.
    pub fn n_stations(&self) -> usize {
        self.sums.len()
    }
}

/// Checks one extract's header against the cycle that requested it.
///
/// # Errors
///
/// Returns [`AccumError::IssueMismatch`] when the file belongs to a
/// different cycle, [`AccumError::LeadCoverage`] when it does not
/// reach the required lead, and [`AccumError::IntervalTooCoarse`] /
/// [`AccumError::IntervalMisaligned`] when its native interval cannot
/// fill windows of `threshold_hour`.
pub fn validate_extract(
    extract: &ForecastExtract,
    cycle: &CycleRequirement,
    threshold_hour: i64,
) -> Result<(), AccumError> {
    if extract.issue() != cycle.issue {
        return Err(AccumError::IssueMismatch {
            expected: cycle.issue,
            declared: extract.issue(),
        });
    }
    if cycle.required_max_lead > extract.max_hour() {
        return Err(AccumError::LeadCoverage {
            required: cycle.required_max_lead,
            declared: extract.max_hour(),
        });
    }
    if threshold_hour < extract.interval() {
        return Err(AccumError::IntervalTooCoarse {
            interval: extract.interval(),
            threshold_hour,
        });
    }
    if threshold_hour % extract.interval() != 0 {
        return Err(AccumError::IntervalMisaligned {
            interval: extract.interval(),
            threshold_hour,
        });
    }
    Ok(())
}

/// Sums native lead steps into the plan's windows.
///
/// `extracts` must be parallel to `plan.cycles`; every header is
/// validated before any accumulation happens, so a bad file rejects
/// the whole unit rather than a fraction of it. Steps binning to a
/// window the cycle does not declare are discarded. Each addition is
/// rounded to two decimal places before and after entering the
/// running sum.
///
/// # Errors
///
/// Returns [`AccumError::CycleCountMismatch`] on a wiring mismatch,
/// or any error of [`validate_extract`].
pub fn accumulate_forecast(
    extracts: &[ForecastExtract],
    plan: &VerificationPlan,
    stations: &[u32],
) -> Result<FcstAccum, AccumError> {
    if extracts.len() != plan.cycles.len() {
        return Err(AccumError::CycleCountMismatch {
            expected: plan.cycles.len(),
            got: extracts.len(),
        });
    }
    for (cycle, extract) in plan.cycles.iter().zip(extracts) {
        validate_extract(extract, cycle, plan.threshold_hour)?;
    }

    let station_set: BTreeSet<u32> = stations.iter().copied().collect();
    let mut sums: BTreeMap<u32, BTreeMap<(usize, i64), Option<f64>>> = station_set
        .iter()
        .map(|&stn| {
            let cells = plan
                .cycles
                .iter()
                .enumerate()
                .flat_map(|(ci, cycle)| {
                    let init = match cycle.rule {
                        WindowRule::HourCeil { .. } => Some(0.0),
                        WindowRule::OriginIndexed { .. } => None,
                    };
                    cycle.windows.iter().map(move |&w| ((ci, w), init))
                })
                .collect();
            (stn, cells)
        })
        .collect();

    for (ci, (cycle, extract)) in plan.cycles.iter().zip(extracts).enumerate() {
        let interval = extract.interval();
        // Steps run in native resolution up to the required coverage,
        // overshooting into the final window when it is ragged.
        let n_steps = cycle.required_max_lead.div_euclid(interval)
            + i64::from(cycle.required_max_lead % interval != 0);

        for (stn, values) in extract.iter() {
            let Some(cells) = sums.get_mut(&stn) else {
                continue;
            };
            for step_idx in 0..n_steps {
                let step = (step_idx + 1) * interval;
                let window = cycle.rule.window_of_lead(cycle.issue, step);
                if !cycle.windows.contains(&window) {
                    continue;
                }
                let Some(rn) = values.get(step_idx as usize).copied().flatten() else {
                    continue;
                };
                if let Some(cell) = cells.get_mut(&(ci, window)) {
                    *cell = Some(round2(cell.unwrap_or(0.0) + round2(rn)));
                }
            }
        }
    }

    Ok(FcstAccum { sums })
}
