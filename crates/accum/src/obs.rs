//! Observation accumulation into plan windows.

use std::collections::BTreeMap;

use ombros_window::ObsPlan;

use crate::series::HourlyObsDay;

/// Rounds to one decimal place, half away from zero.
///
/// Applied after every addition: the running totals are kept at
/// observation precision throughout, so re-runs reproduce the same
/// sums digit for digit.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Per-station accumulated observation depths, keyed by window index.
///
/// Every window the plan declares is present, initialised to 0.0, for
/// every requested station.
#[derive(Debug, Clone)]
pub struct ObsAccum {
    sums: BTreeMap<u32, BTreeMap<i64, f64>>,
}

impl ObsAccum {
    /// Accumulated depth for one station and window.
    pub fn value(&self, station: u32, window: i64) -> Option<f64> {
        self.sums.get(&station)?.get(&window).copied()
    }

    /// Per-window sums of one station.
    pub fn station_windows(&self, station: u32) -> Option<&BTreeMap<i64, f64>> {
        self.sums.get(&station)
    }

    /// Number of stations carried.
    pub fn n_stations(&self) -> usize {
        self.sums.len()
    }
}

/// Sums hourly observations into the plan's windows.
///
/// Hours binning to a window outside the plan are discarded; missing
/// hourly fields contribute nothing. Each addition is rounded to one
/// decimal place before and after entering the running sum.
pub fn accumulate_obs(days: &[HourlyObsDay], stations: &[u32], plan: &ObsPlan) -> ObsAccum {
    let mut sums: BTreeMap<u32, BTreeMap<i64, f64>> = stations
        .iter()
        .map(|&stn| {
            let windows = plan.windows.iter().map(|&w| (w, 0.0)).collect();
            (stn, windows)
        })
        .collect();

    for day in days {
        for (stn, hours) in day.iter() {
            let Some(windows) = sums.get_mut(&stn) else {
                continue;
            };
            for (idx, value) in hours.iter().enumerate() {
                let Some(rn) = *value else { continue };
                let hour = idx as u32 + 1;
                let window = plan.rule.window_of_obs_hour(day.date(), hour);
                if let Some(sum) = windows.get_mut(&window) {
                    *sum = round1(*sum + round1(rn));
                }
            }
        }
    }

    ObsAccum { sums }
}
