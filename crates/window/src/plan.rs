//! Verification plans: which cycles, which windows, which comparisons.
//!
//! A plan fixes, before any data is read, the complete set of
//! comparison slots for one (target day, threshold hour, regime)
//! combination. Classification iterates the slots and nothing else, so
//! stray windows present in a data file can never inflate the counts.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::WindowError;
use crate::rule::{WindowRule, ceil_div, day_hour_label};
use crate::table;

/// One admissible forecast/observation comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonSlot {
    /// Index into [`VerificationPlan::cycles`].
    pub cycle: usize,
    /// Window index on the forecast side.
    pub forecast_window: i64,
    /// Window index on the observation side.
    pub obs_window: i64,
    /// Label the outcome is counted under (`s` in the persisted rows).
    pub label: i64,
}

/// One forecast cycle the plan draws on.
#[derive(Debug, Clone)]
pub struct CycleRequirement {
    /// Issue time of the cycle.
    pub issue: NaiveDateTime,
    /// Rule mapping this cycle's lead steps onto window indices.
    pub rule: WindowRule,
    /// Window indices this cycle may contribute to.
    pub windows: BTreeSet<i64>,
    /// Lead coverage the cycle's file must declare, in hours.
    pub required_max_lead: i64,
}

/// The observation side of a plan.
#[derive(Debug, Clone)]
pub struct ObsPlan {
    /// Calendar days whose observation files must be read.
    pub days: Vec<NaiveDate>,
    /// Rule mapping observed hours onto window indices.
    pub rule: WindowRule,
    /// Window indices to accumulate; everything else is discarded.
    pub windows: BTreeSet<i64>,
}

/// Complete wiring for one (target day, threshold hour, regime) unit.
#[derive(Debug, Clone)]
pub struct VerificationPlan {
    /// The day being verified.
    pub target_day: NaiveDate,
    /// Accumulation-window length in hours.
    pub threshold_hour: i64,
    /// Observation requirements.
    pub obs: ObsPlan,
    /// Forecast cycles, in the order their slots reference them.
    pub cycles: Vec<CycleRequirement>,
    /// Every comparison to classify, exactly once each.
    pub slots: Vec<ComparisonSlot>,
    /// Output labels in persistence order.
    pub labels: Vec<i64>,
}

/// Builds the generic calendar-day plan.
///
/// Every cycle issued at one of `issue_hours` on any day from
/// `target_day - max_lead` onward is included if at least one of its
/// lead windows closes within `(target_day, target_day + 24h]`. The
/// slot for lead window `s` compares against the observation window
/// labelled by the hour of day at which `issue + s` falls (midnight
/// counts as hour 24).
///
/// # Errors
///
/// Returns [`WindowError`] when the threshold hour does not divide 24,
/// the max lead cannot cover one window, or the issue hours are empty
/// or outside 0..=23.
pub fn daily_plan(
    target_day: NaiveDate,
    threshold_hour: i64,
    issue_hours: &[i64],
    max_lead: i64,
) -> Result<VerificationPlan, WindowError> {
    let rule = WindowRule::hour_ceil(threshold_hour)?;
    if max_lead < threshold_hour {
        return Err(WindowError::InvalidMaxLead {
            max_lead,
            threshold_hour,
        });
    }
    if issue_hours.is_empty() {
        return Err(WindowError::NoIssueHours);
    }
    for &t in issue_hours {
        if !(0..24).contains(&t) {
            return Err(WindowError::InvalidIssueHour { hour: t });
        }
    }

    let day_start = target_day.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::hours(24);
    let last_window = ceil_div(max_lead, threshold_hour) * threshold_hour;

    let mut cycles = Vec::new();
    let mut slots = Vec::new();

    let scan_end = day_end - Duration::hours(threshold_hour);
    let mut base = day_start - Duration::hours(max_lead);
    while base <= scan_end {
        for &t in issue_hours {
            let issue = base + Duration::hours(t);
            let mut windows = BTreeSet::new();
            let mut cycle_slots = Vec::new();
            let mut s = threshold_hour;
            while s <= last_window {
                let valid = issue + Duration::hours(s);
                if valid > day_start && valid <= day_end {
                    windows.insert(s);
                    cycle_slots.push((s, day_hour_label(valid)));
                }
                s += threshold_hour;
            }
            if !windows.is_empty() {
                let cycle = cycles.len();
                slots.extend(
                    cycle_slots
                        .into_iter()
                        .map(|(s, obs_window)| ComparisonSlot {
                            cycle,
                            forecast_window: s,
                            obs_window,
                            label: s,
                        }),
                );
                cycles.push(CycleRequirement {
                    issue,
                    rule,
                    windows,
                    required_max_lead: max_lead,
                });
            }
        }
        base += Duration::hours(24);
    }

    let obs_windows: BTreeSet<i64> = (1..=24 / threshold_hour)
        .map(|k| k * threshold_hour)
        .collect();
    let labels: Vec<i64> = (1..=last_window / threshold_hour)
        .map(|k| k * threshold_hour)
        .collect();

    Ok(VerificationPlan {
        target_day,
        threshold_hour,
        obs: ObsPlan {
            days: vec![target_day],
            rule,
            windows: obs_windows,
        },
        cycles,
        slots,
        labels,
    })
}

/// Builds the short-range plan from the fixed verification table.
///
/// Windows are zero-based indices past `target_day - 24h`; each
/// forecaster announcement compares its table row's indices against
/// the matching cycle, and outcomes are counted under the publish
/// hour.
///
/// # Errors
///
/// Returns [`WindowError::TableEntryMissing`] when the table has no
/// entry for the combination.
pub fn short_range_plan(
    target_day: NaiveDate,
    max_fcst_hour: i64,
    threshold_hour: i64,
) -> Result<VerificationPlan, WindowError> {
    let blocks = table::cycle_blocks(max_fcst_hour, threshold_hour)?;

    let day_start = target_day.and_time(NaiveTime::MIN);
    let origin = day_start - Duration::hours(24);
    let rule = WindowRule::origin_indexed(origin, threshold_hour)?;

    let mut cycles = Vec::new();
    let mut slots = Vec::new();
    let mut labels = Vec::new();
    let mut obs_windows = BTreeSet::new();

    for (cycle, block) in blocks.iter().enumerate() {
        let mut windows = BTreeSet::new();
        for row in block.rows {
            labels.push(row.publish_hour);
            for &si in row.windows {
                windows.insert(si);
                obs_windows.insert(si);
                slots.push(ComparisonSlot {
                    cycle,
                    forecast_window: si,
                    obs_window: si,
                    label: row.publish_hour,
                });
            }
        }
        // The table is never empty for a defined combination.
        let required_max_lead = windows.iter().next_back().copied().unwrap_or(0) * threshold_hour;
        cycles.push(CycleRequirement {
            issue: day_start + Duration::hours(block.base_offset),
            rule,
            windows,
            required_max_lead,
        });
    }

    let span_hours = obs_windows.iter().next_back().copied().unwrap_or(0) * threshold_hour;
    let span_end = origin + Duration::hours(span_hours);
    let mut days = Vec::new();
    let mut day = origin.date();
    while day <= span_end.date() {
        days.push(day);
        day = day + Duration::days(1);
    }

    Ok(VerificationPlan {
        target_day,
        threshold_hour,
        obs: ObsPlan {
            days,
            rule,
            windows: obs_windows,
        },
        cycles,
        slots,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn daily_plan_rejects_bad_inputs() {
        assert!(daily_plan(day(), 5, &[0], 72).is_err());
        assert!(daily_plan(day(), 6, &[0], 3).is_err());
        assert!(daily_plan(day(), 3, &[], 72).is_err());
        assert!(daily_plan(day(), 3, &[24], 72).is_err());
        assert!(daily_plan(day(), 3, &[-1], 72).is_err());
    }

    #[test]
    fn daily_plan_declares_only_windows_closing_in_target_day() {
        let plan = daily_plan(day(), 6, &[0, 12], 24).unwrap();
        for (i, cycle) in plan.cycles.iter().enumerate() {
            for &s in &cycle.windows {
                let valid = cycle.issue + Duration::hours(s);
                assert!(
                    valid > day().and_time(NaiveTime::MIN)
                        && valid <= day().and_time(NaiveTime::MIN) + Duration::hours(24),
                    "cycle {i} window {s} closes outside the target day"
                );
            }
        }
    }

    #[test]
    fn daily_plan_cycle_layout_24h_lead() {
        let plan = daily_plan(day(), 6, &[0, 12], 24).unwrap();
        let t0 = day().and_time(NaiveTime::MIN);
        let issues: Vec<NaiveDateTime> = plan.cycles.iter().map(|c| c.issue).collect();
        // The previous-day 00 UTC cycle reaches at most t0 itself, which
        // does not count as inside the target day, so it is dropped.
        assert_eq!(
            issues,
            vec![t0 - Duration::hours(12), t0, t0 + Duration::hours(12)]
        );
        assert_eq!(plan.cycles[0].windows, BTreeSet::from([18, 24]));
        assert_eq!(plan.cycles[1].windows, BTreeSet::from([6, 12, 18, 24]));
        assert_eq!(plan.cycles[2].windows, BTreeSet::from([6, 12]));
        assert!(plan.cycles.iter().all(|c| !c.windows.is_empty()));
    }

    #[test]
    fn daily_plan_slots_label_by_lead_window() {
        let plan = daily_plan(day(), 3, &[0, 12], 72).unwrap();
        for slot in &plan.slots {
            assert_eq!(slot.label, slot.forecast_window);
            assert!(slot.obs_window >= 1 && slot.obs_window <= 24);
            assert_eq!(slot.obs_window % 3, 0);
        }
        // Every label of the output grid is reachable.
        let seen: BTreeSet<i64> = plan.slots.iter().map(|s| s.label).collect();
        let grid: BTreeSet<i64> = plan.labels.iter().copied().collect();
        assert_eq!(seen, grid);
    }

    #[test]
    fn daily_plan_slot_obs_window_is_valid_end_hour() {
        let plan = daily_plan(day(), 3, &[0, 12], 72).unwrap();
        for slot in &plan.slots {
            let cycle = &plan.cycles[slot.cycle];
            let valid = cycle.issue + Duration::hours(slot.forecast_window);
            assert_eq!(slot.obs_window, day_hour_label(valid));
        }
    }

    #[test]
    fn daily_plan_each_slot_unique() {
        let plan = daily_plan(day(), 3, &[0, 12], 120).unwrap();
        let mut seen = BTreeSet::new();
        for slot in &plan.slots {
            assert!(
                seen.insert((slot.cycle, slot.forecast_window)),
                "duplicate slot for cycle {} window {}",
                slot.cycle,
                slot.forecast_window
            );
        }
    }

    #[test]
    fn daily_plan_obs_side_is_single_day_grid() {
        let plan = daily_plan(day(), 12, &[0], 72).unwrap();
        assert_eq!(plan.obs.days, vec![day()]);
        assert_eq!(plan.obs.windows, BTreeSet::from([12, 24]));
        assert_eq!(plan.labels, vec![12, 24, 36, 48, 60, 72]);
    }

    #[test]
    fn short_range_plan_publish_labels_in_table_order() {
        let plan = short_range_plan(day(), 72, 3).unwrap();
        assert_eq!(plan.labels, vec![2, 5, 8, 11, 14, 17, 20, 23]);
        assert_eq!(plan.cycles.len(), 3);
    }

    #[test]
    fn short_range_plan_cycles_are_base_offsets() {
        let plan = short_range_plan(day(), 72, 3).unwrap();
        let t0 = day().and_time(NaiveTime::MIN);
        let issues: Vec<NaiveDateTime> = plan.cycles.iter().map(|c| c.issue).collect();
        assert_eq!(
            issues,
            vec![t0 - Duration::hours(24), t0 - Duration::hours(12), t0]
        );
        assert_eq!(plan.cycles[1].windows, (7..=28).collect());
        assert_eq!(plan.cycles[1].required_max_lead, 84);
    }

    #[test]
    fn short_range_plan_slot_count_is_table_cell_count() {
        let plan = short_range_plan(day(), 72, 3).unwrap();
        // 15 + (22+21+20+19) + (18+17+16) cells
        assert_eq!(plan.slots.len(), 148);
        for slot in &plan.slots {
            assert_eq!(slot.forecast_window, slot.obs_window);
        }
    }

    #[test]
    fn short_range_plan_obs_span_covers_last_window() {
        let plan = short_range_plan(day(), 72, 3).unwrap();
        // Windows up to index 28 close 84h past the origin (the day
        // before the target): files for 4 calendar days.
        let first = day() - Duration::days(1);
        let days: Vec<NaiveDate> = (0..4).map(|i| first + Duration::days(i)).collect();
        assert_eq!(plan.obs.days, days);
        assert_eq!(plan.obs.windows, (6..=28).collect());
    }

    #[test]
    fn short_range_plan_undefined_combination() {
        assert!(short_range_plan(day(), 48, 3).is_err());
        assert!(short_range_plan(day(), 72, 1).is_err());
    }
}
