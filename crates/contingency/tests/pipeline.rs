//! Integration test: accumulate, classify, and aggregate one day.

use chrono::{NaiveDate, NaiveTime};
use ombros_accum::{ForecastExtract, HourlyObsDay, accumulate_forecast, accumulate_obs};
use ombros_contingency::{Cell, Scores, SCORE_UNDEFINED, SummedTable, ThresholdMm, build_table};
use ombros_window::{daily_plan, short_range_plan};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn mm(v: f64) -> ThresholdMm {
    ThresholdMm::from_mm(v)
}

#[test]
fn daily_regime_counts_one_station_day() {
    let plan = daily_plan(day(), 6, &[0], 24).unwrap();
    // One cycle survives: the target day's own 00 UTC run.
    assert_eq!(plan.cycles.len(), 1);
    assert_eq!(plan.cycles[0].issue, day().and_time(NaiveTime::MIN));

    let mut obs_day = HourlyObsDay::new(day());
    let mut hours = [None; 24];
    hours[2] = Some(2.0); // hour 3 -> window 6
    obs_day.set_station(90, hours);
    let obs = accumulate_obs(&[obs_day], &[90, 91], &plan.obs);

    let mut extract =
        ForecastExtract::new("gdps_ne36", "asos", plan.cycles[0].issue, 3, 24).unwrap();
    // Steps 3h and 6h feed window 6: 0.5 + 0.7.
    extract.set_station(
        90,
        vec![Some(0.5), Some(0.7), None, None, None, None, None, None],
    );
    let fcst = accumulate_forecast(&[extract], &plan, &[90, 91]).unwrap();

    let thresholds = [mm(1.0)];
    let table = build_table(&plan, &obs, &fcst, &thresholds, &[90, 91]);

    // Station 90, window 6: forecast 1.2 and observed 2.0 both reach
    // 1.0 mm.
    assert_eq!(
        table.cell(mm(1.0), 90, 6),
        Some(&Cell::from_counts(1, 0, 0, 0, 1))
    );
    // Its other windows and all of station 91 are correct negatives.
    assert_eq!(
        table.cell(mm(1.0), 90, 12),
        Some(&Cell::from_counts(0, 0, 0, 1, 1))
    );
    assert_eq!(
        table.cell(mm(1.0), 91, 6),
        Some(&Cell::from_counts(0, 0, 0, 1, 1))
    );

    for (_, _, _, cell) in table.iter() {
        assert!(cell.is_balanced());
    }

    let summed = table.sum_stations();
    assert_eq!(summed.cell(mm(1.0), 6), Some(&Cell::from_counts(1, 0, 0, 1, 2)));
    assert_eq!(
        summed.cell(mm(1.0), 24),
        Some(&Cell::from_counts(0, 0, 0, 2, 2))
    );
}

#[test]
fn summation_is_order_independent() {
    let plan = daily_plan(day(), 3, &[0, 12], 72).unwrap();

    let mut obs_day = HourlyObsDay::new(day());
    let mut hours = [None; 24];
    hours[8] = Some(5.5);
    hours[20] = Some(0.3);
    obs_day.set_station(90, hours);
    let mut hours = [None; 24];
    hours[8] = Some(12.0);
    obs_day.set_station(91, hours);

    let stations = [90u32, 91];
    let obs = accumulate_obs(&[obs_day.clone()], &stations, &plan.obs);

    let extracts: Vec<ForecastExtract> = plan
        .cycles
        .iter()
        .map(|c| {
            let mut ex = ForecastExtract::new("gdps_ne36", "asos", c.issue, 3, 87).unwrap();
            ex.set_station(90, vec![Some(0.4); 29]);
            ex.set_station(91, vec![Some(2.1); 29]);
            ex
        })
        .collect();
    let fcst = accumulate_forecast(&extracts, &plan, &stations).unwrap();

    let thresholds = [mm(0.1), mm(5.0)];
    let whole = build_table(&plan, &obs, &fcst, &thresholds, &stations).sum_stations();

    // Classifying each station alone and merging afterwards gives the
    // same sums, in either merge order.
    let per_station: Vec<SummedTable> = stations
        .iter()
        .map(|&stn| build_table(&plan, &obs, &fcst, &thresholds, &[stn]).sum_stations())
        .collect();

    let mut forward = SummedTable::default();
    for part in &per_station {
        for (th, label, cell) in part.iter() {
            forward.merge_cell(th, label, cell);
        }
    }
    let mut backward = SummedTable::default();
    for part in per_station.iter().rev() {
        for (th, label, cell) in part.iter() {
            backward.merge_cell(th, label, cell);
        }
    }

    assert_eq!(forward, whole);
    assert_eq!(backward, whole);
}

#[test]
fn short_range_slots_drive_the_totals() {
    let plan = short_range_plan(day(), 72, 3).unwrap();

    // No observation files and all-null forecasts: every slot is a
    // correct negative, so each publish hour's total equals its table
    // row's cell count.
    let obs = accumulate_obs(&[], &[90], &plan.obs);
    let extracts: Vec<ForecastExtract> = plan
        .cycles
        .iter()
        .map(|c| ForecastExtract::new("gdps_ne36", "asos", c.issue, 3, 87).unwrap())
        .collect();
    let fcst = accumulate_forecast(&extracts, &plan, &[90]).unwrap();

    let thresholds = [mm(0.1)];
    let table = build_table(&plan, &obs, &fcst, &thresholds, &[90]);

    let expected = [
        (2, 15),
        (5, 22),
        (8, 21),
        (11, 20),
        (14, 19),
        (17, 18),
        (20, 17),
        (23, 16),
    ];
    for (publish, count) in expected {
        let cell = table.cell(mm(0.1), 90, publish).unwrap();
        assert_eq!(cell.total, count, "publish hour {publish}");
        assert_eq!(cell.correct_negatives, count);
    }
}

#[test]
fn all_correct_negative_day_scores() {
    let cell = Cell::from_counts(0, 0, 0, 148, 148);
    let scores = Scores::from_cell(&cell);
    assert_eq!(scores.accuracy, 1.0);
    assert_eq!(scores.bias, SCORE_UNDEFINED);
    assert_eq!(scores.csi, SCORE_UNDEFINED);
    assert_eq!(scores.pod, SCORE_UNDEFINED);
    assert_eq!(scores.far, SCORE_UNDEFINED);
}
