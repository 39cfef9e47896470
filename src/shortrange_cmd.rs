//! Short-range command: table-driven contingency tables for one day.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use ombros_accum::{accumulate_forecast, accumulate_obs};
use ombros_contingency::{ThresholdMm, build_table};
use ombros_db::{
    StationRow, SummaryRow, save_station_rows, save_summary_rows, station_rows, summary_rows,
};
use ombros_io::{TemplateVars, read_forecast_extract, read_obs_day, render_path};
use ombros_window::{MAX_FCST_HOURS, TABLE_THRESHOLD_HOURS, short_range_plan};

use crate::cli::ShortRangeArgs;
use crate::common::{load_config, load_stations, parse_ymd};
use crate::config::OmbrosConfig;

pub fn run(args: ShortRangeArgs) -> Result<()> {
    let _cmd = info_span!("short_range").entered();
    let config = load_config(&args.config)?;
    let target_day = parse_ymd(&args.target_date)?;

    let stations = load_stations(&config, &args.model, &args.obs)?;
    let thresholds = config.thresholds();
    info!(
        model = %args.model,
        obs = %args.obs,
        date = %target_day,
        n_stations = stations.len(),
        "short-range verification"
    );

    let day_vars = TemplateVars {
        model: Some(&args.model),
        obs: Some(&args.obs),
        day: Some(target_day),
        ..Default::default()
    };

    for &max_fcst_hour in &MAX_FCST_HOURS {
        for &threshold_hour in &TABLE_THRESHOLD_HOURS {
            let _unit = info_span!("unit", max_fcst_hour, threshold_hour).entered();
            let (station, summary) = match verify_unit(
                &config,
                &args.model,
                &args.obs,
                target_day,
                max_fcst_hour,
                threshold_hour,
                &stations,
                &thresholds,
            ) {
                Ok(rows) => rows,
                // One unit failing to load leaves the others untouched.
                Err(e) => {
                    warn!(max_fcst_hour, threshold_hour, error = %e, "skipping unit");
                    continue;
                }
            };

            save_station_rows(
                &render_path(&config.paths.ct_day_db_short, &day_vars),
                &station,
            )?;
            save_summary_rows(
                &render_path(&config.paths.ct_daysum_db_short, &day_vars),
                &summary,
            )?;
            info!(max_fcst_hour, threshold_hour, rows = station.len(), "unit saved");
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn verify_unit(
    config: &OmbrosConfig,
    model: &str,
    obs_code: &str,
    target_day: NaiveDate,
    max_fcst_hour: i64,
    threshold_hour: i64,
    stations: &[u32],
    thresholds: &[ThresholdMm],
) -> Result<(Vec<StationRow>, Vec<SummaryRow>)> {
    let plan = short_range_plan(target_day, max_fcst_hour, threshold_hour)?;

    let mut extracts = Vec::with_capacity(plan.cycles.len());
    for cycle in &plan.cycles {
        let path = render_path(
            &config.paths.model_extract_file,
            &TemplateVars {
                model: Some(model),
                obs: Some(obs_code),
                issue: Some(cycle.issue),
                ..Default::default()
            },
        );
        extracts.push(read_forecast_extract(&path)?);
    }
    let fcst = accumulate_forecast(&extracts, &plan, stations)?;

    let mut obs_days = Vec::with_capacity(plan.obs.days.len());
    for &day in &plan.obs.days {
        let path = render_path(
            &config.paths.obs_day_file,
            &TemplateVars {
                obs: Some(obs_code),
                day: Some(day),
                ..Default::default()
            },
        );
        obs_days.push(read_obs_day(&path, day)?);
    }
    let obs = accumulate_obs(&obs_days, stations, &plan.obs);

    let table = build_table(&plan, &obs, &fcst, thresholds, stations);
    let summed = table.sum_stations();

    Ok((
        station_rows(
            target_day,
            threshold_hour,
            thresholds,
            &plan.labels,
            stations,
            &table,
        ),
        summary_rows(
            target_day,
            threshold_hour,
            model,
            thresholds,
            &plan.labels,
            &summed,
        ),
    ))
}
