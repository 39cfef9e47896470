//! Daily command: calendar-day contingency tables for one target day.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use ombros_accum::{accumulate_forecast, accumulate_obs};
use ombros_contingency::{ThresholdMm, build_table};
use ombros_db::{
    StationRow, SummaryRow, save_station_rows, save_summary_rows, station_rows, summary_rows,
    write_station_rows_csv, write_summary_rows_csv,
};
use ombros_io::{TemplateVars, read_forecast_extract, read_obs_day, render_path};
use ombros_window::daily_plan;

use crate::cli::DailyArgs;
use crate::common::{load_config, load_stations, parse_ymd};
use crate::config::{ModelConfig, OmbrosConfig};

pub fn run(args: DailyArgs) -> Result<()> {
    let _cmd = info_span!("daily").entered();
    let config = load_config(&args.config)?;
    let target_day = parse_ymd(&args.target_date)?;
    let model_cfg = config
        .models
        .get(&args.model)
        .with_context(|| format!("model '{}' is not configured", args.model))?
        .clone();

    let stations = load_stations(&config, &args.model, &args.obs)?;
    let thresholds = config.thresholds();
    info!(
        model = %args.model,
        obs = %args.obs,
        date = %target_day,
        n_stations = stations.len(),
        "daily verification"
    );

    let mut all_station_rows = Vec::new();
    let mut all_summary_rows = Vec::new();

    for &threshold_hour in &model_cfg.threshold_hours {
        let _unit = info_span!("unit", threshold_hour).entered();
        match verify_unit(
            &config,
            &args.model,
            &args.obs,
            &model_cfg,
            target_day,
            threshold_hour,
            &stations,
            &thresholds,
        ) {
            Ok((station, summary)) => {
                info!(threshold_hour, rows = station.len(), "unit verified");
                all_station_rows.extend(station);
                all_summary_rows.extend(summary);
            }
            // One unit failing to load leaves the sibling threshold
            // hours untouched.
            Err(e) => warn!(threshold_hour, error = %e, "skipping threshold hour"),
        }
    }

    let day_vars = TemplateVars {
        model: Some(&args.model),
        obs: Some(&args.obs),
        day: Some(target_day),
        ..Default::default()
    };
    save_station_rows(
        &render_path(&config.paths.ct_day_db, &day_vars),
        &all_station_rows,
    )?;
    save_summary_rows(
        &render_path(&config.paths.ct_daysum_db, &day_vars),
        &all_summary_rows,
    )?;
    write_station_rows_csv(
        &render_path(&config.paths.ct_day_csv, &day_vars),
        &all_station_rows,
    )?;
    write_summary_rows_csv(
        &render_path(&config.paths.ct_daysum_csv, &day_vars),
        &all_summary_rows,
    )?;
    info!(rows = all_station_rows.len(), "daily contingency saved");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn verify_unit(
    config: &OmbrosConfig,
    model: &str,
    obs_code: &str,
    model_cfg: &ModelConfig,
    target_day: NaiveDate,
    threshold_hour: i64,
    stations: &[u32],
    thresholds: &[ThresholdMm],
) -> Result<(Vec<StationRow>, Vec<SummaryRow>)> {
    let plan = daily_plan(
        target_day,
        threshold_hour,
        &model_cfg.issue_hours,
        model_cfg.max_lead(),
    )?;

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
