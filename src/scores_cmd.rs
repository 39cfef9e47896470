//! Scores command: re-sum persisted summaries and derive the score set.

use anyhow::{Context, Result, ensure};
use chrono::Duration;
use serde::Serialize;
use tracing::{info, info_span, warn};

use ombros_contingency::{Cell, Scores, ThresholdMm};
use ombros_db::{RangeQuery, load_summed_windows};
use ombros_io::{TemplateVars, render_path};

use crate::cli::ScoresArgs;
use crate::common::{load_config, parse_ymd};

/// One window's re-summed counts and derived scores. Window 0 is the
/// grand total across every included window.
#[derive(Debug, Serialize)]
struct WindowReport {
    s: i64,
    cell: Cell,
    scores: Scores,
}

/// The full JSON report of one scores run.
#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    model: &'a str,
    obs: &'a str,
    start: String,
    end: String,
    threshold_hour: i64,
    mm: String,
    max_fcst_hour: i64,
    short_range: bool,
    windows: Vec<WindowReport>,
}

pub fn run(args: ScoresArgs) -> Result<()> {
    let _cmd = info_span!("scores").entered();
    let config = load_config(&args.config)?;

    let start = parse_ymd(&args.start_date)?;
    let end = parse_ymd(&args.end_date)?;
    ensure!(start <= end, "start date is after end date");
    ensure!(args.th_hour > 0, "threshold hour must be positive");
    ensure!(args.mm > 0.0, "threshold depth must be positive");

    let threshold = ThresholdMm::from_mm(args.mm);
    let template = if args.short_range {
        &config.paths.ct_daysum_db_short
    } else {
        &config.paths.ct_daysum_db
    };

    // One database file per month touched by the range.
    let mut paths = Vec::new();
    let mut day = start;
    while day <= end {
        let path = render_path(
            template,
            &TemplateVars {
                obs: Some(&args.obs),
                day: Some(day),
                ..Default::default()
            },
        );
        if !paths.contains(&path) {
            paths.push(path);
        }
        day += Duration::days(1);
    }

    // The calendar-day regime reports its full window grid even where
    // no rows matched; the short-range rule reports what it finds.
    let preset: Vec<i64> = if args.short_range {
        Vec::new()
    } else {
        (1..=args.max_fcst_hour / args.th_hour)
            .map(|k| k * args.th_hour)
            .collect()
    };

    let query = RangeQuery {
        model: &args.model,
        start,
        end,
        threshold_hour: args.th_hour,
        threshold,
        max_window: args.max_fcst_hour,
    };
    let cells = load_summed_windows(&paths, &query, &preset)?;
    if cells.values().all(|c| c.total == 0) {
        // An empty sample is reported, not refused: every score comes
        // out as the undefined sentinel.
        warn!(
            model = %args.model,
            mm = %threshold,
            th_hour = args.th_hour,
            "no contingency rows matched the range"
        );
    }

    let windows: Vec<WindowReport> = cells
        .iter()
        .map(|(&s, cell)| WindowReport {
            s,
            cell: *cell,
            scores: Scores::from_cell(cell),
        })
        .collect();

    let report = ScoreReport {
        model: &args.model,
        obs: &args.obs,
        start: start.format("%Y-%m-%d").to_string(),
        end: end.format("%Y-%m-%d").to_string(),
        threshold_hour: args.th_hour,
        mm: threshold.to_string(),
        max_fcst_hour: args.max_fcst_hour,
        short_range: args.short_range,
        windows,
    };
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "scores written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
