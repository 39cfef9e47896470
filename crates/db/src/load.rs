//! Date-range reload of persisted summary rows.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use ombros_contingency::{Cell, ThresholdMm};
use rusqlite::{Connection, params};

use crate::error::DbError;

/// Filter for one score computation over persisted summaries.
#[derive(Debug, Clone)]
pub struct RangeQuery<'a> {
    /// Model code the rows must carry.
    pub model: &'a str,
    /// First day of the range, inclusive.
    pub start: NaiveDate,
    /// Last day of the range, inclusive.
    pub end: NaiveDate,
    /// Window length in hours.
    pub threshold_hour: i64,
    /// Threshold depth.
    pub threshold: ThresholdMm,
    /// Largest window label to include.
    pub max_window: i64,
}

/// Re-sums persisted summary rows per window label.
///
/// `preset` seeds empty cells for labels that must appear even when no
/// row matches (the calendar-day regime's fixed grid). Label 0
/// accumulates the grand total across every matched window. Databases
/// that do not exist yet are treated as empty rather than created.
///
/// # Errors
///
/// Returns [`DbError`] when an existing database cannot be read.
pub fn load_summed_windows(
    paths: &[PathBuf],
    query: &RangeQuery<'_>,
    preset: &[i64],
) -> Result<BTreeMap<i64, Cell>, DbError> {
    let mut cells: BTreeMap<i64, Cell> =
        preset.iter().map(|&s| (s, Cell::default())).collect();
    cells.entry(0).or_default();

    // Day labels sort lexically, so half-open string bounds one day out
    // on each side select the inclusive range.
    let start_bound = (query.start - chrono::Duration::days(1))
        .format("%Y-%m-%d 00:00:00")
        .to_string();
    let end_bound = (query.end + chrono::Duration::days(1))
        .format("%Y-%m-%d 00:00:00")
        .to_string();

    for path in paths {
        if !path.exists() {
            continue;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(30))?;
        let mut stmt = conn.prepare(
            "SELECT s, h, f, m, z, t FROM ct
             WHERE d > ?1 AND d < ?2 AND th_hour = ?3 AND mm = ?4
               AND model = ?5 AND s <= ?6
             ORDER BY s",
        )?;
        let rows = stmt.query_map(
            params![
                start_bound,
                end_bound,
                query.threshold_hour,
                query.threshold.to_string(),
                query.model,
                query.max_window,
            ],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    Cell::from_counts(
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ),
                ))
            },
        )?;
        for row in rows {
            let (window, cell) = row?;
            cells.entry(window).or_default().merge(&cell);
            cells.entry(0).or_default().merge(&cell);
        }
    }
    Ok(cells)
}
