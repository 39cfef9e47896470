//! SQLite persistence of contingency rows.
//!
//! One `ct` table per database, keyed by every non-count column, and
//! written with `INSERT OR REPLACE`: re-running a day after a partial
//! failure overwrites its rows instead of duplicating them.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, params};

use crate::error::DbError;
use crate::rows::{StationRow, SummaryRow};

const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), DbError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| DbError::CreateDir {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<Connection, DbError> {
    ensure_parent_dir(path)?;
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

/// Upserts per-station rows into the day database at `path`.
///
/// # Errors
///
/// Returns [`DbError`] when the directory cannot be created or SQLite
/// rejects the writes.
pub fn save_station_rows(path: &Path, rows: &[StationRow]) -> Result<(), DbError> {
    let mut conn = open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS ct (
            d DATETIME, th_hour INTEGER, s INTEGER, mm TEXT, stn TEXT,
            h INTEGER, f INTEGER, m INTEGER, z INTEGER, t INTEGER,
            PRIMARY KEY (d, th_hour, s, mm, stn))",
        [],
    )?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO ct (d, th_hour, s, mm, stn, h, f, m, z, t)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for row in rows {
            stmt.execute(params![
                row.day.format("%Y-%m-%d").to_string(),
                row.threshold_hour,
                row.window,
                row.threshold.to_string(),
                row.station.to_string(),
                row.cell.hits,
                row.cell.false_alarms,
                row.cell.misses,
                row.cell.correct_negatives,
                row.cell.total,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Upserts cross-station summary rows into the database at `path`.
///
/// # Errors
///
/// Returns [`DbError`] when the directory cannot be created or SQLite
/// rejects the writes.
pub fn save_summary_rows(path: &Path, rows: &[SummaryRow]) -> Result<(), DbError> {
    let mut conn = open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS ct (
            d DATETIME, th_hour INTEGER, s INTEGER, mm TEXT, model TEXT,
            h INTEGER, f INTEGER, m INTEGER, z INTEGER, t INTEGER,
            PRIMARY KEY (d, th_hour, s, mm, model))",
        [],
    )?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO ct (d, th_hour, s, mm, model, h, f, m, z, t)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for row in rows {
            stmt.execute(params![
                row.day.format("%Y-%m-%d").to_string(),
                row.threshold_hour,
                row.window,
                row.threshold.to_string(),
                row.model,
                row.cell.hits,
                row.cell.false_alarms,
                row.cell.misses,
                row.cell.correct_negatives,
                row.cell.total,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}
