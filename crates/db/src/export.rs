//! CSV export of contingency rows.

use std::path::Path;

use csv::Writer;

use crate::error::DbError;
use crate::rows::{StationRow, SummaryRow};
use crate::store::ensure_parent_dir;

fn csv_err(path: &Path, e: impl ToString) -> DbError {
    DbError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Writes per-station rows as a day CSV.
///
/// # Errors
///
/// Returns [`DbError`] when the directory cannot be created or the
/// file cannot be written.
pub fn write_station_rows_csv(path: &Path, rows: &[StationRow]) -> Result<(), DbError> {
    ensure_parent_dir(path)?;
    let mut writer = Writer::from_path(path).map_err(|e| csv_err(path, e))?;
    writer
        .write_record(["d", "s", "th_hour", "mm", "stn", "h", "f", "m", "z", "t"])
        .map_err(|e| csv_err(path, e))?;
    for row in rows {
        writer
            .write_record([
                row.day.format("%Y-%m-%d").to_string(),
                row.window.to_string(),
                row.threshold_hour.to_string(),
                row.threshold.to_string(),
                row.station.to_string(),
                row.cell.hits.to_string(),
                row.cell.false_alarms.to_string(),
                row.cell.misses.to_string(),
                row.cell.correct_negatives.to_string(),
                row.cell.total.to_string(),
            ])
            .map_err(|e| csv_err(path, e))?;
    }
    writer.flush().map_err(|e| csv_err(path, e))?;
    Ok(())
}

/// Writes cross-station summary rows as a day CSV.
///
/// # Errors
///
/// Returns [`DbError`] when the directory cannot be created or the
/// file cannot be written.
pub fn write_summary_rows_csv(path: &Path, rows: &[SummaryRow]) -> Result<(), DbError> {
    ensure_parent_dir(path)?;
    let mut writer = Writer::from_path(path).map_err(|e| csv_err(path, e))?;
    writer
        .write_record(["d", "th_hour", "s", "mm", "model", "h", "f", "m", "z", "t"])
        .map_err(|e| csv_err(path, e))?;
    for row in rows {
        writer
            .write_record([
                row.day.format("%Y-%m-%d").to_string(),
                row.threshold_hour.to_string(),
                row.window.to_string(),
                row.threshold.to_string(),
                row.model.clone(),
                row.cell.hits.to_string(),
                row.cell.false_alarms.to_string(),
                row.cell.misses.to_string(),
                row.cell.correct_negatives.to_string(),
                row.cell.total.to_string(),
            ])
            .map_err(|e| csv_err(path, e))?;
    }
    writer.flush().map_err(|e| csv_err(path, e))?;
    Ok(())
}
