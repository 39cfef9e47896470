//! Station list snapshots.
//!
//! CSV with header `stnId,lat,lon,x,y`. A station is usable only when
//! its grid coordinates are integral; rows failing that, or with an
//! unparsable id, are skipped.

use std::path::Path;

use crate::error::IoError;

/// Reads the station ids from a station-grid mapping file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the file is absent and
/// [`IoError::Csv`] on a CSV-level read failure.
pub fn read_station_ids(path: &Path) -> Result<Vec<u32>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let (Some(id), Some(x), Some(y)) = (record.get(0), record.get(3), record.get(4)) else {
            continue;
        };
        let Ok(id) = id.trim().parse::<u32>() else {
            continue;
        };
        if x.trim().parse::<i64>().is_err() || y.trim().parse::<i64>().is_err() {
            continue;
        }
        ids.push(id);
    }
    Ok(ids)
}
