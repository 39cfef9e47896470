//! Fixed-width observation day files.
//!
//! One line per station: a 9-column station id, a 9-column date, then
//! 24 fields of 9 columns holding hourly depths in mm (blank =
//! missing), closed by a `=` marker. Anything shorter than the full
//! 242 columns is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use ombros_accum::HourlyObsDay;

use crate::error::IoError;
use crate::field::parse_field;

/// Minimum line length of a complete station record.
const MIN_LINE_LEN: usize = 242;

/// Offset of the first hourly field.
const HOURS_START: usize = 18;

/// Width of every fixed-width field on an observation line.
const FIELD_WIDTH: usize = 9;

/// Reads one calendar day of hourly observations.
///
/// Lines that are too short, carry an unparsable station id, or hold
/// junk in an hourly field lose only the affected record or field.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the day's file is absent and
/// [`IoError::Io`] on a read failure.
pub fn read_obs_day(path: &Path, date: NaiveDate) -> Result<HourlyObsDay, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut day = HourlyObsDay::new(date);
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| IoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.len() < MIN_LINE_LEN {
            continue;
        }
        let Some(station) = parse_field::<u32>(&line, 0, FIELD_WIDTH) else {
            continue;
        };
        let mut hours = [None; 24];
        for (idx, slot) in hours.iter_mut().enumerate() {
            *slot = parse_field::<f64>(&line, HOURS_START + idx * FIELD_WIDTH, FIELD_WIDTH);
        }
        day.set_station(station, hours);
    }
    Ok(day)
}
