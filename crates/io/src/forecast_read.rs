//! Forecast extract files.
//!
//! Line 1 declares the cycle:
//! `# INFO, model:<code>, obs:<code>, ymdh:<YYYYMMDDHH>,
//! fcstInterval:<hours>, fcstMaxHour:<hours>`. Data lines carry a
//! 6-column station id, two spaces, then one 7-column depth field per
//! native lead step.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use ombros_accum::ForecastExtract;

use crate::error::IoError;
use crate::field::parse_field;

/// Width of the station id column on a data line.
const STATION_WIDTH: usize = 6;

/// Offset of the first lead-step field.
const STEPS_START: usize = 8;

/// Width of one lead-step field.
const STEP_WIDTH: usize = 7;

/// Reads one forecast cycle's extract.
///
/// The INFO header is mandatory and fully validated before any data
/// line is looked at; data lines with an unparsable station id or
/// junk step fields lose only the affected record or field.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the extract is absent,
/// [`IoError::MissingHeader`] when the file is empty or does not open
/// with an INFO line, and [`IoError::MalformedHeader`] when a header
/// field is missing, unparsable, or declares an impossible layout.
pub fn read_forecast_extract(path: &Path) -> Result<ForecastExtract, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines();

    let Some(first) = lines.next() else {
        return Err(IoError::MissingHeader {
            path: path.to_path_buf(),
        });
    };
    let first = first.map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut extract = parse_info_header(&first, path)?;

    for line in lines {
        let line = line.map_err(|source| IoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.len() < STATION_WIDTH || line.starts_with('#') {
            continue;
        }
        let Some(station) = parse_field::<u32>(&line, 0, STATION_WIDTH) else {
            continue;
        };
        let values = (0..extract.n_steps())
            .map(|i| parse_field::<f64>(&line, STEPS_START + i * STEP_WIDTH, STEP_WIDTH))
            .collect();
        extract.set_station(station, values);
    }
    Ok(extract)
}

fn parse_info_header(line: &str, path: &Path) -> Result<ForecastExtract, IoError> {
    let malformed = |reason: &str| IoError::MalformedHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if !line.starts_with("# INFO") {
        return Err(IoError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut model = None;
    let mut obs_code = None;
    let mut issue = None;
    let mut interval = None;
    let mut max_hour = None;

    for kv in line.split(',') {
        let mut parts = kv.trim().splitn(2, ':');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        match key {
            "model" => model = Some(value.to_string()),
            "obs" => obs_code = Some(value.to_string()),
            "ymdh" => {
                issue =
                    Some(parse_ymdh(value).ok_or_else(|| malformed("unparsable ymdh value"))?);
            }
            "fcstInterval" => {
                interval = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| malformed("unparsable fcstInterval value"))?,
                );
            }
            "fcstMaxHour" => {
                max_hour = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| malformed("unparsable fcstMaxHour value"))?,
                );
            }
            _ => {}
        }
    }

    let model = model.ok_or_else(|| malformed("missing model"))?;
    let obs_code = obs_code.ok_or_else(|| malformed("missing obs"))?;
    let issue = issue.ok_or_else(|| malformed("missing ymdh"))?;
    let interval = interval.ok_or_else(|| malformed("missing fcstInterval"))?;
    let max_hour = max_hour.ok_or_else(|| malformed("missing fcstMaxHour"))?;

    ForecastExtract::new(model, obs_code, issue, interval, max_hour)
        .map_err(|e| malformed(&e.to_string()))
}

fn parse_ymdh(s: &str) -> Option<NaiveDateTime> {
    if s.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(s.get(..8)?, "%Y%m%d").ok()?;
    let hour: u32 = s.get(8..)?.parse().ok()?;
    date.and_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ymdh_parses_cycle_hours() {
        let ts = parse_ymdh("2024011512").unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
        assert!(parse_ymdh("20240115").is_none());
        assert!(parse_ymdh("2024011525").is_none());
        assert!(parse_ymdh("20240x1512").is_none());
    }
}
