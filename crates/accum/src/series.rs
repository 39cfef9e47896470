//! Raw per-station series containers filled by the file readers.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AccumError;

/// One calendar day of hourly observations for a set of stations.
///
/// Hour slot 0 holds hour 1 (01 UTC) through slot 23 holding hour 24,
/// the midnight that closes the day. `None` marks a missing field.
#[derive(Debug, Clone)]
pub struct HourlyObsDay {
    date: NaiveDate,
    stations: BTreeMap<u32, [Option<f64>; 24]>,
}

impl HourlyObsDay {
    /// Creates an empty day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            stations: BTreeMap::new(),
        }
    }

    /// Returns the calendar day the hours belong to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Sets the 24 hourly values of one station, replacing any earlier
    /// record for it.
    pub fn set_station(&mut self, station: u32, hours: [Option<f64>; 24]) {
        self.stations.insert(station, hours);
    }

    /// Returns one station's hourly values, if the file carried a line
    /// for it.
    pub fn station_hours(&self, station: u32) -> Option<&[Option<f64>; 24]> {
        self.stations.get(&station)
    }

    /// Iterates all stations with their hourly values.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Option<f64>; 24])> {
        self.stations.iter().map(|(&stn, hours)| (stn, hours))
    }

    /// Number of stations the day carries values for.
    pub fn n_stations(&self) -> usize {
        self.stations.len()
    }
}

/// One forecast cycle's extract: per-station precipitation at every
/// native lead step.
#[derive(Debug, Clone)]
pub struct ForecastExtract {
    model: String,
    obs_code: String,
    issue: NaiveDateTime,
    interval: i64,
    max_hour: i64,
    stations: BTreeMap<u32, Vec<Option<f64>>>,
}

impl ForecastExtract {
    /// Creates an empty extract from the declared header fields.
    ///
    /// # Errors
    ///
    /// Returns [`AccumError::InvalidInterval`] for a non-positive
    /// interval and [`AccumError::InvalidMaxHour`] when the declared
    /// coverage cannot hold one native step.
    pub fn new(
        model: impl Into<String>,
        obs_code: impl Into<String>,
        issue: NaiveDateTime,
        interval: i64,
        max_hour: i64,
    ) -> Result<Self, AccumError> {
        if interval <= 0 {
            return Err(AccumError::InvalidInterval { interval });
        }
        if max_hour < interval {
            return Err(AccumError::InvalidMaxHour { max_hour, interval });
        }
        Ok(Self {
            model: model.into(),
            obs_code: obs_code.into(),
            issue,
            interval,
            max_hour,
            stations: BTreeMap::new(),
        })
    }

    /// Model code the header declares.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Observation network code the header declares.
    pub fn obs_code(&self) -> &str {
        &self.obs_code
    }

    /// Cycle issue time.
    pub fn issue(&self) -> NaiveDateTime {
        self.issue
    }

    /// Native lead-step interval in hours.
    pub fn interval(&self) -> i64 {
        self.interval
    }

    /// Declared maximum lead hour.
    pub fn max_hour(&self) -> i64 {
        self.max_hour
    }

    /// Number of native lead steps the file declares.
    pub fn n_steps(&self) -> usize {
        (self.max_hour / self.interval) as usize
    }

    /// Sets one station's per-step values, padded or truncated to the
    /// declared step count.
    pub fn set_station(&mut self, station: u32, mut values: Vec<Option<f64>>) {
        values.resize(self.n_steps(), None);
        self.stations.insert(station, values);
    }

    /// Returns one station's per-step values.
    pub fn station_steps(&self, station: u32) -> Option<&[Option<f64>]> {
        self.stations.get(&station).map(Vec::as_slice)
    }

    /// Iterates all stations with their per-step values.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Option<f64>])> {
        self.stations
            .iter()
            .map(|(&stn, values)| (stn, values.as_slice()))
    }
}
