//! Contingency outcomes and counts.

use serde::Serialize;

use crate::threshold::ThresholdMm;

/// The four cells of a 2x2 contingency outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Forecast and observation both reached the threshold.
    Hit,
    /// Forecast reached the threshold, observation did not.
    FalseAlarm,
    /// Observation reached the threshold, forecast did not.
    Miss,
    /// Neither reached the threshold.
    CorrectNegative,
}

/// Classifies one accumulated forecast/observation pair against a
/// threshold depth. Callers substitute 0 for missing values before
/// calling.
pub fn classify(forecast_mm: f64, observed_mm: f64, threshold: ThresholdMm) -> Outcome {
    let forecast_hit = forecast_mm >= threshold.mm();
    let observed_hit = observed_mm >= threshold.mm();
    match (forecast_hit, observed_hit) {
        (true, true) => Outcome::Hit,
        (true, false) => Outcome::FalseAlarm,
        (false, true) => Outcome::Miss,
        (false, false) => Outcome::CorrectNegative,
    }
}

/// Outcome counts for one (threshold, window, station) combination.
///
/// `total` tracks every recorded outcome, so
/// `hits + false_alarms + misses + correct_negatives == total` holds
/// for any cell built through [`Cell::record`] and [`Cell::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Hits.
    #[serde(rename = "h")]
    pub hits: u32,
    /// False alarms.
    #[serde(rename = "f")]
    pub false_alarms: u32,
    /// Misses.
    #[serde(rename = "m")]
    pub misses: u32,
    /// Correct negatives.
    #[serde(rename = "z")]
    pub correct_negatives: u32,
    /// Total recorded outcomes.
    #[serde(rename = "t")]
    pub total: u32,
}

impl Cell {
    /// Builds a cell from already-counted values, e.g. a persisted row.
    pub fn from_counts(
        hits: u32,
        false_alarms: u32,
        misses: u32,
        correct_negatives: u32,
        total: u32,
    ) -> Self {
        Self {
            hits,
            false_alarms,
            misses,
            correct_negatives,
            total,
        }
    }

    /// Records one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::FalseAlarm => self.false_alarms += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::CorrectNegative => self.correct_negatives += 1,
        }
        self.total += 1;
    }

    /// Adds another cell's counts into this one.
    pub fn merge(&mut self, other: &Cell) {
        self.hits += other.hits;
        self.false_alarms += other.false_alarms;
        self.misses += other.misses;
        self.correct_negatives += other.correct_negatives;
        self.total += other.total;
    }

    /// Whether `total` equals the sum of the four outcome counts.
    pub fn is_balanced(&self) -> bool {
        self.hits + self.false_alarms + self.misses + self.correct_negatives == self.total
    }
}
