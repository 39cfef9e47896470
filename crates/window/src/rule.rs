//! Window binning rules for the two alignment regimes.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::WindowError;

/// Integer ceiling division. `den` must be positive.
pub(crate) fn ceil_div(num: i64, den: i64) -> i64 {
    num.div_euclid(den) + i64::from(num.rem_euclid(den) != 0)
}

/// How timestamps and lead hours map onto accumulation-window indices.
///
/// [`WindowRule::HourCeil`] labels a window by the hour that closes it,
/// `ceil(h / T) * T`, so one calendar day splits into `{T, 2T, .., 24}`.
/// [`WindowRule::OriginIndexed`] labels windows by zero-based position
/// past a fixed origin, `ceil(gap / T) - 1`, which is how the
/// short-range verification table addresses its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRule {
    /// Ceiling binning of hours within one calendar day.
    HourCeil {
        /// Window length in hours; divides 24.
        threshold_hour: i64,
    },
    /// Zero-based window indices counted from a fixed origin.
    OriginIndexed {
        /// Closing edge of the window before index 0: window index 0
        /// spans `(origin, origin + T]`.
        origin: NaiveDateTime,
        /// Window length in hours.
        threshold_hour: i64,
    },
}

impl WindowRule {
    /// Creates the ceiling rule for one calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidThresholdHour`] unless
    /// `threshold_hour` is positive and divides 24.
    pub fn hour_ceil(threshold_hour: i64) -> Result<Self, WindowError> {
        if threshold_hour <= 0 || 24 % threshold_hour != 0 {
            return Err(WindowError::InvalidThresholdHour {
                hour: threshold_hour,
            });
        }
        Ok(Self::HourCeil { threshold_hour })
    }

    /// Creates the origin-indexed rule.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidWindowLength`] unless
    /// `threshold_hour` is positive.
    pub fn origin_indexed(
        origin: NaiveDateTime,
        threshold_hour: i64,
    ) -> Result<Self, WindowError> {
        if threshold_hour <= 0 {
            return Err(WindowError::InvalidWindowLength {
                hour: threshold_hour,
            });
        }
        Ok(Self::OriginIndexed {
            origin,
            threshold_hour,
        })
    }

    /// Returns the window length in hours.
    pub fn threshold_hour(&self) -> i64 {
        match *self {
            Self::HourCeil { threshold_hour } | Self::OriginIndexed { threshold_hour, .. } => {
                threshold_hour
            }
        }
    }

    /// Window index of observed hour `hour` read from the file for
    /// `file_day`.
    ///
    /// `hour` is 1..=24; hour 24 is the midnight that closes `file_day`.
    pub fn window_of_obs_hour(&self, file_day: NaiveDate, hour: u32) -> i64 {
        match *self {
            Self::HourCeil { threshold_hour } => {
                ceil_div(i64::from(hour), threshold_hour) * threshold_hour
            }
            Self::OriginIndexed {
                origin,
                threshold_hour,
            } => {
                let valid = file_day.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour));
                ceil_div((valid - origin).num_hours(), threshold_hour) - 1
            }
        }
    }

    /// Window index of lead `step` hours past the cycle issued at
    /// `issue`.
    pub fn window_of_lead(&self, issue: NaiveDateTime, step: i64) -> i64 {
        match *self {
            Self::HourCeil { threshold_hour } => ceil_div(step, threshold_hour) * threshold_hour,
            Self::OriginIndexed {
                origin,
                threshold_hour,
            } => {
                let valid = issue + Duration::hours(step);
                ceil_div((valid - origin).num_hours(), threshold_hour) - 1
            }
        }
    }
}

/// Observation window label of a valid time under the hour-ceiling
/// regime: the hour of day, with midnight mapped to 24.
pub fn day_hour_label(valid: NaiveDateTime) -> i64 {
    let hour = i64::from(valid.hour());
    if hour == 0 { 24 } else { hour }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn ceil_div_rounds_up() {
        assert_eq!(ceil_div(7, 3), 3);
        assert_eq!(ceil_div(6, 3), 2);
        assert_eq!(ceil_div(1, 3), 1);
        assert_eq!(ceil_div(0, 3), 0);
        assert_eq!(ceil_div(-5, 3), -1);
        assert_eq!(ceil_div(-6, 3), -2);
    }

    #[test]
    fn hour_ceil_rejects_bad_lengths() {
        assert!(WindowRule::hour_ceil(0).is_err());
        assert!(WindowRule::hour_ceil(-3).is_err());
        assert!(WindowRule::hour_ceil(5).is_err());
        assert!(WindowRule::hour_ceil(7).is_err());
        for t in [1, 2, 3, 4, 6, 8, 12, 24] {
            assert!(WindowRule::hour_ceil(t).is_ok(), "T={t} should be valid");
        }
    }

    #[test]
    fn hour_ceil_covers_day_and_is_monotone() {
        for t in [1i64, 3, 6, 12] {
            let rule = WindowRule::hour_ceil(t).unwrap();
            let mut prev = 0;
            for h in 1..=24u32 {
                let s = rule.window_of_obs_hour(day(), h);
                assert!(s >= t && s <= 24, "T={t} h={h} gave s={s}");
                assert_eq!(s % t, 0, "T={t} h={h} gave s={s}");
                assert!(s >= prev, "window index must not decrease");
                prev = s;
            }
            assert_eq!(rule.window_of_obs_hour(day(), 24), 24);
            assert_eq!(rule.window_of_obs_hour(day(), 1), t);
        }
    }

    #[test]
    fn hour_ceil_examples() {
        let rule = WindowRule::hour_ceil(3).unwrap();
        assert_eq!(rule.window_of_obs_hour(day(), 3), 3);
        assert_eq!(rule.window_of_obs_hour(day(), 4), 6);
        assert_eq!(rule.window_of_lead(day().and_time(NaiveTime::MIN), 7), 9);
        assert_eq!(rule.window_of_lead(day().and_time(NaiveTime::MIN), 9), 9);
    }

    #[test]
    fn origin_indexed_counts_from_origin() {
        let origin = day().and_time(NaiveTime::MIN);
        let rule = WindowRule::origin_indexed(origin, 3).unwrap();
        // hour 1 of the origin day: gap 1h -> index 0
        assert_eq!(rule.window_of_obs_hour(day(), 1), 0);
        assert_eq!(rule.window_of_obs_hour(day(), 3), 0);
        assert_eq!(rule.window_of_obs_hour(day(), 4), 1);
        assert_eq!(rule.window_of_obs_hour(day(), 24), 7);
        // next day continues the count
        let next = day().succ_opt().unwrap();
        assert_eq!(rule.window_of_obs_hour(next, 1), 8);
    }

    #[test]
    fn origin_indexed_lead_matches_obs_side() {
        let origin = day().and_time(NaiveTime::MIN);
        let rule = WindowRule::origin_indexed(origin, 3).unwrap();
        let issue = origin + Duration::hours(12);
        // issue + 9h lands 21h past the origin -> index 6
        assert_eq!(rule.window_of_lead(issue, 9), 6);
        assert_eq!(rule.window_of_obs_hour(day(), 21), 6);
    }

    #[test]
    fn origin_indexed_before_origin_is_negative() {
        let origin = day().and_time(NaiveTime::MIN);
        let rule = WindowRule::origin_indexed(origin, 3).unwrap();
        let prev = day().pred_opt().unwrap();
        assert!(rule.window_of_obs_hour(prev, 1) < 0);
    }

    #[test]
    fn day_hour_label_maps_midnight_to_24() {
        let ts = day().and_time(NaiveTime::MIN);
        assert_eq!(day_hour_label(ts), 24);
        assert_eq!(day_hour_label(ts + Duration::hours(1)), 1);
        assert_eq!(day_hour_label(ts + Duration::hours(23)), 23);
    }
}
