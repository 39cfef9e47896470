//! Error types for the ombros-accum crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the ombros-accum crate.
///
/// This enum covers forecast-file header declarations that are
/// incompatible with the requested accumulation, and wiring mismatches
/// between a verification plan and the extracts supplied for it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccumError {
    /// Returned when a forecast file declares a non-positive interval.
    #[error("invalid forecast interval: {interval}h (must be positive)")]
    InvalidInterval {
        /// The declared native lead-step interval in hours.
        interval: i64,
    },

    /// Returned when a forecast file declares less lead coverage than
    /// one native step.
    #[error("invalid max forecast hour: {max_hour}h (must cover one interval of {interval}h)")]
    InvalidMaxHour {
        /// The declared maximum lead hour.
        max_hour: i64,
        /// The declared native lead-step interval in hours.
        interval: i64,
    },

    /// Returned when a forecast file does not reach the lead coverage
    /// the plan requires.
    #[error("file declares {declared}h of lead but {required}h is required")]
    LeadCoverage {
        /// Lead coverage the plan requires, in hours.
        required: i64,
        /// Lead coverage the file declares, in hours.
        declared: i64,
    },

    /// Returned when the file's native interval is coarser than the
    /// accumulation window.
    #[error("file interval {interval}h is coarser than threshold hour {threshold_hour}h")]
    IntervalTooCoarse {
        /// The declared native lead-step interval in hours.
        interval: i64,
        /// The requested window length in hours.
        threshold_hour: i64,
    },

    /// Returned when the accumulation window is not a whole number of
    /// native steps.
    #[error("threshold hour {threshold_hour}h is not a multiple of file interval {interval}h")]
    IntervalMisaligned {
        /// The declared native lead-step interval in hours.
        interval: i64,
        /// The requested window length in hours.
        threshold_hour: i64,
    },

    /// Returned when a file's declared issue time is not the cycle the
    /// plan asked for.
    #[error("cycle issue mismatch: expected {expected}, file declares {declared}")]
    IssueMismatch {
        /// Issue time the plan requires.
        expected: NaiveDateTime,
        /// Issue time the file header declares.
        declared: NaiveDateTime,
    },

    /// Returned when the number of extracts does not match the plan's
    /// cycle list.
    #[error("expected {expected} forecast extracts, got {got}")]
    CycleCountMismatch {
        /// Number of cycles the plan requires.
        expected: usize,
        /// Number of extracts supplied.
        got: usize,
    },
}
