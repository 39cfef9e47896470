//! Error types for the ombros-window crate.

/// Error type for all fallible operations in the ombros-window crate.
///
/// This enum covers validation failures for window lengths, forecast
/// issue hours, lead coverage, and lookups into the short-range
/// verification table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Returned when a threshold hour cannot split a calendar day evenly.
    #[error("invalid threshold hour: {hour} (must be positive and divide 24)")]
    InvalidThresholdHour {
        /// The invalid window length in hours.
        hour: i64,
    },

    /// Returned when a window length is not positive.
    #[error("invalid window length: {hour}h (must be positive)")]
    InvalidWindowLength {
        /// The invalid window length in hours.
        hour: i64,
    },

    /// Returned when the declared maximum lead cannot cover one window.
    #[error("max lead {max_lead}h cannot cover one window of {threshold_hour}h")]
    InvalidMaxLead {
        /// Declared maximum lead hour.
        max_lead: i64,
        /// Requested window length in hours.
        threshold_hour: i64,
    },

    /// Returned when a model configuration declares no issue hours.
    #[error("model declares no issue hours")]
    NoIssueHours,

    /// Returned when an issue hour is outside a calendar day.
    #[error("invalid issue hour: {hour} (must be 0..=23)")]
    InvalidIssueHour {
        /// The invalid hour of day.
        hour: i64,
    },

    /// Returned when the short-range table has no entry for the
    /// requested combination.
    #[error(
        "no short-range verification rule for max forecast hour {max_fcst_hour} \
         with threshold hour {threshold_hour}"
    )]
    TableEntryMissing {
        /// Requested maximum forecast hour.
        max_fcst_hour: i64,
        /// Requested threshold hour.
        threshold_hour: i64,
    },
}
