//! Verification scores derived from a summed contingency cell.

use serde::Serialize;

use crate::cell::Cell;

/// Sentinel meaning "score undefined for this sample".
///
/// A first-class domain value, not an error: degenerate samples (no
/// events observed, no events forecast, empty cell) carry it through
/// persistence and reporting.
pub const SCORE_UNDEFINED: f64 = -9.99;

/// The standard score set of one contingency cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    /// Fraction of correct outcomes, (h+z)/t.
    pub accuracy: f64,
    /// Frequency bias, (h+f)/(h+m).
    pub bias: f64,
    /// Critical success index, h/(h+m+f).
    pub csi: f64,
    /// Equitable threat score, (h-ar)/(h+m+f-ar) with
    /// ar = (h+m)(h+f)/t.
    pub ets: f64,
    /// Probability of detection, h/(h+m).
    pub pod: f64,
    /// False alarm ratio, f/(h+f).
    pub far: f64,
    /// Probability of false detection, f/(f+z).
    pub pofd: f64,
}

impl Scores {
    /// Computes the score set, substituting [`SCORE_UNDEFINED`]
    /// wherever the cell cannot support the score: everything when
    /// `t == 0`; BIAS and POD need `h+m > 0`, FAR needs `h+f > 0`,
    /// POFD needs `f+z > 0`, CSI needs `h+m+f > 0`, and ETS needs its
    /// denominator `h+m+f-ar` to be non-zero.
    pub fn from_cell(cell: &Cell) -> Self {
        let h = f64::from(cell.hits);
        let f = f64::from(cell.false_alarms);
        let m = f64::from(cell.misses);
        let z = f64::from(cell.correct_negatives);
        let t = f64::from(cell.total);

        if cell.total == 0 {
            return Self::undefined();
        }

        let accuracy = (h + z) / t;
        let bias = if h + m > 0.0 {
            (h + f) / (h + m)
        } else {
            SCORE_UNDEFINED
        };
        let pod = if h + m > 0.0 {
            h / (h + m)
        } else {
            SCORE_UNDEFINED
        };
        let far = if h + f > 0.0 {
            f / (h + f)
        } else {
            SCORE_UNDEFINED
        };
        let pofd = if f + z > 0.0 {
            f / (f + z)
        } else {
            SCORE_UNDEFINED
        };
        let csi = if h + m + f > 0.0 {
            h / (h + m + f)
        } else {
            SCORE_UNDEFINED
        };
        let ets = {
            let ar = (h + m) * (h + f) / t;
            let denom = h + m + f - ar;
            if denom == 0.0 {
                SCORE_UNDEFINED
            } else {
                (h - ar) / denom
            }
        };

        Self {
            accuracy,
            bias,
            csi,
            ets,
            pod,
            far,
            pofd,
        }
    }

    /// The all-sentinel score set of an empty sample.
    pub fn undefined() -> Self {
        Self {
            accuracy: SCORE_UNDEFINED,
            bias: SCORE_UNDEFINED,
            csi: SCORE_UNDEFINED,
            ets: SCORE_UNDEFINED,
            pod: SCORE_UNDEFINED,
            far: SCORE_UNDEFINED,
            pofd: SCORE_UNDEFINED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_fully_undefined() {
        let scores = Scores::from_cell(&Cell::default());
        assert_eq!(scores, Scores::undefined());
    }

    #[test]
    fn all_correct_negatives() {
        let cell = Cell::from_counts(0, 0, 0, 20, 20);
        let scores = Scores::from_cell(&cell);
        assert_eq!(scores.accuracy, 1.0);
        assert_eq!(scores.bias, SCORE_UNDEFINED);
        assert_eq!(scores.pod, SCORE_UNDEFINED);
        assert_eq!(scores.far, SCORE_UNDEFINED);
        assert_eq!(scores.csi, SCORE_UNDEFINED);
        assert_eq!(scores.ets, SCORE_UNDEFINED);
        assert_eq!(scores.pofd, 0.0);
    }

    #[test]
    fn known_cell_values() {
        // h=20, f=10, m=5, z=65, t=100
        let cell = Cell::from_counts(20, 10, 5, 65, 100);
        let scores = Scores::from_cell(&cell);
        assert!((scores.accuracy - 0.85).abs() < 1e-12);
        assert!((scores.bias - 1.2).abs() < 1e-12);
        assert!((scores.csi - 20.0 / 35.0).abs() < 1e-12);
        assert!((scores.pod - 0.8).abs() < 1e-12);
        assert!((scores.far - 10.0 / 30.0).abs() < 1e-12);
        assert!((scores.pofd - 10.0 / 75.0).abs() < 1e-12);
        // ar = 25 * 30 / 100 = 7.5; ets = 12.5 / 27.5
        assert!((scores.ets - 12.5 / 27.5).abs() < 1e-12);
    }

    #[test]
    fn csi_defined_with_false_alarms_only() {
        let cell = Cell::from_counts(0, 4, 0, 16, 20);
        let scores = Scores::from_cell(&cell);
        assert_eq!(scores.csi, 0.0);
        assert_eq!(scores.bias, SCORE_UNDEFINED);
        assert_eq!(scores.far, 1.0);
    }

    #[test]
    fn ets_degenerate_denominator() {
        // h+m+f == ar: all hits means ar = t*t/t = t = h, denom 0.
        let cell = Cell::from_counts(10, 0, 0, 0, 10);
        let scores = Scores::from_cell(&cell);
        assert_eq!(scores.ets, SCORE_UNDEFINED);
        assert_eq!(scores.accuracy, 1.0);
        assert_eq!(scores.pod, 1.0);
    }

    #[test]
    fn serializes_score_names() {
        let json = serde_json::to_value(Scores::undefined()).unwrap();
        for key in ["accuracy", "bias", "csi", "ets", "pod", "far", "pofd"] {
            assert_eq!(json[key], serde_json::json!(SCORE_UNDEFINED));
        }
    }
}
