//! Detection metrics shared by sample and event scoring.

use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Sensitivity, precision, F1 and false alarm rate of one comparison.
///
/// Any field may be NaN when the underlying ratio is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// `tp / ref_true`; NaN without reference positives.
    pub sensitivity: f64,
    /// `tp / (tp + fp)`; NaN without hypothesis positives.
    pub precision: f64,
    /// Harmonic mean of sensitivity and precision.
    pub f1: f64,
    /// False positives per 24 hours of recording.
    pub fp_rate: f64,
}

impl Metrics {
    /// Compute the metrics from confusion counts and the recording duration in seconds.
    pub fn compute(tp: usize, fp: usize, ref_true: usize, duration: f64) -> Self {
        let sensitivity = if ref_true > 0 {
            tp as f64 / ref_true as f64
        } else {
            f64::NAN
        };

        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            f64::NAN
        };

        let f1 = if sensitivity.is_nan() || precision.is_nan() {
            f64::NAN
        } else if sensitivity + precision == 0.0 {
            0.0
        } else {
            2.0 * sensitivity * precision / (sensitivity + precision)
        };

        let fp_rate = fp as f64 / (duration / SECONDS_PER_DAY);

        Self {
            sensitivity,
            precision,
            f1,
            fp_rate,
        }
    }
}
