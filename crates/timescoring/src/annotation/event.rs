//! Event intervals and the seconds-to-sample quantization they share.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` interval, in seconds from the start of the recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Onset of the event in seconds.
    pub start: f64,
    /// End of the event in seconds (exclusive).
    pub end: f64,
}

impl Event {
    /// Create an event from its start and end times in seconds.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of the event in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Sample indices covered by this event on a timeline of `num_samples`
    /// samples at `fs` Hz.
    ///
    /// Both bounds are clamped to the timeline. An inverted or sub-sample event
    /// yields an empty range.
    pub fn sample_range(&self, fs: f64, num_samples: usize) -> Range<usize> {
        let start = sample_index(self.start, fs, num_samples);
        let end = sample_index(self.end, fs, num_samples);
        start..end.max(start)
    }
}

impl From<(f64, f64)> for Event {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl From<Event> for (f64, f64) {
    fn from(event: Event) -> Self {
        (event.start, event.end)
    }
}

/// Convert a time in seconds to a sample index, rounding half to even and
/// clamping to `[0, num_samples]`.
pub(crate) fn sample_index(seconds: f64, fs: f64, num_samples: usize) -> usize {
    let index = (seconds * fs).round_ties_even();
    if !(index > 0.0) {
        0
    } else if index >= num_samples as f64 {
        num_samples
    } else {
        index as usize
    }
}

/// Convert a duration at `from_fs` to a sample count at `to_fs`.
pub(crate) fn rescaled_length(num_samples: usize, from_fs: f64, to_fs: f64) -> usize {
    let length = (num_samples as f64 / from_fs * to_fs).round_ties_even();
    if length > 0.0 { length as usize } else { 0 }
}
