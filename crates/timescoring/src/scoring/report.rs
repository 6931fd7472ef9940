//! Common scoring interface, per-recording reports and dataset totals.

use serde::{Deserialize, Serialize};

use super::metrics::Metrics;

/// Confusion counts and derived metrics of a reference/hypothesis comparison.
///
/// Implemented by both [`SampleScoring`](super::SampleScoring) and
/// [`EventScoring`](super::EventScoring); the meaning of the counts depends
/// on the scoring granularity.
pub trait Score {
    /// True positives.
    fn tp(&self) -> usize;

    /// False positives.
    fn fp(&self) -> usize;

    /// Number of positives in the reference.
    fn ref_true(&self) -> usize;

    /// Number of samples in the scored timeline.
    fn num_samples(&self) -> usize;

    /// Sampling rate of the scored timeline, in Hz.
    fn fs(&self) -> f64;

    /// Metrics derived from the counts.
    fn metrics(&self) -> &Metrics;

    /// Duration of the scored timeline in seconds.
    fn duration(&self) -> f64 {
        self.num_samples() as f64 / self.fs()
    }

    /// Reference positives that were not detected.
    fn false_negatives(&self) -> usize {
        self.ref_true().saturating_sub(self.tp())
    }

    fn sensitivity(&self) -> f64 {
        self.metrics().sensitivity
    }

    fn precision(&self) -> f64 {
        self.metrics().precision
    }

    fn f1(&self) -> f64 {
        self.metrics().f1
    }

    fn fp_rate(&self) -> f64 {
        self.metrics().fp_rate
    }

    /// Serializable snapshot of the counts and metrics.
    fn report(&self) -> ScoreReport {
        ScoreReport {
            tp: self.tp(),
            fp: self.fp(),
            ref_true: self.ref_true(),
            duration: self.duration(),
            metrics: *self.metrics(),
        }
    }
}

/// Counts and metrics of a single scored recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub tp: usize,
    pub fp: usize,
    pub ref_true: usize,
    /// Recording duration in seconds.
    pub duration: f64,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Running totals over many scored recordings.
///
/// Metrics are recomputed from the summed counts, with the summed recording
/// duration as the false alarm rate denominator. Per-recording metrics are
/// never averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub recordings: usize,
    pub tp: usize,
    pub fp: usize,
    pub ref_true: usize,
    /// Total duration in seconds.
    pub duration: f64,
}

impl ScoreTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the counts of one scored recording.
    pub fn add(&mut self, score: &impl Score) {
        self.add_report(&score.report());
    }

    /// Add the counts of one recording report.
    pub fn add_report(&mut self, report: &ScoreReport) {
        self.recordings += 1;
        self.tp += report.tp;
        self.fp += report.fp;
        self.ref_true += report.ref_true;
        self.duration += report.duration;
    }

    /// Fold another set of totals into this one.
    pub fn merge(&mut self, other: &ScoreTotals) {
        self.recordings += other.recordings;
        self.tp += other.tp;
        self.fp += other.fp;
        self.ref_true += other.ref_true;
        self.duration += other.duration;
    }

    /// Undetected reference positives across all recordings.
    pub fn false_negatives(&self) -> usize {
        self.ref_true.saturating_sub(self.tp)
    }

    /// Metrics over the accumulated counts.
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(self.tp, self.fp, self.ref_true, self.duration)
    }
}

impl Extend<ScoreReport> for ScoreTotals {
    fn extend<T: IntoIterator<Item = ScoreReport>>(&mut self, iter: T) {
        for report in iter {
            self.add_report(&report);
        }
    }
}

impl FromIterator<ScoreReport> for ScoreTotals {
    fn from_iter<T: IntoIterator<Item = ScoreReport>>(iter: T) -> Self {
        let mut totals = Self::new();
        totals.extend(iter);
        totals
    }
}
