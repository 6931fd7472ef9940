//! Sample-by-sample scoring.

use tracing::debug;

use crate::annotation::Annotation;
use crate::error::{Result, ScoringError};

use super::metrics::Metrics;
use super::report::Score;

/// Default label rate for sample scoring, in Hz.
pub const DEFAULT_SAMPLE_FS: f64 = 1.0;

/// Scores a hypothesis against a reference one sample at a time.
///
/// Both annotations are first rebuilt from their event lists at a common
/// sampling rate. Every sample then counts as a true positive, false positive,
/// false negative or true negative.
#[derive(Debug, Clone)]
pub struct SampleScoring {
    reference: Annotation,
    hypothesis: Annotation,
    tp_mask: Vec<bool>,
    fp_mask: Vec<bool>,
    fn_mask: Vec<bool>,
    tp: usize,
    fp: usize,
    ref_true: usize,
    metrics: Metrics,
}

impl SampleScoring {
    /// Score at the default rate of 1 Hz.
    pub fn new(reference: &Annotation, hypothesis: &Annotation) -> Result<Self> {
        Self::with_fs(reference, hypothesis, DEFAULT_SAMPLE_FS)
    }

    /// Score after resampling both annotations to `fs` Hz.
    pub fn with_fs(reference: &Annotation, hypothesis: &Annotation, fs: f64) -> Result<Self> {
        let reference = reference.resample(fs)?;
        let hypothesis = hypothesis.resample(fs)?;

        if reference.num_samples() != hypothesis.num_samples() {
            return Err(ScoringError::DimensionMismatch {
                reference: reference.num_samples(),
                hypothesis: hypothesis.num_samples(),
            });
        }

        let pairs = || reference.mask().iter().zip(hypothesis.mask());
        let tp_mask: Vec<bool> = pairs().map(|(&r, &h)| r && h).collect();
        let fp_mask: Vec<bool> = pairs().map(|(&r, &h)| !r && h).collect();
        let fn_mask: Vec<bool> = pairs().map(|(&r, &h)| r && !h).collect();

        let ref_true = reference.positive_samples();
        let tp = count(&tp_mask);
        let fp = count(&fp_mask);
        let metrics = Metrics::compute(tp, fp, ref_true, reference.duration());

        debug!(fs, tp, fp, ref_true, "sample scoring complete");

        Ok(Self {
            reference,
            hypothesis,
            tp_mask,
            fp_mask,
            fn_mask,
            tp,
            fp,
            ref_true,
            metrics,
        })
    }

    /// Reference annotation at the scoring rate.
    pub fn reference(&self) -> &Annotation {
        &self.reference
    }

    /// Hypothesis annotation at the scoring rate.
    pub fn hypothesis(&self) -> &Annotation {
        &self.hypothesis
    }

    /// Samples positive in both reference and hypothesis.
    pub fn tp_mask(&self) -> &[bool] {
        &self.tp_mask
    }

    /// Samples positive only in the hypothesis.
    pub fn fp_mask(&self) -> &[bool] {
        &self.fp_mask
    }

    /// Samples positive only in the reference.
    pub fn fn_mask(&self) -> &[bool] {
        &self.fn_mask
    }
}

impl Score for SampleScoring {
    fn tp(&self) -> usize {
        self.tp
    }

    fn fp(&self) -> usize {
        self.fp
    }

    fn ref_true(&self) -> usize {
        self.ref_true
    }

    fn num_samples(&self) -> usize {
        self.reference.num_samples()
    }

    fn fs(&self) -> f64 {
        self.reference.fs()
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&value| value).count()
}
