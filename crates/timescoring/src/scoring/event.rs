//! Event-based scoring with tolerance windows, merging and splitting.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotation::{Annotation, Event};
use crate::error::{Result, ScoringError};
use crate::transform::{EventTransform, TransformPipeline};

use super::metrics::Metrics;
use super::report::Score;

/// Margin added to the minimum overlap so that `min_overlap = 0` never
/// accepts a window with a rounding-level overlap.
const OVERLAP_EPSILON: f64 = 1e-6;

/// Parameters for event scoring. All durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventScoringParameters {
    /// Tolerance before a reference event within which a detection still counts.
    pub tolerance_start: f64,
    /// Tolerance after a reference event within which a detection still counts.
    pub tolerance_end: f64,
    /// Minimum relative overlap between the extended reference window and the
    /// hypothesis. 0 accepts any overlap.
    pub min_overlap: f64,
    /// Events longer than this are split into chunks of this length.
    pub max_event_duration: f64,
    /// Events separated by less than this are merged.
    pub min_duration_between_events: f64,
}

impl Default for EventScoringParameters {
    fn default() -> Self {
        Self {
            tolerance_start: 30.0,
            tolerance_end: 60.0,
            min_overlap: 0.0,
            max_event_duration: 5.0 * 60.0,
            min_duration_between_events: 90.0,
        }
    }
}

impl EventScoringParameters {
    /// Check that every parameter is within its valid range.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("tolerance_start", self.tolerance_start),
            ("tolerance_end", self.tolerance_end),
            ("min_overlap", self.min_overlap),
            ("min_duration_between_events", self.min_duration_between_events),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScoringError::config(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        if !(self.max_event_duration.is_finite() && self.max_event_duration > 0.0) {
            return Err(ScoringError::config(format!(
                "max_event_duration must be a positive finite number, got {}",
                self.max_event_duration
            )));
        }
        Ok(())
    }

    /// Merge-then-split pipeline applied to both annotations before matching.
    pub fn preprocessing(&self) -> TransformPipeline {
        TransformPipeline::new()
            .then(EventTransform::Merge {
                min_gap: self.min_duration_between_events,
            })
            .then(EventTransform::Split {
                max_duration: self.max_event_duration,
            })
    }

    fn tolerance(&self) -> EventTransform {
        EventTransform::Extend {
            before: self.tolerance_start,
            after: self.tolerance_end,
        }
    }
}

/// Scores a hypothesis against a reference one event at a time.
///
/// The hypothesis is resampled to the reference rate, both annotations are
/// merged and split, and each reference event widened by the tolerances is a
/// true positive when the hypothesis covers enough of it. Each hypothesis
/// event reaching outside every detected window is one false positive.
#[derive(Debug, Clone)]
pub struct EventScoring {
    reference: Annotation,
    hypothesis: Annotation,
    parameters: EventScoringParameters,
    tp_mask: Vec<bool>,
    tp: usize,
    fp: usize,
    ref_true: usize,
    metrics: Metrics,
}

impl EventScoring {
    /// Score with the default parameters.
    pub fn new(reference: &Annotation, hypothesis: &Annotation) -> Result<Self> {
        Self::with_parameters(reference, hypothesis, EventScoringParameters::default())
    }

    /// Score with explicit parameters.
    pub fn with_parameters(
        reference: &Annotation,
        hypothesis: &Annotation,
        parameters: EventScoringParameters,
    ) -> Result<Self> {
        parameters.validate()?;

        let fs = reference.fs();
        let hypothesis = hypothesis.resample(fs)?;

        let preprocessing = parameters.preprocessing();
        let reference = preprocessing.apply(reference);
        let hypothesis = preprocessing.apply(&hypothesis);

        let num_samples = reference.num_samples();
        let ref_true = reference.events().len();

        let extended = parameters.tolerance().apply(&reference);
        let mut tp = 0;
        let mut tp_mask = vec![false; num_samples];
        for window in extended.events() {
            if relative_overlap(window, &hypothesis) > parameters.min_overlap + OVERLAP_EPSILON {
                tp += 1;
                tp_mask[window.sample_range(fs, num_samples)].fill(true);
            }
        }

        let fp = hypothesis
            .events()
            .iter()
            .filter(|event| {
                tp_mask[event.sample_range(fs, num_samples)]
                    .iter()
                    .any(|&covered| !covered)
            })
            .count();

        let metrics = Metrics::compute(tp, fp, ref_true, reference.duration());

        debug!(
            fs,
            tp,
            fp,
            ref_true,
            hypothesis_events = hypothesis.events().len(),
            "event scoring complete"
        );

        Ok(Self {
            reference,
            hypothesis,
            parameters,
            tp_mask,
            tp,
            fp,
            ref_true,
            metrics,
        })
    }

    /// Reference annotation after merging and splitting.
    pub fn reference(&self) -> &Annotation {
        &self.reference
    }

    /// Hypothesis annotation after resampling, merging and splitting.
    pub fn hypothesis(&self) -> &Annotation {
        &self.hypothesis
    }

    /// Parameters used for this scoring.
    pub fn parameters(&self) -> &EventScoringParameters {
        &self.parameters
    }

    /// Samples covered by an extended reference window that was detected.
    pub fn tp_mask(&self) -> &[bool] {
        &self.tp_mask
    }
}

/// Fraction of `window` during which the hypothesis is positive.
///
/// The hypothesis may be shorter than the window's timeline; samples past its
/// end count as negative.
fn relative_overlap(window: &Event, hypothesis: &Annotation) -> f64 {
    let duration = window.duration();
    if duration <= 0.0 {
        return 0.0;
    }
    let covered = hypothesis.mask()[window.sample_range(hypothesis.fs(), hypothesis.num_samples())]
        .iter()
        .filter(|&&value| value)
        .count();
    covered as f64 / hypothesis.fs() / duration
}

impl Score for EventScoring {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(events: &[(f64, f64)], num_samples: usize) -> Annotation {
        Annotation::from_events(events.iter().copied(), 1.0, num_samples).unwrap()
    }

    #[test]
    fn test_default_parameters() {
        let parameters = EventScoringParameters::default();
        assert_eq!(parameters.tolerance_start, 30.0);
        assert_eq!(parameters.tolerance_end, 60.0);
        assert_eq!(parameters.min_overlap, 0.0);
        assert_eq!(parameters.max_event_duration, 300.0);
        assert_eq!(parameters.min_duration_between_events, 90.0);
    }

    #[test]
    fn test_parameters_validation() {
        let mut parameters = EventScoringParameters::default();
        assert!(parameters.validate().is_ok());

        parameters.max_event_duration = 0.0;
        assert!(parameters.validate().is_err());

        parameters = EventScoringParameters {
            tolerance_start: -1.0,
            ..Default::default()
        };
        assert!(parameters.validate().is_err());

        parameters = EventScoringParameters {
            min_overlap: f64::NAN,
            ..Default::default()
        };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_parameters_partial_json() {
        let parameters: EventScoringParameters =
            serde_json::from_str(r#"{"tolerance_start": 0, "min_overlap": 0.5}"#).unwrap();
        assert_eq!(parameters.tolerance_start, 0.0);
        assert_eq!(parameters.min_overlap, 0.5);
        assert_eq!(parameters.tolerance_end, 60.0);
    }

    #[test]
    fn test_hit_inside_reference() {
        let reference = annotation(&[(10.0, 20.0)], 100);
        let hypothesis = annotation(&[(12.0, 18.0)], 100);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.tp(), 1);
        assert_eq!(score.fp(), 0);
        assert_eq!(score.sensitivity(), 1.0);
        assert_eq!(score.precision(), 1.0);
        assert_eq!(score.f1(), 1.0);
    }

    #[test]
    fn test_detection_within_tolerance() {
        let reference = annotation(&[(100.0, 110.0)], 400);
        let hypothesis = annotation(&[(150.0, 160.0)], 400);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.tp(), 1);
        assert_eq!(score.fp(), 0);
    }

    #[test]
    fn test_hypothesis_straddling_window_is_also_false_positive() {
        let reference = annotation(&[(100.0, 110.0)], 400);
        let hypothesis = annotation(&[(160.0, 200.0)], 400);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.tp(), 1);
        assert_eq!(score.fp(), 1);
    }

    #[test]
    fn test_miss() {
        let reference = annotation(&[(10.0, 20.0)], 1000);
        let hypothesis = annotation(&[(500.0, 520.0)], 1000);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.tp(), 0);
        assert_eq!(score.fp(), 1);
        assert_eq!(score.sensitivity(), 0.0);
        assert_eq!(score.f1(), 0.0);
        assert_eq!(score.false_negatives(), 1);
    }

    #[test]
    fn test_min_overlap() {
        let parameters = EventScoringParameters {
            tolerance_start: 0.0,
            tolerance_end: 0.0,
            min_overlap: 0.5,
            ..Default::default()
        };
        let reference = annotation(&[(100.0, 110.0)], 400);

        let short = annotation(&[(100.0, 104.0)], 400);
        let score = EventScoring::with_parameters(&reference, &short, parameters).unwrap();
        assert_eq!(score.tp(), 0);

        let long = annotation(&[(100.0, 106.0)], 400);
        let score = EventScoring::with_parameters(&reference, &long, parameters).unwrap();
        assert_eq!(score.tp(), 1);
    }

    #[test]
    fn test_overlap_exactly_at_threshold_is_not_a_hit() {
        let parameters = EventScoringParameters {
            tolerance_start: 0.0,
            tolerance_end: 0.0,
            min_overlap: 0.5,
            ..Default::default()
        };
        let reference = annotation(&[(100.0, 110.0)], 400);
        let hypothesis = annotation(&[(100.0, 105.0)], 400);
        let score = EventScoring::with_parameters(&reference, &hypothesis, parameters).unwrap();
        assert_eq!(score.tp(), 0);
        assert_eq!(score.fp(), 1);
    }

    #[test]
    fn test_long_reference_split_before_matching() {
        let reference = annotation(&[(0.0, 700.0)], 1000);
        let hypothesis = annotation(&[(50.0, 60.0)], 1000);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.ref_true(), 3);
        assert_eq!(score.tp(), 1);
        assert_eq!(score.fp(), 0);
        assert_eq!(score.false_negatives(), 2);
    }

    #[test]
    fn test_close_hypotheses_merged() {
        let reference = annotation(&[(1000.0, 1010.0)], 2000);
        let hypothesis = annotation(&[(200.0, 210.0), (250.0, 260.0), (300.0, 310.0)], 2000);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.hypothesis().events(), &[Event::new(200.0, 310.0)]);
        assert_eq!(score.fp(), 1);
    }

    #[test]
    fn test_hypothesis_resampled_to_reference_rate() {
        let reference = Annotation::from_events([(10.0, 20.0)], 4.0, 400).unwrap();
        let hypothesis = Annotation::from_events([(12.0, 18.0)], 256.0, 25_600).unwrap();
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.fs(), 4.0);
        assert_eq!(score.hypothesis().num_samples(), 400);
        assert_eq!(score.tp(), 1);
        assert_eq!(score.fp(), 0);
    }

    #[test]
    fn test_no_reference_events() {
        let reference = annotation(&[], 100);
        let hypothesis = annotation(&[(10.0, 20.0)], 100);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        assert_eq!(score.ref_true(), 0);
        assert!(score.sensitivity().is_nan());
        assert_eq!(score.precision(), 0.0);
        assert!(score.f1().is_nan());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let reference = annotation(&[(10.0, 20.0)], 100);
        let parameters = EventScoringParameters {
            max_event_duration: -5.0,
            ..Default::default()
        };
        let result = EventScoring::with_parameters(&reference, &reference, parameters);
        assert!(matches!(result, Err(ScoringError::Config(_))));
    }

    #[test]
    fn test_tp_mask_covers_extended_window() {
        let reference = annotation(&[(100.0, 110.0)], 400);
        let hypothesis = annotation(&[(105.0, 106.0)], 400);
        let score = EventScoring::new(&reference, &hypothesis).unwrap();

        let covered = score.tp_mask().iter().filter(|&&value| value).count();
        assert_eq!(covered, 100);
        assert!(score.tp_mask()[70]);
        assert!(!score.tp_mask()[69]);
        assert!(score.tp_mask()[169]);
        assert!(!score.tp_mask()[170]);
    }
}
