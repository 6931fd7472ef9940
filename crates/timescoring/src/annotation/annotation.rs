//! Immutable annotation holding both a binary mask and an event list.

use tracing::debug;

use super::builder::AnnotationBuilder;
use super::event::{Event, rescaled_length};
use crate::error::{Result, ScoringError};

/// Labeling of a fixed-length timeline sampled at `fs` Hz.
///
/// An annotation stores the same information twice: as a per-sample boolean
/// mask and as a list of `[start, end)` events in seconds. Exactly one view is
/// supplied at construction and the other is derived from it. Annotations are
/// never mutated; transforms and resampling return new instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    fs: f64,
    mask: Vec<bool>,
    events: Vec<Event>,
}

impl Annotation {
    /// Start building an annotation sampled at `fs` Hz.
    pub fn builder(fs: f64) -> AnnotationBuilder {
        AnnotationBuilder::new(fs)
    }

    /// Build an annotation from a list of events on a timeline of
    /// `num_samples` samples.
    ///
    /// Events are not checked for order or overlap; overlapping events simply
    /// produce the union in the mask. Non-finite bounds are rejected.
    pub fn from_events<I, E>(events: I, fs: f64, num_samples: usize) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Event>,
    {
        validate_fs(fs)?;
        let events: Vec<Event> = events.into_iter().map(Into::into).collect();
        validate_events(&events)?;
        Ok(Self::with_events(events, fs, num_samples))
    }

    /// Build an annotation from a binary mask, one value per sample.
    pub fn from_mask(mask: impl Into<Vec<bool>>, fs: f64) -> Result<Self> {
        validate_fs(fs)?;
        let mask = mask.into();
        let events = events_from_mask(&mask, fs);
        Ok(Self { fs, mask, events })
    }

    /// Build from events that already passed validation.
    pub(crate) fn with_events(events: Vec<Event>, fs: f64, num_samples: usize) -> Self {
        let mask = mask_from_events(&events, fs, num_samples);
        Self { fs, mask, events }
    }

    /// New annotation on the same timeline with a different event list.
    pub(crate) fn with_same_timeline(&self, events: Vec<Event>) -> Self {
        Self::with_events(events, self.fs, self.num_samples())
    }

    /// Rebuild this annotation at another sampling rate.
    ///
    /// The mask is regenerated from the event list on a timeline of
    /// `round(num_samples / fs * new_fs)` samples.
    pub fn resample(&self, fs: f64) -> Result<Self> {
        validate_fs(fs)?;
        let num_samples = rescaled_length(self.num_samples(), self.fs, fs);
        debug!(
            from_fs = self.fs,
            to_fs = fs,
            num_samples,
            events = self.events.len(),
            "resampling annotation"
        );
        Ok(Self::with_events(self.events.clone(), fs, num_samples))
    }

    /// Sampling rate in Hz.
    pub fn fs(&self) -> f64 {
        self.fs
    }

    /// Per-sample labels.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Time-ordered events in seconds.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of samples in the timeline.
    pub fn num_samples(&self) -> usize {
        self.mask.len()
    }

    /// Length of the timeline in seconds.
    pub fn duration(&self) -> f64 {
        self.num_samples() as f64 / self.fs
    }

    /// Number of samples labelled positive.
    pub fn positive_samples(&self) -> usize {
        self.mask.iter().filter(|&&value| value).count()
    }

    /// Whether the annotation holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub(crate) fn validate_fs(fs: f64) -> Result<()> {
    if fs.is_finite() && fs > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::config(format!(
            "sampling rate must be a positive finite number, got {fs}"
        )))
    }
}

pub(crate) fn validate_events(events: &[Event]) -> Result<()> {
    match events
        .iter()
        .find(|event| !(event.start.is_finite() && event.end.is_finite()))
    {
        Some(event) => Err(ScoringError::config(format!(
            "event bounds must be finite, got ({}, {})",
            event.start, event.end
        ))),
        None => Ok(()),
    }
}

fn mask_from_events(events: &[Event], fs: f64, num_samples: usize) -> Vec<bool> {
    let mut mask = vec![false; num_samples];
    for event in events {
        mask[event.sample_range(fs, num_samples)].fill(true);
    }
    mask
}

/// Recover events from a mask using its rising and falling edges.
///
/// A positive first sample opens an event at time 0 and a positive last
/// sample closes one at the end of the timeline; an all-positive mask
/// therefore becomes a single event spanning the whole recording.
fn events_from_mask(mask: &[bool], fs: f64) -> Vec<Event> {
    let (Some(&first), Some(&last)) = (mask.first(), mask.last()) else {
        return Vec::new();
    };

    let mut starts = Vec::new();
    let mut ends = Vec::new();
    if first {
        starts.push(0);
    }
    for (i, pair) in mask.windows(2).enumerate() {
        match (pair[0], pair[1]) {
            (false, true) => starts.push(i + 1),
            (true, false) => ends.push(i + 1),
            _ => {}
        }
    }
    if last {
        ends.push(mask.len());
    }

    starts
        .into_iter()
        .zip(ends)
        .map(|(start, end)| Event::new(start as f64 / fs, end as f64 / fs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(annotation: &Annotation) -> Vec<(f64, f64)> {
        annotation.events().iter().map(|&e| e.into()).collect()
    }

    #[test]
    fn test_mask_from_events() {
        let annotation = Annotation::from_events([(1.0, 3.0), (5.0, 6.0)], 1.0, 8).unwrap();
        assert_eq!(
            annotation.mask(),
            &[false, true, true, false, false, true, false, false]
        );
        assert_eq!(annotation.positive_samples(), 3);
    }

    #[test]
    fn test_overlapping_events_take_union() {
        let annotation = Annotation::from_events([(1.0, 4.0), (2.0, 6.0)], 1.0, 8).unwrap();
        assert_eq!(annotation.positive_samples(), 5);
        assert_eq!(annotation.events().len(), 2);
    }

    #[test]
    fn test_events_from_interior_mask() {
        let mask = [false, true, true, false, false, true, false];
        let annotation = Annotation::from_mask(mask, 1.0).unwrap();
        assert_eq!(pairs(&annotation), vec![(1.0, 3.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_events_from_all_true_mask() {
        let annotation = Annotation::from_mask(vec![true; 10], 2.0).unwrap();
        assert_eq!(pairs(&annotation), vec![(0.0, 5.0)]);
    }

    #[test]
    fn test_events_from_all_false_mask() {
        let annotation = Annotation::from_mask(vec![false; 10], 2.0).unwrap();
        assert!(annotation.is_empty());
    }

    #[test]
    fn test_events_from_empty_mask() {
        let annotation = Annotation::from_mask(Vec::new(), 1.0).unwrap();
        assert!(annotation.is_empty());
        assert_eq!(annotation.num_samples(), 0);
    }

    #[test]
    fn test_event_at_start_of_mask() {
        let mask = [true, true, false, false, true, false];
        let annotation = Annotation::from_mask(mask, 1.0).unwrap();
        assert_eq!(pairs(&annotation), vec![(0.0, 2.0), (4.0, 5.0)]);
    }

    #[test]
    fn test_event_at_end_of_mask() {
        let mask = [false, true, false, false, true, true];
        let annotation = Annotation::from_mask(mask, 1.0).unwrap();
        assert_eq!(pairs(&annotation), vec![(1.0, 2.0), (4.0, 6.0)]);
    }

    #[test]
    fn test_events_at_both_edges() {
        let mask = [true, false, false, true];
        let annotation = Annotation::from_mask(mask, 2.0).unwrap();
        assert_eq!(pairs(&annotation), vec![(0.0, 0.5), (1.5, 2.0)]);
    }

    #[test]
    fn test_resample() {
        let annotation = Annotation::from_events([(2.0, 4.0)], 256.0, 2560).unwrap();
        let resampled = annotation.resample(1.0).unwrap();
        assert_eq!(resampled.num_samples(), 10);
        assert_eq!(resampled.fs(), 1.0);
        assert_eq!(pairs(&resampled), vec![(2.0, 4.0)]);
        assert_eq!(resampled.positive_samples(), 2);
    }

    #[test]
    fn test_invalid_fs_rejected() {
        assert!(Annotation::from_mask(vec![true], 0.0).is_err());
        assert!(Annotation::from_events([(0.0, 1.0)], -1.0, 10).is_err());
        assert!(Annotation::from_events([(0.0, 1.0)], f64::NAN, 10).is_err());
    }

    #[test]
    fn test_non_finite_event_bounds_rejected() {
        let infinite = Annotation::from_events([(10.0, f64::INFINITY)], 1.0, 100);
        assert!(matches!(infinite, Err(ScoringError::Config(_))));

        let nan = Annotation::from_events([(f64::NAN, 5.0)], 1.0, 100);
        assert!(matches!(nan, Err(ScoringError::Config(_))));
    }

    #[test]
    fn test_duration() {
        let annotation = Annotation::from_mask(vec![false; 512], 256.0).unwrap();
        assert_eq!(annotation.duration(), 2.0);
    }
}
