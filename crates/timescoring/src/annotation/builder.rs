//! Builder enforcing the either-events-or-mask construction contract.

use super::annotation::{Annotation, validate_events, validate_fs};
use super::event::Event;
use crate::error::{Result, ScoringError};

/// Collects the inputs for an [`Annotation`] and validates them on [`build`].
///
/// Exactly one representation must be supplied: either an event list together
/// with a sample count, or a binary mask.
///
/// [`build`]: AnnotationBuilder::build
#[derive(Debug, Clone)]
pub struct AnnotationBuilder {
    fs: f64,
    events: Option<Vec<Event>>,
    mask: Option<Vec<bool>>,
    num_samples: Option<usize>,
}

impl AnnotationBuilder {
    /// Create a builder for an annotation sampled at `fs` Hz.
    pub fn new(fs: f64) -> Self {
        Self {
            fs,
            events: None,
            mask: None,
            num_samples: None,
        }
    }

    /// Supply the event list, in seconds.
    pub fn events<I, E>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Event>,
    {
        self.events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Supply the per-sample mask.
    pub fn mask(mut self, mask: impl Into<Vec<bool>>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Length of the timeline in samples. Required with events.
    pub fn num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = Some(num_samples);
        self
    }

    /// Validate the inputs and build the annotation.
    pub fn build(self) -> Result<Annotation> {
        validate_fs(self.fs)?;
        match (self.events, self.mask) {
            (Some(_), Some(_)) => Err(ScoringError::config(
                "annotation must be built from either events or a mask, not both",
            )),
            (None, None) => Err(ScoringError::config(
                "annotation requires either events or a mask",
            )),
            (Some(events), None) => {
                let num_samples = self.num_samples.ok_or_else(|| {
                    ScoringError::config("building from events requires the number of samples")
                })?;
                validate_events(&events)?;
                Ok(Annotation::with_events(events, self.fs, num_samples))
            }
            (None, Some(mask)) => match self.num_samples {
                Some(num_samples) if num_samples != mask.len() => {
                    Err(ScoringError::config(format!(
                        "mask has {} samples but {num_samples} were requested",
                        mask.len()
                    )))
                }
                _ => Annotation::from_mask(mask, self.fs),
            },
        }
    }
}
