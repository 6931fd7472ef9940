//! Timescoring: benchmark seizure detections against reference annotations.
//!
//! Annotations describe when a seizure is occurring on a recording, either as
//! a per-sample binary mask or as a list of `[start, end)` events in seconds.
//! A hypothesis (the output of a detector) is compared to a reference (the
//! ground truth) at one of two granularities:
//!
//! - **Sample scoring**: every sample is a true/false positive or negative.
//! - **Event scoring**: neighbouring events are merged, long events split, and
//!   a reference event counts as detected when the hypothesis overlaps it
//!   within a tolerance window. False positives are counted per event.
//!
//! Both yield sensitivity, precision, F1 and false positives per 24 hours.
//!
//! # Example
//!
//! ```
//! use timescoring::{Annotation, EventScoring, Score};
//!
//! let reference = Annotation::from_events([(10.0, 20.0)], 1.0, 100)?;
//! let hypothesis = Annotation::from_events([(12.0, 18.0)], 1.0, 100)?;
//!
//! let score = EventScoring::new(&reference, &hypothesis)?;
//! assert_eq!(score.tp(), 1);
//! assert_eq!(score.f1(), 1.0);
//! # Ok::<(), timescoring::ScoringError>(())
//! ```

pub mod annotation;
pub mod error;
pub mod scoring;
pub mod transform;

pub use annotation::{Annotation, AnnotationBuilder, Event};
pub use error::{Result, ScoringError};
pub use scoring::{
    DEFAULT_SAMPLE_FS, EventScoring, EventScoringParameters, Metrics, SampleScoring, Score,
    ScoreReport, ScoreTotals,
};
pub use transform::{EventTransform, TransformPipeline};
