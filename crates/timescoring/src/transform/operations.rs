//! Event-list transforms. Each returns a new annotation on the same timeline.

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, Event};

/// A transform applied to the event list of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EventTransform {
    /// Merge events separated by less than `min_gap` seconds.
    Merge { min_gap: f64 },

    /// Chop events longer than `max_duration` seconds into fixed-length chunks.
    Split { max_duration: f64 },

    /// Widen every event by `before`/`after` seconds, clamped to the timeline.
    Extend { before: f64, after: f64 },
}

impl EventTransform {
    /// Apply the transform, producing a new annotation.
    pub fn apply(&self, annotation: &Annotation) -> Annotation {
        match *self {
            EventTransform::Merge { min_gap } => merge_neighbouring_events(annotation, min_gap),
            EventTransform::Split { max_duration } => split_long_events(annotation, max_duration),
            EventTransform::Extend { before, after } => extend_events(annotation, before, after),
        }
    }

    /// Get a human-readable description of the transform.
    pub fn description(&self) -> String {
        match self {
            EventTransform::Merge { min_gap } => {
                format!("Merge events separated by less than {}s", min_gap)
            }
            EventTransform::Split { max_duration } => {
                format!("Split events longer than {}s", max_duration)
            }
            EventTransform::Extend { before, after } => {
                format!("Extend events by {}s before and {}s after", before, after)
            }
        }
    }
}

/// Merge events whose separation is strictly less than `min_gap` seconds.
///
/// Merging cascades: a chain of events each closer than `min_gap` to the next
/// collapses into a single event. A gap exactly equal to `min_gap` is kept.
pub fn merge_neighbouring_events(annotation: &Annotation, min_gap: f64) -> Annotation {
    let mut merged = Vec::with_capacity(annotation.events().len());
    let mut events = annotation.events().iter().copied();

    if let Some(mut current) = events.next() {
        for next in events {
            if next.start - current.end < min_gap {
                current.end = current.end.max(next.end);
            } else {
                merged.push(current);
                current = next;
            }
        }
        merged.push(current);
    }

    annotation.with_same_timeline(merged)
}

/// Split every event longer than `max_duration` seconds into consecutive
/// chunks of exactly `max_duration`, the last chunk holding the remainder.
///
/// Chunks are only cut up to the end of the timeline; whatever part of an
/// event lies past it stays attached to the last chunk. A non-positive or
/// non-finite `max_duration` leaves the events untouched.
pub fn split_long_events(annotation: &Annotation, max_duration: f64) -> Annotation {
    if !(max_duration.is_finite() && max_duration > 0.0) {
        return annotation.clone();
    }

    let duration = annotation.duration();
    let mut shorter = Vec::with_capacity(annotation.events().len());
    for event in annotation.events() {
        let limit = event.end.min(duration);
        let mut start = event.start;
        let mut chunk = 1.0;
        while limit - start > max_duration {
            let end = event.start + chunk * max_duration;
            shorter.push(Event::new(start, end));
            start = end;
            chunk += 1.0;
        }
        shorter.push(Event::new(start, event.end));
    }

    annotation.with_same_timeline(shorter)
}

/// Extend each event by `before` seconds at its start and `after` seconds at
/// its end, clamped to `[0, duration]`.
///
/// Extended events may overlap; they are kept as separate entries.
pub fn extend_events(annotation: &Annotation, before: f64, after: f64) -> Annotation {
    let duration = annotation.duration();
    let extended = annotation
        .events()
        .iter()
        .map(|event| {
            Event::new(
                (event.start - before).max(0.0),
                (event.end + after).min(duration),
            )
        })
        .collect();

    annotation.with_same_timeline(extended)
}
