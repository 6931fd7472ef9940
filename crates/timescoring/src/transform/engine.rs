//! Ordered sequence of event transforms.

use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;

use super::operations::EventTransform;

/// Applies a list of [`EventTransform`]s in order.
///
/// Order matters: merging before splitting can create long events that the
/// split then chops up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPipeline {
    steps: Vec<EventTransform>,
}

impl TransformPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step to the pipeline.
    pub fn then(mut self, step: EventTransform) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[EventTransform] {
        &self.steps
    }

    /// Run every step over the annotation.
    pub fn apply(&self, annotation: &Annotation) -> Annotation {
        self.steps
            .iter()
            .fold(annotation.clone(), |current, step| step.apply(&current))
    }

    /// Human-readable summary of each step.
    pub fn describe(&self) -> Vec<String> {
        self.steps.iter().map(EventTransform::description).collect()
    }
}
