//! Event-list transforms: merging, splitting and extending events.

mod engine;
mod operations;

pub use engine::TransformPipeline;
pub use operations::{EventTransform, extend_events, merge_neighbouring_events, split_long_events};
