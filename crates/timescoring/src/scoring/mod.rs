//! Scoring of hypothesis annotations against a reference.

mod event;
mod metrics;
mod report;
mod sample;

pub use event::{EventScoring, EventScoringParameters};
pub use metrics::Metrics;
pub use report::{Score, ScoreReport, ScoreTotals};
pub use sample::{DEFAULT_SAMPLE_FS, SampleScoring};
