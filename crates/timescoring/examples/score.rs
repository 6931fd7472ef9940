//! Example: Score a detector's output against reference annotations.
//!
//! Usage:
//!   cargo run --example score
//!
//! Scores two synthetic one-hour recordings sampled at 256 Hz with both
//! sample and event scoring, then prints dataset totals.

use timescoring::{
    Annotation, EventScoring, EventScoringParameters, SampleScoring, Score, ScoreTotals,
};

const FS: f64 = 256.0;
const NUM_SAMPLES: usize = 3600 * 256;

fn print_score(label: &str, score: &impl Score) {
    println!("## {}", label);
    println!("  TP: {}  FP: {}  Reference: {}", score.tp(), score.fp(), score.ref_true());
    println!("  Sensitivity : {:.2}", score.sensitivity());
    println!("  Precision   : {:.2}", score.precision());
    println!("  F1-score    : {:.2}", score.f1());
    println!("  FP/24h      : {:.2}", score.fp_rate());
    println!();
}

fn main() -> timescoring::Result<()> {
    let recordings = [
        (
            vec![(600.0, 660.0), (2400.0, 2530.0)],
            vec![(610.0, 650.0), (1500.0, 1520.0), (2390.0, 2500.0)],
        ),
        (vec![(100.0, 800.0)], vec![(300.0, 310.0), (3000.0, 3020.0)]),
    ];

    let parameters = EventScoringParameters::default();
    println!("Event scoring pipeline:");
    for step in parameters.preprocessing().describe() {
        println!("  - {}", step);
    }
    println!();

    let mut sample_totals = ScoreTotals::new();
    let mut event_totals = ScoreTotals::new();

    for (i, (reference, hypothesis)) in recordings.into_iter().enumerate() {
        let reference = Annotation::from_events(reference, FS, NUM_SAMPLES)?;
        let hypothesis = Annotation::from_events(hypothesis, FS, NUM_SAMPLES)?;

        let sample = SampleScoring::new(&reference, &hypothesis)?;
        let event = EventScoring::with_parameters(&reference, &hypothesis, parameters)?;

        print_score(&format!("Recording {} - sample scoring", i + 1), &sample);
        print_score(&format!("Recording {} - event scoring", i + 1), &event);

        sample_totals.add(&sample);
        event_totals.add(&event);
    }

    let separator = "=".repeat(60);
    println!("{}", separator);
    for (label, totals) in [("Sample", sample_totals), ("Event", event_totals)] {
        let metrics = totals.metrics();
        println!("# {} scoring ({} recordings)", label, totals.recordings);
        println!("- Sensitivity : {:.2}", metrics.sensitivity);
        println!("- Precision   : {:.2}", metrics.precision);
        println!("- F1-score    : {:.2}", metrics.f1);
        println!("- FP/24h      : {:.2}", metrics.fp_rate);
    }

    Ok(())
}
