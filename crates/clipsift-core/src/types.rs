//! Core domain types.

use std::path::PathBuf;

/// Outcome of scoring a single candidate image.
///
/// Keeps "confidently not a match" distinct from "could not be evaluated":
/// a failed item still enters the score map, but as an explicit failure that
/// collapses to 0.0 only when the numeric score is asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// The image was scored; probability mass assigned to the target phrase.
    Scored(f32),
    /// The image could not be read, decoded, or embedded.
    Failed { reason: String },
}

impl ScoreOutcome {
    /// Numeric score for the score map. Failures score 0.0, which also makes
    /// them copy-ineligible for any positive threshold.
    pub fn value(&self) -> f32 {
        match self {
            ScoreOutcome::Scored(p) => *p,
            ScoreOutcome::Failed { .. } => 0.0,
        }
    }

    /// Whether this outcome represents a per-item failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, ScoreOutcome::Failed { .. })
    }
}

/// Summary of a completed batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of candidate images enumerated.
    pub found: usize,
    /// Number of images copied to the destination.
    pub copied: usize,
    /// Where the score report was written.
    pub output: PathBuf,
}
