//! Score report persistence.
//!
//! The report is a self-describing JSON document: the target phrase, the
//! threshold used, and an ordered map from image path to score. Ordering
//! comes from the `BTreeMap`, so identical runs serialize byte-identically.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Complete score map for one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// The phrase the images were scored against.
    pub target: String,
    /// Inclusive copy threshold used for this run.
    pub threshold: f32,
    /// One entry per enumerated candidate; failed items are recorded as 0.0.
    pub scores: BTreeMap<String, f32>,
}

impl ScoreReport {
    /// Create an empty report for a run.
    pub fn new(target: impl Into<String>, threshold: f32) -> Self {
        Self {
            target: target.into(),
            threshold,
            scores: BTreeMap::new(),
        }
    }

    /// Record the score for a candidate path.
    pub fn record(&mut self, path: &Path, score: f32) {
        self.scores.insert(path.display().to_string(), score);
    }

    /// Look up the recorded score for a path.
    pub fn get(&self, path: &Path) -> Option<f32> {
        self.scores.get(&path.display().to_string()).copied()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the report holds no entries.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Persist the report to `path` in a single pretty-JSON write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
