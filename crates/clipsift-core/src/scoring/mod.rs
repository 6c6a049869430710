//! Contrastive scoring of images against a target phrase.
//!
//! A single yes/no similarity from CLIP is poorly calibrated; comparing the
//! target against a bank of plausible alternative phrases and taking the
//! softmax mass at the target exploits the model's relative-similarity
//! strength instead. The comparison set is always `[target] ++ distractors`
//! with the target at index 0.

use std::path::Path;

use crate::embedding::EmbeddingEngine;
use crate::error::PipelineError;
use crate::math::{dot, softmax};
use crate::pipeline::ImageDecoder;
use crate::types::ScoreOutcome;

/// Default distractor bank the target phrase competes against.
///
/// Tuned for "find this vehicle" style queries; override per run via
/// `scoring.distractors` in the config file.
pub const DEFAULT_DISTRACTORS: [&str; 7] = [
    "a blue car",
    "a orange car",
    "a yellow car",
    "a white car",
    "a black car",
    "a motorcycle",
    "a bicycle",
];

/// CLIP's learned logit temperature: cosine similarities are multiplied by
/// this before the softmax, matching `logits_per_image` from the original
/// model.
const LOGIT_SCALE: f32 = 100.0;

/// Probability mass the image assigns to the target phrase.
///
/// `bank` holds L2-normalized phrase embeddings with the target at index 0.
/// Returns `softmax(LOGIT_SCALE * cosine)[0]`, guaranteed to be in [0, 1].
pub fn target_probability(image_embedding: &[f32], bank: &[Vec<f32>]) -> f32 {
    let logits: Vec<f32> = bank
        .iter()
        .map(|phrase| LOGIT_SCALE * dot(image_embedding, phrase))
        .collect();
    softmax(&logits).first().copied().unwrap_or(0.0)
}

/// Scores candidate images, one at a time.
///
/// The trait is the seam between the scorer and the batch loop: production
/// code uses [`ClipScorer`], tests drive the loop with a stub.
pub trait ImageScorer {
    /// Score one image. Per-item failures are reported as
    /// [`ScoreOutcome::Failed`], never as a hard error.
    fn score(&self, path: &Path) -> ScoreOutcome;
}

/// CLIP-backed scorer holding the model and the pre-encoded phrase bank.
pub struct ClipScorer {
    engine: EmbeddingEngine,
    decoder: ImageDecoder,
    /// L2-normalized phrase embeddings, target at index 0.
    phrase_bank: Vec<Vec<f32>>,
}

impl ClipScorer {
    /// Build a scorer for a target phrase.
    ///
    /// Encodes `[target] ++ distractors` once up front; every subsequent
    /// `score` call only runs the vision encoder.
    pub fn new(
        engine: EmbeddingEngine,
        decoder: ImageDecoder,
        target: &str,
        distractors: &[String],
    ) -> Result<Self, PipelineError> {
        if target.trim().is_empty() {
            return Err(PipelineError::Model {
                message: "Target phrase must not be empty".to_string(),
            });
        }

        let mut phrases = Vec::with_capacity(1 + distractors.len());
        phrases.push(target.to_string());
        phrases.extend(distractors.iter().cloned());

        tracing::debug!("Encoding phrase bank ({} phrases)", phrases.len());
        let phrase_bank = engine.encode_texts(&phrases)?;
        if phrase_bank.len() != phrases.len() {
            return Err(PipelineError::Model {
                message: format!(
                    "Text encoder returned {} embeddings for {} phrases",
                    phrase_bank.len(),
                    phrases.len()
                ),
            });
        }

        Ok(Self {
            engine,
            decoder,
            phrase_bank,
        })
    }

    /// Number of phrases in the comparison set (target included).
    pub fn bank_size(&self) -> usize {
        self.phrase_bank.len()
    }
}

impl ImageScorer for ClipScorer {
    fn score(&self, path: &Path) -> ScoreOutcome {
        let decoded = match self.decoder.decode_file(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Error reading image {:?}: {}", path, e);
                return ScoreOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self.engine.embed_image(&decoded.image, path) {
            Ok(embedding) => ScoreOutcome::Scored(target_probability(&embedding, &self.phrase_bank)),
            Err(e) => {
                tracing::warn!("Error embedding image {:?}: {}", path, e);
                ScoreOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::l2_normalize;

    #[test]
    fn test_target_probability_in_unit_interval() {
        let bank = vec![
            l2_normalize(&[1.0, 0.0]),
            l2_normalize(&[0.0, 1.0]),
            l2_normalize(&[0.7, 0.7]),
        ];
        let image = l2_normalize(&[0.9, 0.1]);
        let p = target_probability(&image, &bank);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_target_probability_high_when_image_matches_target() {
        let bank = vec![
            l2_normalize(&[1.0, 0.0]),
            l2_normalize(&[0.0, 1.0]),
            l2_normalize(&[-1.0, 0.0]),
        ];
        let image = l2_normalize(&[1.0, 0.05]);
        let p = target_probability(&image, &bank);
        assert!(p > 0.99, "got {p}");
    }

    #[test]
    fn test_target_probability_low_when_image_matches_distractor() {
        let bank = vec![l2_normalize(&[1.0, 0.0]), l2_normalize(&[0.0, 1.0])];
        let image = l2_normalize(&[0.05, 1.0]);
        let p = target_probability(&image, &bank);
        assert!(p < 0.01, "got {p}");
    }

    #[test]
    fn test_distribution_sums_to_one_over_bank() {
        // The target mass plus the mass of each phrase treated as target
        // in turn must cover the whole distribution.
        let bank = vec![
            l2_normalize(&[1.0, 0.0]),
            l2_normalize(&[0.6, 0.8]),
            l2_normalize(&[0.0, 1.0]),
            l2_normalize(&[-0.5, 0.5]),
        ];
        let image = l2_normalize(&[0.3, 0.7]);

        let mut total = 0.0;
        for i in 0..bank.len() {
            let mut rotated = bank.clone();
            rotated.swap(0, i);
            total += target_probability(&image, &rotated);
        }
        assert!((total - 1.0).abs() < 1e-5, "got {total}");
    }

    #[test]
    fn test_default_distractors_shape() {
        assert_eq!(DEFAULT_DISTRACTORS.len(), 7);
        assert!(DEFAULT_DISTRACTORS.iter().all(|d| !d.trim().is_empty()));
    }
}
