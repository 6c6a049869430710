//! CLIP embedding generation.
//!
//! This module converts images and phrases into vectors in CLIP's shared
//! embedding space using ONNX Runtime for local inference. Both encoders are
//! loaded once at startup and live for the duration of the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clipsift_core::embedding::EmbeddingEngine;
//! use clipsift_core::config::Config;
//!
//! let config = Config::default();
//! let engine = EmbeddingEngine::load(&config.embedding, &config.model_dir())?;
//! let image_emb = engine.embed_image(&decoded_image, path)?;
//! let text_embs = engine.encode_texts(&phrases)?;
//! ```

pub(crate) mod preprocess;
pub(crate) mod text;
pub(crate) mod vision;

use std::path::Path;

use image::DynamicImage;

use crate::config::EmbeddingConfig;
use crate::error::PipelineError;

use self::preprocess::preprocess;
use self::text::TextEncoder;
use self::vision::VisionSession;

/// Engine holding both CLIP encoders.
///
/// Constructed once before processing begins; every scoring call borrows it.
#[derive(Debug)]
pub struct EmbeddingEngine {
    vision: VisionSession,
    text: TextEncoder,
    image_size: u32,
}

impl EmbeddingEngine {
    /// Load the CLIP encoders from the model directory.
    ///
    /// Expects `visual.onnx`, `text_model.onnx`, and `tokenizer.json` at
    /// `{model_dir}/{model_name}/`.
    pub fn load(config: &EmbeddingConfig, model_dir: &Path) -> Result<Self, PipelineError> {
        let dir = model_dir.join(&config.model);
        let visual_path = dir.join("visual.onnx");

        if !visual_path.exists() {
            return Err(PipelineError::Model {
                message: format!(
                    "Visual encoder not found at {:?}. Place the exported CLIP model there first.",
                    visual_path
                ),
            });
        }

        tracing::info!("Loading CLIP model from {:?}", dir);
        let vision = VisionSession::load(&visual_path)?;
        let text = TextEncoder::new(&dir)?;
        tracing::info!("CLIP model loaded successfully");

        Ok(Self {
            vision,
            text,
            image_size: config.image_size,
        })
    }

    /// Get the image input size for this model.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Generate an embedding vector for an image.
    ///
    /// Returns an L2-normalized Vec<f32> (512 dimensions for ViT-B/32).
    pub fn embed_image(&self, image: &DynamicImage, path: &Path) -> Result<Vec<f32>, PipelineError> {
        let tensor = preprocess(image, self.image_size);
        self.vision.embed(&tensor, path)
    }

    /// Encode phrases into L2-normalized embeddings, one per input, in order.
    pub fn encode_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        self.text.encode_batch(texts)
    }
}
