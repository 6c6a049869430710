//! CLIP text encoder for generating text embeddings.
//!
//! Loads the CLIP text ONNX model and BPE tokenizer, encodes phrases to
//! vectors aligned with the vision encoder's space.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Value;

use crate::error::PipelineError;

/// CLIP context length: token sequences are padded/truncated to this.
const MAX_LENGTH: usize = 77;

/// Output tensor names produced by common CLIP ONNX exports.
const OUTPUT_NAMES: [&str; 2] = ["text_embeds", "pooler_output"];

/// CLIP text encoder wrapper.
///
/// Uses the same `Mutex<Session>` pattern as the vision encoder.
#[derive(Debug)]
pub struct TextEncoder {
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
    /// Whether the exported model declares an attention_mask input.
    wants_attention_mask: bool,
}

impl TextEncoder {
    /// Load the text encoder from the model directory.
    ///
    /// Expects `text_model.onnx` and `tokenizer.json` in `model_dir`.
    pub fn new(model_dir: &Path) -> Result<Self, PipelineError> {
        let text_model_path = model_dir.join("text_model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !text_model_path.exists() {
            return Err(PipelineError::Model {
                message: format!(
                    "Text encoder not found at {:?}. Place the exported CLIP model there first.",
                    text_model_path
                ),
            });
        }

        if !tokenizer_path.exists() {
            return Err(PipelineError::Model {
                message: format!(
                    "Tokenizer not found at {:?}. Place the exported CLIP model there first.",
                    tokenizer_path
                ),
            });
        }

        let session = Session::builder()
            .map_err(|e| PipelineError::Model {
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(&text_model_path)
            .map_err(|e| PipelineError::Model {
                message: format!("Failed to load text encoder model: {e}"),
            })?;

        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            PipelineError::Model {
                message: format!("Failed to load tokenizer: {e}"),
            }
        })?;

        let wants_attention_mask = session
            .inputs()
            .iter()
            .any(|i| i.name() == "attention_mask");

        tracing::debug!(
            "Loaded CLIP text encoder (inputs: {:?}, outputs: {:?})",
            session
                .inputs()
                .iter()
                .map(|i| i.name())
                .collect::<Vec<_>>(),
            session
                .outputs()
                .iter()
                .map(|o| o.name())
                .collect::<Vec<_>>()
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            wants_attention_mask,
        })
    }

    /// Encode a batch of phrases to normalized embeddings.
    ///
    /// Returns one L2-normalized f32 vector per input phrase, in order.
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let batch_size = texts.len();
        if batch_size == 0 {
            return Ok(vec![]);
        }

        // Tokenize all phrases
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| PipelineError::Model {
                message: format!("Tokenization failed: {e}"),
            })?;

        // Build flat input_ids (and attention_mask) tensors padded to the
        // CLIP context length.
        let mut input_ids = vec![0i64; batch_size * MAX_LENGTH];
        let mut attention_mask = vec![0i64; batch_size * MAX_LENGTH];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            for (j, &id) in ids.iter().take(MAX_LENGTH).enumerate() {
                input_ids[i * MAX_LENGTH + j] = id as i64;
                attention_mask[i * MAX_LENGTH + j] = 1;
            }
        }

        let tensor_shape = vec![batch_size as i64, MAX_LENGTH as i64];
        let input_ids_value = Value::from_array((tensor_shape.clone(), input_ids)).map_err(|e| {
            PipelineError::Model {
                message: format!("Failed to create input tensor: {e}"),
            }
        })?;

        // Run inference
        let mut session = self.session.lock().map_err(|e| PipelineError::Model {
            message: format!("Text encoder lock poisoned: {e}"),
        })?;

        let run_result = if self.wants_attention_mask {
            let mask_value =
                Value::from_array((tensor_shape, attention_mask)).map_err(|e| {
                    PipelineError::Model {
                        message: format!("Failed to create attention mask tensor: {e}"),
                    }
                })?;
            session.run(
                ort::inputs!["input_ids" => input_ids_value, "attention_mask" => mask_value],
            )
        } else {
            session.run(ort::inputs!["input_ids" => input_ids_value])
        };

        let outputs = run_result.map_err(|e| PipelineError::Model {
            message: format!("Text encoder inference failed: {e}"),
        })?;

        // Extract the cross-modal projection by name
        let embeds = outputs
            .iter()
            .find(|(name, _)| OUTPUT_NAMES.contains(name))
            .ok_or_else(|| PipelineError::Model {
                message: format!("Text encoder produced none of {OUTPUT_NAMES:?}"),
            })?;

        let (shape, data) =
            embeds
                .1
                .try_extract_tensor::<f32>()
                .map_err(|e| PipelineError::Model {
                    message: format!("Failed to extract text embedding tensor: {e}"),
                })?;

        let embedding_dim = match shape.len() {
            1 => data.len() / batch_size,
            2 => shape[1] as usize,
            _ => {
                return Err(PipelineError::Model {
                    message: format!("Unexpected text embedding shape: {:?}", shape),
                });
            }
        };

        // Split flat output into per-phrase embeddings and L2-normalize
        let embeddings: Vec<Vec<f32>> = data
            .chunks(embedding_dim)
            .take(batch_size)
            .map(crate::math::l2_normalize)
            .collect();

        Ok(embeddings)
    }
}
