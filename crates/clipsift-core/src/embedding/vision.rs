//! CLIP visual encoder session management and inference.
//!
//! Loads a CLIP image encoder exported to ONNX format and runs inference to
//! produce embedding vectors aligned with the text encoder's space.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;

use crate::error::PipelineError;

/// Output tensor names produced by common CLIP ONNX exports.
const OUTPUT_NAMES: [&str; 2] = ["image_embeds", "pooler_output"];

/// Wraps an ONNX Runtime session for CLIP visual embedding.
///
/// Uses a `Mutex` because `Session::run` requires `&mut self`.
#[derive(Debug)]
pub struct VisionSession {
    session: Mutex<Session>,
    /// Name of the input tensor (detected from model metadata).
    input_name: String,
}

impl VisionSession {
    /// Load a CLIP visual encoder from an ONNX file.
    pub fn load(model_path: &Path) -> Result<Self, PipelineError> {
        let session = Session::builder()
            .map_err(|e| PipelineError::Model {
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(model_path)
            .map_err(|e| PipelineError::Model {
                message: format!("Failed to load visual encoder from {model_path:?}: {e}"),
            })?;

        // Detect the input tensor name from model metadata.
        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "pixel_values".to_string());

        tracing::debug!(
            "Loaded CLIP visual encoder from {:?} (input: {:?}, outputs: {:?})",
            model_path,
            input_name,
            session
                .outputs()
                .iter()
                .map(|o| o.name())
                .collect::<Vec<_>>()
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }

    /// Run inference on a preprocessed image tensor and return the embedding.
    ///
    /// Input shape: \[1, 3, image_size, image_size\] (NCHW, CLIP-normalized).
    /// Output: L2-normalized embedding vector (512 floats for ViT-B/32).
    pub fn embed(&self, preprocessed: &Array4<f32>, path: &Path) -> Result<Vec<f32>, PipelineError> {
        // Convert ndarray to (shape, flat_data) for ort.
        let shape: Vec<i64> = preprocessed.shape().iter().map(|&d| d as i64).collect();
        let flat_data: Vec<f32> = preprocessed.iter().copied().collect();

        let input_value =
            Value::from_array((shape, flat_data)).map_err(|e| PipelineError::Embedding {
                path: path.to_path_buf(),
                message: format!("Failed to create input tensor: {e}"),
            })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_value];

        let mut session = self.session.lock().map_err(|e| PipelineError::Embedding {
            path: path.to_path_buf(),
            message: format!("Session lock poisoned: {e}"),
        })?;

        let outputs = session.run(inputs).map_err(|e| PipelineError::Embedding {
            path: path.to_path_buf(),
            message: format!("ONNX inference failed: {e}"),
        })?;

        // Extract the cross-modal projection by name. last_hidden_state is
        // NOT aligned with the text space and must not be used for scoring.
        let embeds = outputs
            .iter()
            .find(|(name, _)| OUTPUT_NAMES.contains(name))
            .ok_or_else(|| PipelineError::Embedding {
                path: path.to_path_buf(),
                message: format!("Model produced none of {OUTPUT_NAMES:?}"),
            })?;

        let (shape, data) =
            embeds
                .1
                .try_extract_tensor::<f32>()
                .map_err(|e| PipelineError::Embedding {
                    path: path.to_path_buf(),
                    message: format!("Failed to extract embedding tensor: {e}"),
                })?;

        // image_embeds is [1, dim] — extract the single embedding vector.
        let mut raw = match shape.len() {
            1 => data.to_vec(),
            2 => {
                let dim = shape[1] as usize;
                data[..dim].to_vec()
            }
            _ => {
                return Err(PipelineError::Embedding {
                    path: path.to_path_buf(),
                    message: format!("Unexpected embedding shape: {:?}", shape),
                });
            }
        };

        crate::math::l2_normalize_in_place(&mut raw);
        Ok(raw)
    }
}
