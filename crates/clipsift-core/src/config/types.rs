//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::DEFAULT_DISTRACTORS;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory where models are stored
    pub model_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("~/.clipsift/models"),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Supported input formats (extension matching is case-insensitive)
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

/// Resource limits to protect against problematic inputs.
///
/// An image exceeding these limits is scored 0.0 like any other unreadable
/// file; it never aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Embedding model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model name/variant
    pub model: String,

    /// Image input size expected by the visual encoder
    pub image_size: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "clip-vit-base-patch32".to_string(),
            image_size: 224,
        }
    }
}

/// Scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Inclusive minimum score for an image to be copied.
    /// The CLI `--threshold` flag overrides this.
    pub threshold: f32,

    /// Distractor phrases the target competes against. The comparison set
    /// is `[target] ++ distractors`, so scores are softmax probabilities
    /// over `1 + distractors.len()` phrases.
    pub distractors: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: 0.75,
            distractors: DEFAULT_DISTRACTORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
