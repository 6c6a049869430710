//! clipsift core - CLIP-based image/text matching library.
//!
//! clipsift scores a directory of images against a free-text target phrase
//! and reports, per image, the probability that the target (rather than one
//! of a bank of distractor phrases) best describes it.
//!
//! # Architecture
//!
//! ```text
//! Image → Decode → Preprocess → Embed (CLIP) → softmax over phrase bank → score
//! ```
//!
//! The batch loop around the scorer lives in the `clipsift` binary crate;
//! this crate provides the pieces: configuration, discovery, decoding, the
//! embedding engine, the scorer, and the score report.

// Module declarations
pub mod config;
pub mod embedding;
pub mod error;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use embedding::EmbeddingEngine;
pub use error::{ClipsiftError, ConfigError, PipelineError, PipelineResult, Result};
pub use output::ScoreReport;
pub use pipeline::{FileDiscovery, ImageDecoder};
pub use scoring::{ClipScorer, ImageScorer, DEFAULT_DISTRACTORS};
pub use types::{RunSummary, ScoreOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
