//! Embedding providers for the docqa pipeline.
//!
//! The default `fastembed` feature ships a local ONNX provider running
//! all-MiniLM-L6-v2, the model the retrieval defaults were tuned against.
//! Build with `--no-default-features` when wiring a remote provider
//! instead.

use thiserror::Error;

#[cfg(feature = "fastembed")]
mod minilm;

#[cfg(feature = "fastembed")]
pub use minilm::MiniLmEmbedder;

/// Errors raised while constructing an embedding provider.
///
/// Inference-time failures surface through the core's error type instead;
/// this only covers model loading, which happens once at startup.
#[derive(Error, Debug)]
pub enum EmbeddingsError {
    #[error("Failed to initialize embedding model: {0}")]
    Init(String),
}
