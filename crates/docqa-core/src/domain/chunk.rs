use serde::{Deserialize, Serialize};

use super::{ChunkId, ContentKind};

/// A bounded span of extracted document text plus positional metadata and,
/// once batch embedding has run, its embedding vector.
///
/// Created without an embedding, completed exactly once via
/// [`with_embedding`](Self::with_embedding), immutable afterwards. Owned by
/// the vector index that holds it and dropped when the index is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub metadata: ChunkMetadata,
    pub embedding: Option<Vec<f32>>,
}

impl Chunk {
    pub fn new(text: String, metadata: ChunkMetadata) -> Self {
        Self {
            id: ChunkId::derive(&metadata.source, metadata.index),
            text,
            metadata,
            embedding: None,
        }
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// Provenance and position of a chunk within its document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Where the document came from (URL, or "inline" for direct text).
    pub source: String,
    pub content_kind: ContentKind,
    /// 0-based position of this chunk in the document.
    pub index: usize,
    /// Total number of chunks produced from the document.
    pub total: usize,
    /// Chunk length in characters.
    pub length: usize,
}
