use serde::{Deserialize, Serialize};

use super::ChunkMetadata;

/// A ranked match from a vector index search.
///
/// Ephemeral: produced per search call, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub text: String,
    pub metadata: ChunkMetadata,
    /// Cosine similarity against the query, in [-1, 1].
    pub score: f32,
    /// Insertion position of the matched chunk in the index.
    pub source_index: usize,
}
