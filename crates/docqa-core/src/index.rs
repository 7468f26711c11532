use tracing::debug;

use crate::domain::{Chunk, SimilarityResult};

/// In-memory vector index over one document's chunks.
///
/// Brute-force cosine ranking over a flat sequence. The sequence is only
/// ever replaced wholesale by [`load`](Self::load), never appended to, so
/// fragments of a previously processed document cannot linger behind a
/// search. Exclusive ownership stands in for locking: `load` and `clear`
/// take `&mut self`, `search` takes `&self`, and an index is never shared
/// between sessions.
#[derive(Debug, Default)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held sequence with a new document's chunks. Overwrites
    /// any prior content; does not merge.
    pub fn load(&mut self, chunks: Vec<Chunk>) {
        debug!(count = chunks.len(), "loading chunks into vector index");
        self.chunks = chunks;
    }

    /// Rank held chunks by cosine similarity against `query`, best first.
    ///
    /// Chunks without an embedding are skipped. The sort is stable, so
    /// equal scores keep insertion order and results are deterministic.
    /// An empty index yields an empty result, not an error.
    #[must_use]
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SimilarityResult> {
        let mut results: Vec<SimilarityResult> = self
            .chunks
            .iter()
            .enumerate()
            .filter_map(|(source_index, chunk)| {
                let embedding = chunk.embedding.as_deref()?;
                Some(SimilarityResult {
                    text: chunk.text.clone(),
                    metadata: chunk.metadata.clone(),
                    score: cosine_similarity(query, embedding),
                    source_index,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Release the held chunks and their vectors. Idempotent.
    pub fn clear(&mut self) {
        self.chunks = Vec::new();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Cosine similarity between two vectors.
///
/// Defined as 0.0 when either norm is zero, so a degenerate vector ranks
/// neutrally instead of dividing by zero.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
