use tracing::debug;

use crate::config::RetrievalConfig;
use crate::domain::SimilarityResult;
use crate::index::VectorIndex;

/// Threshold-and-fallback ranking policy over [`VectorIndex::search`].
///
/// Prefers matches scoring above the threshold, but when any candidates
/// exist at all it guarantees non-empty context: the answer generator does
/// better with weak fragments than with none.
#[derive(Debug, Clone, Default)]
pub struct RetrievalPolicy {
    config: RetrievalConfig,
}

impl RetrievalPolicy {
    #[must_use]
    pub const fn new(config: RetrievalConfig) -> Self {
        Self { config }
    }

    /// Search `index` and keep results scoring above the threshold. When
    /// the filter removes everything but candidates existed, fall back to
    /// the best `fallback_k` unfiltered results. An empty index yields an
    /// empty result; the caller treats "no context" as a distinct case,
    /// not an error.
    #[must_use]
    pub fn retrieve(&self, index: &VectorIndex, query: &[f32]) -> Vec<SimilarityResult> {
        let mut results = index.search(query, self.config.top_k);
        if results.is_empty() {
            return results;
        }

        if results
            .iter()
            .any(|r| r.score > self.config.score_threshold)
        {
            results.retain(|r| r.score > self.config.score_threshold);
        } else {
            debug!(
                threshold = self.config.score_threshold,
                fallback_k = self.config.fallback_k,
                "no candidate cleared the threshold, keeping best candidates"
            );
            results.truncate(self.config.fallback_k);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chunk, ChunkMetadata, ContentKind};

    fn chunk(text: &str, index: usize, embedding: Vec<f32>) -> Chunk {
        Chunk::new(
            text.to_string(),
            ChunkMetadata {
                source: "test".to_string(),
                content_kind: ContentKind::PlainText,
                index,
                total: 0,
                length: text.chars().count(),
            },
        )
        .with_embedding(embedding)
    }

    fn policy(top_k: usize, score_threshold: f32, fallback_k: usize) -> RetrievalPolicy {
        RetrievalPolicy::new(RetrievalConfig {
            top_k,
            score_threshold,
            fallback_k,
        })
    }

    #[test]
    fn keeps_only_results_above_threshold() {
        let mut index = VectorIndex::new();
        index.load(vec![
            chunk("strong", 0, vec![1.0, 0.0]),
            chunk("weak", 1, vec![0.0, 1.0]),
        ]);

        let results = policy(10, 0.3, 5).retrieve(&index, &[1.0, 0.0]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "strong");
    }

    #[test]
    fn falls_back_to_best_candidates_when_filter_empties() {
        let mut index = VectorIndex::new();
        index.load(vec![
            chunk("a", 0, vec![0.1, 0.9]),
            chunk("b", 1, vec![0.2, 0.8]),
            chunk("c", 2, vec![0.0, 1.0]),
        ]);

        // Nothing scores above 0.9 against [1, 0]; the best two come back.
        let results = policy(10, 0.9, 2).retrieve(&index, &[1.0, 0.0]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "b");
        assert_eq!(results[1].text, "a");
    }

    #[test]
    fn fallback_is_capped_by_available_candidates() {
        let mut index = VectorIndex::new();
        index.load(vec![chunk("only", 0, vec![0.0, 1.0])]);

        let results = policy(10, 0.9, 5).retrieve(&index, &[1.0, 0.0]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn does_not_fall_back_when_filtered_set_is_non_empty() {
        let mut index = VectorIndex::new();
        index.load(vec![
            chunk("strong", 0, vec![1.0, 0.0]),
            chunk("weak-1", 1, vec![0.0, 1.0]),
            chunk("weak-2", 2, vec![0.1, 0.9]),
        ]);

        // One result clears the threshold; even though fallback_k is 3 the
        // weak candidates must not be pulled back in.
        let results = policy(10, 0.5, 3).retrieve(&index, &[1.0, 0.0]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "strong");
    }

    #[test]
    fn empty_index_yields_empty_result() {
        let index = VectorIndex::new();
        let results = policy(10, 0.3, 5).retrieve(&index, &[1.0, 0.0]);
        assert!(results.is_empty());
    }
}
