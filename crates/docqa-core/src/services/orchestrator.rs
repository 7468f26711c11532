use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::Chunk;
use crate::error::{DocqaError, Result};
use crate::index::VectorIndex;
use crate::ports::{AnswerGenerator, EmbeddingGenerator};
use crate::retrieval::RetrievalPolicy;

/// Separator between retrieved fragments when assembling generation context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Substituted for a question whose embedding or generation failed.
pub const FAILED_ANSWER: &str = "Unable to process this question due to an error.";

/// Batches a document's questions against its chunks.
///
/// Owns the per-request [`VectorIndex`]. The document is embedded and
/// loaded once, up front, so the load happens-before any search by
/// construction. Each question is then an independent unit of work: its
/// failure is absorbed and [`FAILED_ANSWER`] substituted, never aborting
/// the batch.
pub struct QueryOrchestrator<E, G>
where
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    index: VectorIndex,
    policy: RetrievalPolicy,
    embedder: Arc<E>,
    generator: Arc<G>,
}

impl<E, G> QueryOrchestrator<E, G>
where
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    pub fn new(embedder: Arc<E>, generator: Arc<G>, policy: RetrievalPolicy) -> Self {
        Self {
            index: VectorIndex::new(),
            policy,
            embedder,
            generator,
        }
    }

    /// Answer every question against `chunks`, returning exactly one answer
    /// per question, in question order.
    ///
    /// Only a document-level failure (the batch embedding and load) is
    /// propagated: with nothing loaded, no retrieval-based answer would be
    /// meaningful for any question.
    pub async fn answer_all(
        &mut self,
        questions: &[String],
        chunks: Vec<Chunk>,
    ) -> Result<Vec<String>> {
        info!(
            questions = questions.len(),
            chunks = chunks.len(),
            "answering question batch"
        );
        self.load_document(chunks).await?;

        let mut answers = Vec::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            match self.answer_one(question).await {
                Ok(answer) => answers.push(answer),
                Err(e) => {
                    warn!(position, error = %e, "question failed, substituting failure answer");
                    answers.push(FAILED_ANSWER.to_string());
                }
            }
        }
        Ok(answers)
    }

    /// Embed all chunk texts in one batch call and load the owned index.
    /// One round-trip to the embedding model instead of one per chunk.
    async fn load_document(&mut self, chunks: Vec<Chunk>) -> Result<()> {
        if chunks.is_empty() {
            self.index.load(Vec::new());
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(DocqaError::DocumentEmbedding(format!(
                "embedding batch returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let embedded: Vec<Chunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| chunk.with_embedding(embedding))
            .collect();
        self.index.load(embedded);
        Ok(())
    }

    async fn answer_one(&self, question: &str) -> Result<String> {
        let query = self.embedder.embed(question).await?;
        let results = self.policy.retrieve(&self.index, &query);
        if results.is_empty() {
            // No context is not an error: the generator states that the
            // document does not provide the answer.
            debug!("no context retrieved, generating with empty context");
        }

        let context = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let answer = self.generator.generate(question, &context).await?;
        Ok(normalize_answer(&answer))
    }

    /// Release the index contents. Idempotent.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    #[must_use]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

/// Strip a leading "Answer:" label, which models tend to echo back from the
/// prompt. Output normalization only, not a semantic transform.
fn normalize_answer(answer: &str) -> String {
    let trimmed = answer.trim();
    match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("answer:") => {
            trimmed[7..].trim_start().to_string()
        }
        _ => trimmed.to_string(),
    }
}
