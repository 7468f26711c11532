use std::sync::Arc;

use tracing::debug;

use crate::config::QaConfig;
use crate::domain::{Chunk, SessionId};
use crate::error::Result;
use crate::ports::{AnswerGenerator, EmbeddingGenerator};
use crate::retrieval::RetrievalPolicy;

use super::QueryOrchestrator;

/// Single-use retrieval state for one document + questions request.
///
/// Each session owns its orchestrator and, through it, its vector index:
/// two concurrent requests can never observe each other's fragments
/// because nothing retrieval-related is shared between them. The embedding
/// and generation collaborators *are* shared process-wide handles; each
/// call to them is independently safe to issue concurrently.
///
/// [`run`](Self::run) consumes the session, so reuse across requests is
/// ruled out at compile time. The index is released on every exit path;
/// dropping an unfinished session (cancellation) releases it too, and a
/// cancelled call's result has no surviving index to be written into.
pub struct RequestSession<E, G>
where
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    id: SessionId,
    orchestrator: QueryOrchestrator<E, G>,
}

impl<E, G> RequestSession<E, G>
where
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    /// Allocate a fresh index and orchestrator for one request.
    pub fn new(embedder: Arc<E>, generator: Arc<G>, config: &QaConfig) -> Result<Self> {
        config.validate()?;
        let id = SessionId::generate();
        debug!(session = %id, "opening request session");
        Ok(Self {
            id,
            orchestrator: QueryOrchestrator::new(
                embedder,
                generator,
                RetrievalPolicy::new(config.retrieval.clone()),
            ),
        })
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Run the question batch, then dispose of the session. The index is
    /// cleared whether the batch succeeded or failed.
    pub async fn run(mut self, questions: &[String], chunks: Vec<Chunk>) -> Result<Vec<String>> {
        let result = self.orchestrator.answer_all(questions, chunks).await;
        self.orchestrator.clear();
        debug!(session = %self.id, ok = result.is_ok(), "request session disposed");
        result
    }
}
