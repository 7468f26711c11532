use std::sync::Arc;

use tracing::info;

use crate::chunker::Chunker;
use crate::config::QaConfig;
use crate::domain::ContentKind;
use crate::error::{DocqaError, Result};
use crate::ports::{AnswerGenerator, DocumentFetcher, EmbeddingGenerator, TextExtractor};

use super::RequestSession;

/// Where the document text comes from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Fetch from a URL, then extract text from the detected format.
    Url(String),
    /// Already-extracted text; fetch and extraction are skipped.
    Text(String),
}

/// Front door of the pipeline: fetch -> extract -> chunk -> session.
///
/// The collaborators are process-wide handles shared across requests;
/// every [`process`](Self::process) call gets its own session and index.
pub struct DocumentQaService<F, X, E, G>
where
    F: DocumentFetcher,
    X: TextExtractor,
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    fetcher: Arc<F>,
    extractor: Arc<X>,
    embedder: Arc<E>,
    generator: Arc<G>,
    chunker: Chunker,
    config: QaConfig,
}

impl<F, X, E, G> DocumentQaService<F, X, E, G>
where
    F: DocumentFetcher,
    X: TextExtractor,
    E: EmbeddingGenerator,
    G: AnswerGenerator,
{
    /// Configuration problems surface here, at construction, never during
    /// a request.
    pub fn new(
        fetcher: Arc<F>,
        extractor: Arc<X>,
        embedder: Arc<E>,
        generator: Arc<G>,
        config: QaConfig,
    ) -> Result<Self> {
        config.validate()?;
        let chunker = Chunker::new(config.chunking.clone())?;
        Ok(Self {
            fetcher,
            extractor,
            embedder,
            generator,
            chunker,
            config,
        })
    }

    /// Answer `questions` about the document: one answer per question, in
    /// question order.
    ///
    /// Individual question failures are contained inside the session and
    /// never surface here. An error from this method is document-level
    /// (fetch, extraction, or the initial batch embedding) and the caller
    /// is expected to substitute one uniform failure answer per question.
    pub async fn process(&self, source: DocumentSource, questions: &[String]) -> Result<Vec<String>> {
        let (text, origin, kind) = self.resolve_text(source).await?;
        if text.trim().is_empty() {
            return Err(DocqaError::Extraction(format!(
                "no text content found in document from {origin}"
            )));
        }

        let chunks = self.chunker.chunk_document(&text, &origin, kind);
        info!(source = %origin, chunks = chunks.len(), "document chunked");

        let session = RequestSession::new(
            Arc::clone(&self.embedder),
            Arc::clone(&self.generator),
            &self.config,
        )?;
        session.run(questions, chunks).await
    }

    async fn resolve_text(&self, source: DocumentSource) -> Result<(String, String, ContentKind)> {
        match source {
            DocumentSource::Text(text) => Ok((text, "inline".to_string(), ContentKind::PlainText)),
            DocumentSource::Url(url) => {
                let fetched = self.fetcher.fetch(&url).await?;
                info!(
                    source = %url,
                    bytes = fetched.bytes.len(),
                    kind = %fetched.kind,
                    "document fetched"
                );
                let text = self.extractor.extract(&fetched.bytes, fetched.kind).await?;
                Ok((text, url, fetched.kind))
            }
        }
    }
}
