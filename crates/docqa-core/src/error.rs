use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocqaError {
    #[error("Document fetch failed: {0}")]
    Fetch(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Document embedding failed: {0}")]
    DocumentEmbedding(String),

    #[error("Query embedding failed: {0}")]
    QueryEmbedding(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DocqaError {
    /// Whether this error aborts the whole request.
    ///
    /// Fetch, extraction and document-embedding failures leave nothing to
    /// retrieve against, so the entire batch fails. Query-embedding and
    /// generation failures are scoped to a single question and are absorbed
    /// by the orchestrator. Configuration errors only occur at construction.
    pub const fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Extraction(_) | Self::DocumentEmbedding(_) | Self::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DocqaError>;
