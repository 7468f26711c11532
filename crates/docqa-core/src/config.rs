use serde::{Deserialize, Serialize};

use crate::error::{DocqaError, Result};

/// Chunking parameters.
///
/// `overlap` must stay below `chunk_size`: the window step is
/// `chunk_size - overlap`, and a non-positive step could never advance
/// through the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters.
    pub chunk_size: usize,
    /// Characters shared between adjacent windows.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DocqaError::Config("chunk_size must be positive".into()));
        }
        if self.overlap >= self.chunk_size {
            return Err(DocqaError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Retrieval ranking parameters.
///
/// The defaults carry over the tuning of the system this pipeline replaced;
/// none of them is an invariant, which is why they are configuration rather
/// than constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Candidates requested from the index per question.
    pub top_k: usize,
    /// Minimum similarity score for a candidate to count as relevant.
    pub score_threshold: f32,
    /// Candidates kept when nothing clears the threshold.
    pub fallback_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            score_threshold: 0.3,
            fallback_k: 5,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(DocqaError::Config("top_k must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaConfig {
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
}

impl QaConfig {
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.retrieval.validate()
    }
}
