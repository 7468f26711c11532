use crate::config::ChunkingConfig;
use crate::domain::{Chunk, ChunkMetadata, ContentKind};
use crate::error::Result;

/// Splits extracted text into overlapping fixed-size character windows.
///
/// Windowing is purely offset-based, with no sentence or paragraph
/// awareness: a simplicity/latency tradeoff the retrieval policy is tuned
/// around, not a gap.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Fails with a configuration error if `overlap >= chunk_size`, since
    /// the window step would never advance.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Split `text` into windows of `chunk_size` characters, each starting
    /// `chunk_size - overlap` characters after the previous one. The final
    /// window may be shorter. Empty input produces no windows.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, so windows measured in
        // characters never split a UTF-8 sequence.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let step = self.config.chunk_size - self.config.overlap;

        let mut windows = Vec::with_capacity(char_count.div_ceil(step));
        let mut start = 0;
        loop {
            let end = usize::min(start + self.config.chunk_size, char_count);
            windows.push(text[boundaries[start]..boundaries[end]].to_string());
            // A window that reaches the end of the text already covers any
            // later start position, so stop rather than emit a redundant
            // suffix window.
            if end == char_count {
                break;
            }
            start += step;
        }
        windows
    }

    /// Split and wrap each window in a [`Chunk`] carrying provenance
    /// metadata.
    pub fn chunk_document(&self, text: &str, source: &str, kind: ContentKind) -> Vec<Chunk> {
        let windows = self.split(text);
        let total = windows.len();
        windows
            .into_iter()
            .enumerate()
            .map(|(index, window)| {
                let length = window.chars().count();
                Chunk::new(
                    window,
                    ChunkMetadata {
                        source: source.to_string(),
                        content_kind: kind,
                        index,
                        total,
                        length,
                    },
                )
            })
            .collect()
    }
}
