pub mod chunk;
pub mod content;
pub mod id;
pub mod search;

pub use chunk::{Chunk, ChunkMetadata};
pub use content::ContentKind;
pub use id::{ChunkId, SessionId};
pub use search::SimilarityResult;
