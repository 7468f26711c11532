pub mod embed;
pub mod extract;
pub mod fetch;
pub mod generate;

pub use embed::EmbeddingGenerator;
pub use extract::TextExtractor;
pub use fetch::{DocumentFetcher, FetchedDocument};
pub use generate::AnswerGenerator;
