use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Produce a natural-language answer to `question` from the assembled
    /// `context` text. An empty context means nothing relevant was
    /// retrieved; the generator is expected to say the document does not
    /// provide the answer rather than invent one.
    async fn generate(&self, question: &str, context: &str) -> Result<String>;
}
