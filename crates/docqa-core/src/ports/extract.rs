use async_trait::async_trait;

use crate::domain::ContentKind;
use crate::error::Result;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8], kind: ContentKind) -> Result<String>;
}
