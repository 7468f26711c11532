use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ContentKind;
use crate::error::Result;

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument>;
}

#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub source: String,
    pub bytes: Vec<u8>,
    pub kind: ContentKind,
    pub fetched_at: DateTime<Utc>,
}

impl FetchedDocument {
    pub fn new(source: impl Into<String>, bytes: Vec<u8>, kind: ContentKind) -> Self {
        Self {
            source: source.into(),
            bytes,
            kind,
            fetched_at: Utc::now(),
        }
    }
}
