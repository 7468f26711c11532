use async_trait::async_trait;
use tracing::info;

use docqa_core::domain::ContentKind;
use docqa_core::error::{DocqaError, Result};
use docqa_core::ports::{DocumentFetcher, FetchedDocument};

/// Fetches documents over HTTP.
///
/// The content kind comes from the URL when it carries a hint, otherwise
/// from the `Content-Type` response header.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        info!(url, "fetching document");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DocqaError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DocqaError::Fetch(format!(
                "HTTP {} fetching {url}",
                response.status()
            )));
        }

        let kind = ContentKind::from_url(url).unwrap_or_else(|| {
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map_or(ContentKind::Unknown, ContentKind::from_content_type)
        });

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DocqaError::Fetch(e.to_string()))?;

        info!(bytes = bytes.len(), kind = %kind, "document fetched");
        Ok(FetchedDocument::new(url, bytes.to_vec(), kind))
    }
}
