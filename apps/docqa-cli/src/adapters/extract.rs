use async_trait::async_trait;

use docqa_core::domain::ContentKind;
use docqa_core::error::{DocqaError, Result};
use docqa_core::ports::TextExtractor;

/// Extracts text from plain-text payloads.
///
/// Rich formats need a real parser behind this port; reporting them as
/// extraction failures keeps the pipeline's error contract intact instead
/// of pretending to support them.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8], kind: ContentKind) -> Result<String> {
        match kind {
            ContentKind::PlainText | ContentKind::Unknown => String::from_utf8(bytes.to_vec())
                .map_err(|e| DocqaError::Extraction(format!("document is not valid UTF-8: {e}"))),
            other => Err(DocqaError::Extraction(format!(
                "no extractor available for {other} documents"
            ))),
        }
    }
}
