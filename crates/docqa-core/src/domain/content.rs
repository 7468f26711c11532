use std::fmt;

use serde::{Deserialize, Serialize};

/// Detected format of a fetched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Pdf,
    WordProcessor,
    Email,
    PlainText,
    Unknown,
}

impl ContentKind {
    /// Detect the kind from the URL or filename.
    ///
    /// Returns `None` when the URL carries no usable hint; callers then
    /// fall back to [`from_content_type`](Self::from_content_type).
    /// `.docx` is checked before `.doc` so the longer extension wins.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.to_lowercase();
        if url.contains(".pdf") {
            Some(Self::Pdf)
        } else if url.contains(".docx") || url.contains(".doc") {
            Some(Self::WordProcessor)
        } else if url.contains(".eml") || url.contains("email") || url.contains("mail") {
            Some(Self::Email)
        } else if url.contains(".txt") {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    /// Detect the kind from an HTTP `Content-Type` header value.
    pub fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.to_lowercase();
        if content_type.contains("pdf") {
            Self::Pdf
        } else if content_type.contains("wordprocessingml")
            || content_type.contains("docx")
            || content_type.contains("msword")
        {
            Self::WordProcessor
        } else if content_type.contains("email") || content_type.contains("message") {
            Self::Email
        } else if content_type.contains("text/plain") {
            Self::PlainText
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::WordProcessor => "word_processor",
            Self::Email => "email",
            Self::PlainText => "plain_text",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kind_from_url() {
        assert_eq!(
            ContentKind::from_url("https://example.com/policy.pdf?sig=abc"),
            Some(ContentKind::Pdf)
        );
        assert_eq!(
            ContentKind::from_url("https://example.com/contract.docx"),
            Some(ContentKind::WordProcessor)
        );
        assert_eq!(
            ContentKind::from_url("https://example.com/old-contract.doc"),
            Some(ContentKind::WordProcessor)
        );
        assert_eq!(
            ContentKind::from_url("https://example.com/message.eml"),
            Some(ContentKind::Email)
        );
        assert_eq!(
            ContentKind::from_url("https://mailhost.example.com/export/42"),
            Some(ContentKind::Email)
        );
        assert_eq!(
            ContentKind::from_url("https://example.com/notes.txt"),
            Some(ContentKind::PlainText)
        );
        assert_eq!(ContentKind::from_url("https://example.com/view/42"), None);
    }

    #[test]
    fn detects_kind_from_content_type() {
        assert_eq!(
            ContentKind::from_content_type("application/pdf"),
            ContentKind::Pdf
        );
        assert_eq!(
            ContentKind::from_content_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            ContentKind::WordProcessor
        );
        assert_eq!(
            ContentKind::from_content_type("application/msword"),
            ContentKind::WordProcessor
        );
        assert_eq!(
            ContentKind::from_content_type("message/rfc822"),
            ContentKind::Email
        );
        assert_eq!(
            ContentKind::from_content_type("text/plain; charset=utf-8"),
            ContentKind::PlainText
        );
        assert_eq!(
            ContentKind::from_content_type("application/octet-stream"),
            ContentKind::Unknown
        );
    }
}
