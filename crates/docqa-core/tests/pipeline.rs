//! End-to-end pipeline tests with fake collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use docqa_core::config::QaConfig;
use docqa_core::domain::ContentKind;
use docqa_core::error::{DocqaError, Result};
use docqa_core::ports::{
    AnswerGenerator, DocumentFetcher, EmbeddingGenerator, FetchedDocument, TextExtractor,
};
use docqa_core::services::{DocumentQaService, DocumentSource, FAILED_ANSWER, RequestSession};

/// Serves a fixed payload and counts how often it is asked to fetch.
struct FakeFetcher {
    payload: Vec<u8>,
    kind: ContentKind,
    calls: AtomicUsize,
}

impl FakeFetcher {
    fn text(payload: &str) -> Self {
        Self {
            payload: payload.as_bytes().to_vec(),
            kind: ContentKind::PlainText,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchedDocument::new(url, self.payload.clone(), self.kind))
    }
}

struct UnreachableHostFetcher;

#[async_trait]
impl DocumentFetcher for UnreachableHostFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        Err(DocqaError::Fetch(format!("connection refused: {url}")))
    }
}

struct Utf8Extractor;

#[async_trait]
impl TextExtractor for Utf8Extractor {
    async fn extract(&self, bytes: &[u8], _kind: ContentKind) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| DocqaError::Extraction(e.to_string()))
    }
}

/// Keyword-direction embedder: texts about the same topic land on the same
/// axis, so retrieval is fully deterministic.
struct TopicEmbedder {
    fail_on: Option<&'static str>,
}

fn topic_vector(text: &str) -> Vec<f32> {
    if text.contains("solar") {
        vec![1.0, 0.0]
    } else if text.contains("wind") {
        vec![0.0, 1.0]
    } else {
        vec![0.5, 0.5]
    }
}

#[async_trait]
impl EmbeddingGenerator for TopicEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(marker) = self.fail_on {
            if text.contains(marker) {
                return Err(DocqaError::QueryEmbedding("scripted failure".into()));
            }
        }
        Ok(topic_vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| topic_vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "topic-fake"
    }
}

/// Echoes the context back so tests can see exactly which fragments each
/// question retrieved.
struct ContextEchoGenerator;

#[async_trait]
impl AnswerGenerator for ContextEchoGenerator {
    async fn generate(&self, _question: &str, context: &str) -> Result<String> {
        Ok(format!("context: [{context}]"))
    }
}

fn embedder() -> Arc<TopicEmbedder> {
    Arc::new(TopicEmbedder { fail_on: None })
}

fn service<F: DocumentFetcher>(
    fetcher: Arc<F>,
) -> DocumentQaService<F, Utf8Extractor, TopicEmbedder, ContextEchoGenerator> {
    DocumentQaService::new(
        fetcher,
        Arc::new(Utf8Extractor),
        embedder(),
        Arc::new(ContextEchoGenerator),
        QaConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn url_document_flows_through_fetch_extract_chunk_answer() {
    let fetcher = Arc::new(FakeFetcher::text(
        "solar panels convert sunlight into electricity",
    ));
    let service = service(Arc::clone(&fetcher));

    let questions = vec!["how does solar power work".to_string()];
    let answers = service
        .process(
            DocumentSource::Url("https://example.com/energy.txt".to_string()),
            &questions,
        )
        .await
        .unwrap();

    assert_eq!(answers.len(), 1);
    assert!(answers[0].contains("solar panels"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn inline_text_skips_fetch_and_extraction() {
    let fetcher = Arc::new(FakeFetcher::text("should never be fetched"));
    let service = service(Arc::clone(&fetcher));

    let questions = vec!["about solar".to_string()];
    let answers = service
        .process(
            DocumentSource::Text("solar output peaks at noon".to_string()),
            &questions,
        )
        .await
        .unwrap();

    assert!(answers[0].contains("solar output"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_failure_is_a_document_level_error() {
    let service = service(Arc::new(UnreachableHostFetcher));

    let questions = vec!["q1".to_string(), "q2".to_string()];
    let result = service
        .process(
            DocumentSource::Url("https://down.example.com/doc.txt".to_string()),
            &questions,
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, DocqaError::Fetch(_)));
    assert!(err.is_request_fatal());
}

#[tokio::test]
async fn whitespace_only_document_is_an_extraction_error() {
    let service = service(Arc::new(FakeFetcher::text("   \n\t  ")));

    let result = service
        .process(
            DocumentSource::Url("https://example.com/blank.txt".to_string()),
            &["anything".to_string()],
        )
        .await;

    assert!(matches!(result, Err(DocqaError::Extraction(_))));
}

#[tokio::test]
async fn mixed_success_and_failure_preserves_length_and_order() {
    let service = DocumentQaService::new(
        Arc::new(FakeFetcher::text(
            "solar farms need sun. wind farms need wind.",
        )),
        Arc::new(Utf8Extractor),
        Arc::new(TopicEmbedder {
            fail_on: Some("unanswerable"),
        }),
        Arc::new(ContextEchoGenerator),
        QaConfig::default(),
    )
    .unwrap();

    let questions = vec![
        "tell me about solar".to_string(),
        "unanswerable question".to_string(),
        "tell me about wind".to_string(),
    ];
    let answers = service
        .process(
            DocumentSource::Url("https://example.com/energy.txt".to_string()),
            &questions,
        )
        .await
        .unwrap();

    assert_eq!(answers.len(), 3);
    assert!(answers[0].starts_with("context:"));
    assert_eq!(answers[1], FAILED_ANSWER);
    assert!(answers[2].starts_with("context:"));
}

#[tokio::test]
async fn concurrent_sessions_never_see_each_other_chunks() {
    let embedder = embedder();
    let generator = Arc::new(ContextEchoGenerator);
    let config = QaConfig::default();

    let session_a = RequestSession::new(Arc::clone(&embedder), Arc::clone(&generator), &config)
        .unwrap();
    let session_b = RequestSession::new(Arc::clone(&embedder), Arc::clone(&generator), &config)
        .unwrap();

    let chunker = docqa_core::chunker::Chunker::new(config.chunking.clone()).unwrap();
    let chunks_a = chunker.chunk_document(
        "solar document alpha-only content",
        "doc-a",
        ContentKind::PlainText,
    );
    let chunks_b = chunker.chunk_document(
        "solar document bravo-only content",
        "doc-b",
        ContentKind::PlainText,
    );

    let questions = vec!["about solar".to_string()];
    let (answers_a, answers_b) = tokio::join!(
        session_a.run(&questions, chunks_a),
        session_b.run(&questions, chunks_b),
    );

    let answers_a = answers_a.unwrap();
    let answers_b = answers_b.unwrap();

    assert!(answers_a[0].contains("alpha-only"));
    assert!(!answers_a[0].contains("bravo-only"));
    assert!(answers_b[0].contains("bravo-only"));
    assert!(!answers_b[0].contains("alpha-only"));
}
