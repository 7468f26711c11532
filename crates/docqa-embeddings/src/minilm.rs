use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use docqa_core::error::{DocqaError, Result};
use docqa_core::ports::EmbeddingGenerator;

use crate::EmbeddingsError;

const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DIMENSION: usize = 384;

/// Local ONNX embedder (all-MiniLM-L6-v2, 384 dimensions).
///
/// `TextEmbedding::embed` needs `&mut self`, so the model sits behind a
/// mutex, and inference runs on the blocking thread pool to keep the async
/// executor responsive. One instance is meant to be shared process-wide
/// behind an `Arc`; concurrent sessions serialize on the model, matching
/// how the underlying ONNX session behaves anyway.
pub struct MiniLmEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl MiniLmEmbedder {
    /// Load the model, downloading it on first use (~90MB).
    pub fn new() -> std::result::Result<Self, EmbeddingsError> {
        info!(model = MODEL_NAME, "initializing embedding model");
        let options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true);
        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingsError::Init(e.to_string()))?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }

    async fn run_inference(
        &self,
        texts: Vec<String>,
    ) -> std::result::Result<Vec<Vec<f32>>, String> {
        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| "embedding model mutex poisoned".to_string())?;
            model.embed(texts, None).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

#[async_trait]
impl EmbeddingGenerator for MiniLmEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.run_inference(vec![text.to_string()])
            .await
            .map_err(DocqaError::QueryEmbedding)?
            .into_iter()
            .next()
            .ok_or_else(|| DocqaError::QueryEmbedding("model returned no embedding".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let owned: Vec<String> = texts.iter().map(|t| (*t).to_string()).collect();
        self.run_inference(owned)
            .await
            .map_err(DocqaError::DocumentEmbedding)
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}
