use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use docqa_core::error::{DocqaError, Result};
use docqa_core::ports::AnswerGenerator;

/// Answer generator speaking the OpenAI-compatible chat-completions
/// protocol (Ollama, vLLM, llama.cpp server, and friends).
pub struct ChatGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl ChatGenerator {
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn build_prompt(question: &str, context: &str) -> String {
        format!(
            "Answer this specific question using the provided document fragments. \
             Give a clear, concise answer with relevant context. If the fragments \
             do not contain the answer, say the document does not provide this \
             information.\n\n\
             QUESTION: {question}\n\n\
             DOCUMENT FRAGMENTS:\n{context}\n\n\
             Provide a direct answer that includes the main facts and any \
             important conditions or limitations. Keep the response concise.\n\n\
             Answer:"
        )
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl AnswerGenerator for ChatGenerator {
    async fn generate(&self, question: &str, context: &str) -> Result<String> {
        let prompt = Self::build_prompt(question, context);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.2,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocqaError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DocqaError::Generation(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DocqaError::Generation(format!("unexpected response shape: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DocqaError::Generation("response contained no choices".to_string()))
    }
}
