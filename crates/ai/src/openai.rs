use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateEmbeddingRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use clinical_rag_common::CapabilityError;
use std::time::Duration;
use tracing::debug;

use crate::capability::{EmbeddingCapability, GenerationCapability};

const EMBEDDING_MODEL: &str = "text-embedding-3-small";
const CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenAI-backed implementation of both AI capabilities. Every call is
/// wrapped in a bounded timeout so a slow upstream cannot hold a request
/// open indefinitely; expiry is reported as a capability failure.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    embedding_model: String,
    chat_model: String,
    max_tokens: u16,
    temperature: f32,
    request_timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>) -> Self {
        // Falls back to the OPENAI_API_KEY environment variable
        let config = if let Some(key) = api_key {
            OpenAIConfig::new().with_api_key(key)
        } else {
            OpenAIConfig::new()
        };

        Self {
            client: Client::with_config(config),
            embedding_model: EMBEDDING_MODEL.to_string(),
            chat_model: CHAT_MODEL.to_string(),
            max_tokens: 800,
            temperature: 0.2,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_chat_model(mut self, model: String) -> Self {
        self.chat_model = model;
        self
    }

    pub fn with_embedding_model(mut self, model: String) -> Self {
        self.embedding_model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u16) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[async_trait]
impl EmbeddingCapability for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.embedding_model)
            .input([text])
            .build()
            .map_err(|e| CapabilityError::Embedding(e.to_string()))?;

        let response = tokio::time::timeout(
            self.request_timeout,
            self.client.embeddings().create(request),
        )
        .await
        .map_err(|_| CapabilityError::Timeout(self.request_timeout.as_secs()))?
        .map_err(|e| CapabilityError::Embedding(e.to_string()))?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| CapabilityError::Embedding("no embedding returned".to_string()))?
            .embedding;

        debug!("Embedded {} chars into {} dimensions", text.len(), embedding.len());

        Ok(embedding)
    }
}

#[async_trait]
impl GenerationCapability for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        let message = ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| CapabilityError::Generation(e.to_string()))?,
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages(vec![message])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
            .map_err(|e| CapabilityError::Generation(e.to_string()))?;

        let response = tokio::time::timeout(
            self.request_timeout,
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| CapabilityError::Timeout(self.request_timeout.as_secs()))?
        .map_err(|e| CapabilityError::Generation(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CapabilityError::Generation("no completion returned".to_string()))
    }
}
