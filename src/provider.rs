//! External generative provider
//!
//! The engine hands a system context string plus the user query to a
//! chat-completions endpoint and gets prose back. The trait seam exists so
//! tests can inject a mock; the real client targets any OpenAI-compatible
//! API (Groq by default).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AssistantError, Result};

/// Default provider endpoint (Groq's OpenAI-compatible API)
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Request timeout (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generative text collaborator
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Produce prose for a user message given a system context string
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    /// Create a client for the default endpoint and model
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_MODEL, api_key)
    }

    /// Create a client with a custom endpoint and model
    pub fn with_config(base_url: &str, model: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AssistantError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            temperature: 0.7,
            max_tokens: 500,
        })
    }
}

#[async_trait]
impl GenerativeProvider for ChatCompletionsClient {
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::ProviderTimeout {
                        duration_ms: REQUEST_TIMEOUT.as_millis() as u64,
                    }
                } else {
                    AssistantError::Provider(format!("failed to send request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::Provider(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Provider(format!("malformed response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::Provider("response contained no choices".to_string()))
    }
}
