//! Azure OpenAI chat-completions client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, GenerationError};
use crate::llm::config::GenerationConfig;
use crate::llm::generator::MessageGenerator;

/// Sampling temperature; low so regenerations stay on topic.
const TEMPERATURE: f32 = 0.2;

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 500;

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

/// Generation backend speaking the Azure OpenAI REST protocol.
pub struct AzureOpenAiClient {
    client: Client,
    config: GenerationConfig,
}

impl AzureOpenAiClient {
    /// Build a client from validated settings. No request is made here.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client, config })
    }

    fn map_send_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.config.timeout().as_secs())
        } else {
            GenerationError::Request(err)
        }
    }
}

#[async_trait]
impl MessageGenerator for AzureOpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.config.completions_url();
        let request = ChatRequest {
            model: self.config.model_id(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        debug!(
            url = %url,
            model = %self.config.model_id(),
            prompt_len = prompt.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GenerationError::Unauthorized(body)
                }
                StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(body),
                _ => GenerationError::Api {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        info!("Received {} chars from generation backend", content.len());
        Ok(content)
    }
}
