//! Reqwest-backed client for the OpenAI API
//!
//! Implements both provider traits against the hosted endpoints:
//! chat completions for text and the speech endpoint for TTS audio.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OpenAiError, Result};
use crate::provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, SpeechProvider, SpeechRequest,
    TokenUsage,
};

const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the hosted OpenAI API
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client for the hosted OpenAI API
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: OPENAI_API_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the base URL (for OpenAI-compatible servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

// OpenAI API request/response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SpeechApiRequest {
    model: String,
    input: String,
    voice: String,
    response_format: String,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Decode an error body, falling back to the raw text
async fn api_error_from_response(response: reqwest::Response) -> OpenAiError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    let message = if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
        error_response.error.message
    } else {
        error_text
    };

    OpenAiError::ApiError {
        message,
        status_code: Some(status.as_u16()),
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = ChatCompletionRequest {
            model: request.model,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                Message {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            temperature: request.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| OpenAiError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        if !response.status().is_success() {
            return Err(api_error_from_response(response).await);
        }

        let chat_response: ChatCompletionResponse =
            response.json().await.map_err(|e| OpenAiError::ApiError {
                message: format!("Failed to parse response: {}", e),
                status_code: None,
            })?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = chat_response.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(CompletionResponse { content, usage })
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}

#[async_trait]
impl SpeechProvider for OpenAiClient {
    async fn synthesize(&self, request: SpeechRequest, output_path: &Path) -> Result<()> {
        let speech_request = SpeechApiRequest {
            model: request.model,
            input: request.input,
            voice: request.voice,
            response_format: "mp3".to_string(),
            speed: request.speed,
        };

        let url = format!("{}/audio/speech", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&speech_request)
            .send()
            .await
            .map_err(|e| OpenAiError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        if !response.status().is_success() {
            return Err(api_error_from_response(response).await);
        }

        let audio = response.bytes().await.map_err(|e| OpenAiError::ApiError {
            message: format!("Failed to read audio response: {}", e),
            status_code: None,
        })?;

        std::fs::write(output_path, &audio)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}
