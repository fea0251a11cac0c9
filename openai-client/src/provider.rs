//! Provider traits and request/response types
//!
//! The pipeline talks to the OpenAI API through these traits so that
//! tests can substitute scripted implementations.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// A chat completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt establishing the assistant's role
    pub system_prompt: String,
    /// User message
    pub user_prompt: String,
    /// Model identifier (e.g. "gpt-4o-mini")
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// A chat completion response
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content of the first completion choice
    pub content: String,
    /// Token usage, if reported by the API
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A speech synthesis request
///
/// Output format is always mp3; the speed multiplier is applied by the API.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Model identifier (e.g. "tts-1")
    pub model: String,
    /// Text to synthesize
    pub input: String,
    /// Voice identifier (e.g. "alloy", "onyx", "nova")
    pub voice: String,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f32,
}

/// Chat completion collaborator
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a completion request and return the first choice
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name for debug output
    fn name(&self) -> &'static str;
}

/// Text-to-speech collaborator
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize speech and write the mp3 audio to `output_path`
    async fn synthesize(&self, request: SpeechRequest, output_path: &Path) -> Result<()>;

    /// Provider name for debug output
    fn name(&self) -> &'static str;
}
