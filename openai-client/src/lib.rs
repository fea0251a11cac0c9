//! Shared OpenAI API client library for the cli-programs workspace
//!
//! Wraps the chat completions and speech synthesis endpoints behind small
//! provider traits so tools (and their tests) can swap in other
//! implementations, plus API key resolution from the environment or the
//! 1Password CLI.

mod client;
mod credentials;
mod error;
mod provider;

pub use client::OpenAiClient;
pub use credentials::resolve_api_key;
pub use error::{OpenAiError, Result};
pub use provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, SpeechProvider, SpeechRequest,
    TokenUsage,
};
