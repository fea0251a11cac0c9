//! Error types for the OpenAI client

use thiserror::Error;

/// Errors that can occur when talking to the OpenAI API
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// API returned an error response
    #[error("API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// No API key could be resolved from any source
    #[error(
        "No OpenAI API key found. Pass one explicitly, set OPENAI_API_KEY, or sign in to the 1Password CLI."
    )]
    MissingApiKey,

    /// Filesystem error while writing audio output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for OpenAI client operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = OpenAiError::ApiError {
            message: "invalid model".to_string(),
            status_code: Some(400),
        };
        assert_eq!(err.to_string(), "API error: invalid model");
    }

    #[test]
    fn test_missing_api_key_display_mentions_sources() {
        let err = OpenAiError::MissingApiKey;
        let message = err.to_string();
        assert!(message.contains("OPENAI_API_KEY"));
        assert!(message.contains("1Password"));
    }
}
