//! API key resolution
//!
//! Keys are resolved in order: explicit value, the OPENAI_API_KEY
//! environment variable, then the 1Password CLI.

use std::process::Command;

use crate::error::{OpenAiError, Result};

const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
const OP_SECRET_REFERENCE: &str = "op://Private/OpenAI/credential";

/// Resolve the OpenAI API key
pub fn resolve_api_key(explicit: Option<String>) -> Result<String> {
    if let Some(key) = first_non_empty(explicit, std::env::var(API_KEY_ENV_VAR).ok()) {
        return Ok(key);
    }

    eprintln!("Warning: No API key given. Fetching from 1Password.");
    fetch_from_op().ok_or(OpenAiError::MissingApiKey)
}

/// Pick the first non-empty key from the explicit argument or the environment
fn first_non_empty(explicit: Option<String>, env_value: Option<String>) -> Option<String> {
    explicit
        .into_iter()
        .chain(env_value)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Read the key from the 1Password CLI, if installed and signed in
fn fetch_from_op() -> Option<String> {
    let op_path = which::which("op").ok()?;

    let output = Command::new(op_path)
        .args(["read", OP_SECRET_REFERENCE])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let key = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if key.is_empty() { None } else { Some(key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let key = first_non_empty(
            Some("sk-explicit".to_string()),
            Some("sk-from-env".to_string()),
        );
        assert_eq!(key, Some("sk-explicit".to_string()));
    }

    #[test]
    fn test_env_key_used_when_no_explicit() {
        let key = first_non_empty(None, Some("sk-from-env".to_string()));
        assert_eq!(key, Some("sk-from-env".to_string()));
    }

    #[test]
    fn test_blank_explicit_falls_through_to_env() {
        let key = first_non_empty(Some("   ".to_string()), Some("sk-from-env".to_string()));
        assert_eq!(key, Some("sk-from-env".to_string()));
    }

    #[test]
    fn test_keys_are_trimmed() {
        let key = first_non_empty(Some("  sk-explicit\n".to_string()), None);
        assert_eq!(key, Some("sk-explicit".to_string()));
    }

    #[test]
    fn test_no_key_anywhere() {
        assert_eq!(first_non_empty(None, None), None);
    }

    #[test]
    fn test_resolve_with_explicit_key() {
        let key = resolve_api_key(Some("sk-test".to_string())).unwrap();
        assert_eq!(key, "sk-test");
    }
}
