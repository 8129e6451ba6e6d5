//! Anthropic chat provider.

use super::{
    build_http_client, system_prompt::SYSTEM_PROMPT, ChatHttpConfig, ChatMessage, ChatProvider,
    ProviderReply,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Anthropic messages-API provider.
pub struct AnthropicProvider {
    /// API key.
    api_key: Option<String>,
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl AnthropicProvider {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.anthropic.com/v1";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-haiku-latest";

    /// API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Creates a new provider, reading `ANTHROPIC_API_KEY` from the
    /// environment.
    #[must_use]
    pub fn new(http: ChatHttpConfig) -> Self {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        Self {
            api_key,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            client: build_http_client(http),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request(&self, messages: Vec<WireMessage>) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| Error::OperationFailed {
            operation: "anthropic_request".to_string(),
            cause: "ANTHROPIC_API_KEY not set".to_string(),
        })?;

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: 500,
            system: SYSTEM_PROMPT.to_string(),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/messages", self.endpoint))
            .header("x-api-key", api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| Error::OperationFailed {
                operation: "anthropic_request".to_string(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::OperationFailed {
                operation: "anthropic_request".to_string(),
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        let response: MessagesResponse = response.json().map_err(|e| Error::OperationFailed {
            operation: "anthropic_response".to_string(),
            cause: e.to_string(),
        })?;

        response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| Error::OperationFailed {
                operation: "anthropic_response".to_string(),
                cause: "empty content in response".to_string(),
            })
    }
}

impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn reply(&self, history: &[ChatMessage], user: &str) -> Result<ProviderReply> {
        let mut messages: Vec<WireMessage> = history
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();
        messages.push(WireMessage {
            role: "user".to_string(),
            content: user.to_string(),
        });

        let text = self.request(messages)?;
        Ok(ProviderReply::text_only(text))
    }
}

/// Request to the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<WireMessage>,
}

/// A message on the wire.
#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Response from the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// A content block in the response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_configuration() {
        let provider = AnthropicProvider::new(ChatHttpConfig::default())
            .with_api_key("test-key")
            .with_model("claude-sonnet-4-0");

        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.api_key, Some("test-key".to_string()));
        assert_eq!(provider.model, "claude-sonnet-4-0");
    }

    #[test]
    fn test_request_without_key_fails() {
        let provider = AnthropicProvider {
            api_key: None,
            endpoint: AnthropicProvider::DEFAULT_ENDPOINT.to_string(),
            model: AnthropicProvider::DEFAULT_MODEL.to_string(),
            client: reqwest::blocking::Client::new(),
        };

        let result = provider.reply(&[], "hola");
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
