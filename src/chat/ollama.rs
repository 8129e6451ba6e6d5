//! Ollama local-model chat provider.

use super::{
    build_http_client,
    system_prompt::{history_as_text, SYSTEM_PROMPT},
    ChatHttpConfig, ChatMessage, ChatProvider, ProviderReply,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ollama generate-API provider. No API key; talks to a local daemon.
pub struct OllamaProvider {
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl OllamaProvider {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434/api";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "llama3.2";

    /// Creates a new provider.
    #[must_use]
    pub fn new(http: ChatHttpConfig) -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            client: build_http_client(http),
        }
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
}

impl ChatProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn reply(&self, history: &[ChatMessage], user: &str) -> Result<ProviderReply> {
        // The generate API is single-prompt; the history window is rendered
        // inline as labelled text.
        let prompt = if history.is_empty() {
            user.to_string()
        } else {
            format!("{}\nUsuario: {user}", history_as_text(history))
        };

        let request = GenerateRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/generate", self.endpoint))
            .json(&request)
            .send()
            .map_err(|e| Error::OperationFailed {
                operation: "ollama_request".to_string(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::OperationFailed {
                operation: "ollama_request".to_string(),
                cause: format!("API returned status: {status}"),
            });
        }

        let response: GenerateResponse = response.json().map_err(|e| Error::OperationFailed {
            operation: "ollama_response".to_string(),
            cause: e.to_string(),
        })?;

        Ok(ProviderReply::text_only(response.response))
    }
}

/// Request to the generate API.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    system: String,
    prompt: String,
    stream: bool,
}

/// Response from the generate API.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
