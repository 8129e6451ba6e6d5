//! Chat assistant.
//!
//! Provides a unified interface over assistant providers: a rule-based
//! offline provider plus OpenAI, Anthropic and Ollama HTTP backends. The
//! session layer guarantees the user always gets actionable content; any
//! provider failure degrades to a canned coping-techniques reply.

mod anthropic;
mod ollama;
mod openai;
mod rules;
pub mod system_prompt;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use rules::RuleBasedProvider;
pub use system_prompt::SYSTEM_PROMPT;

use crate::Result;
use std::time::Duration;

/// Number of history turns sent to a provider as context.
pub const HISTORY_WINDOW: usize = 6;

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person journaling.
    User,
    /// The assistant.
    Assistant,
}

impl Role {
    /// Returns the wire-format role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn of conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Speaker.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A provider's reply: the main text plus optional follow-up suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    /// Assistant text.
    pub text: String,
    /// Suggested follow-up prompts the caller may display.
    pub suggestions: Vec<String>,
}

impl ProviderReply {
    /// Creates a reply without suggestions.
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Trait for chat assistant providers.
pub trait ChatProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Generates a reply to `user` given recent conversation `history`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce a reply.
    fn reply(&self, history: &[ChatMessage], user: &str) -> Result<ProviderReply>;
}

/// HTTP client configuration for chat providers.
#[derive(Debug, Clone, Copy)]
pub struct ChatHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for ChatHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl ChatHttpConfig {
    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("ANXIETYFLOW_CHAT_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("ANXIETYFLOW_CHAT_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for chat requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: ChatHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("failed to build chat HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// A conversation with history management and graceful degradation.
///
/// Only the last [`HISTORY_WINDOW`] turns are forwarded to the provider.
/// Provider failures never reach the caller as errors; they become the
/// canned fallback reply.
pub struct ChatSession {
    provider: Box<dyn ChatProvider>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Creates a session over a provider.
    #[must_use]
    pub fn new(provider: Box<dyn ChatProvider>) -> Self {
        Self {
            provider,
            history: Vec::new(),
        }
    }

    /// Returns the active provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Returns the full conversation so far.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends a user message and returns the assistant reply.
    pub fn send(&mut self, user: &str) -> ProviderReply {
        let window_start = self.history.len().saturating_sub(HISTORY_WINDOW);
        let window = &self.history[window_start..];

        let reply = match self.provider.reply(window, user) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    "chat provider failed, using fallback: {e}"
                );
                fallback_reply()
            },
        };

        self.history.push(ChatMessage::user(user));
        self.history.push(ChatMessage::assistant(reply.text.clone()));
        reply
    }
}

/// Canned reply used when a provider fails.
///
/// Keeps the user with something actionable: breathing, grounding and the
/// emergency number.
#[must_use]
pub fn fallback_reply() -> ProviderReply {
    ProviderReply {
        text: "No he podido conectar con el asistente. Mientras tanto, aquí tienes \
algunas técnicas que puedes usar:

**Respiración 4-7-8:**
1. Inhala por la nariz 4 segundos
2. Mantén 7 segundos
3. Exhala por la boca 8 segundos
4. Repite 4 veces

**Grounding 5-4-3-2-1:**
- 5 cosas que puedes VER
- 4 cosas que puedes TOCAR
- 3 cosas que puedes OÍR
- 2 cosas que puedes OLER
- 1 cosa que puedes SABOREAR

**Recuerda:**
- Los síntomas de ansiedad son temporales
- No son peligrosos, aunque se sientan intensos
- Tienes las herramientas para manejar esto

Si necesitas ayuda inmediata, contacta a un profesional o llama al 112."
            .to_string(),
        suggestions: vec![
            "Técnicas de respiración".to_string(),
            "Grounding 5-4-3-2-1".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct EchoProvider;

    impl ChatProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn reply(&self, history: &[ChatMessage], user: &str) -> Result<ProviderReply> {
            Ok(ProviderReply::text_only(format!(
                "history={} user={user}",
                history.len()
            )))
        }
    }

    struct FailingProvider;

    impl ChatProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn reply(&self, _history: &[ChatMessage], _user: &str) -> Result<ProviderReply> {
            Err(Error::OperationFailed {
                operation: "chat".to_string(),
                cause: "unreachable".to_string(),
            })
        }
    }

    #[test]
    fn test_session_records_both_turns() {
        let mut session = ChatSession::new(Box::new(EchoProvider));
        let reply = session.send("hola");
        assert!(reply.text.contains("user=hola"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, Role::User);
        assert_eq!(session.history()[1].role, Role::Assistant);
    }

    #[test]
    fn test_session_windows_history_to_six_turns() {
        let mut session = ChatSession::new(Box::new(EchoProvider));
        for i in 0..6 {
            session.send(&format!("mensaje {i}"));
        }
        // 12 turns recorded; only the last 6 are forwarded.
        let reply = session.send("final");
        assert!(reply.text.contains("history=6"));
        assert_eq!(session.history().len(), 14);
    }

    #[test]
    fn test_provider_failure_degrades_to_fallback() {
        let mut session = ChatSession::new(Box::new(FailingProvider));
        let reply = session.send("me encuentro mal");
        assert!(reply.text.contains("Respiración 4-7-8"));
        assert!(reply.text.contains("112"));
        // The fallback still becomes part of the history.
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_http_config_defaults() {
        let config = ChatHttpConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.connect_timeout_ms, 3_000);
    }
}
