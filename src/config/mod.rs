//! Configuration management.

use crate::chat::ChatHttpConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for anxietyflow.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// Chat assistant configuration.
    pub chat: ChatConfig,
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    /// Provider name: "rules", "openai", "anthropic", "ollama".
    pub provider: ChatBackend,
    /// Model name.
    pub model: Option<String>,
    /// API key. Usually left unset in favor of the provider's environment
    /// variable (loaded from `.env` via dotenvy at startup).
    pub api_key: Option<String>,
    /// Base URL for the provider (for self-hosted or proxied endpoints).
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl ChatConfig {
    /// Builds the HTTP configuration for this chat config, with environment
    /// overrides applied.
    #[must_use]
    pub fn http_config(&self) -> ChatHttpConfig {
        let mut http = ChatHttpConfig::default();
        if let Some(timeout_ms) = self.timeout_ms {
            http.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = self.connect_timeout_ms {
            http.connect_timeout_ms = connect_timeout_ms;
        }
        http.with_env_overrides()
    }
}

/// Available chat backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatBackend {
    /// Offline keyword rules. Works without network or keys.
    #[default]
    Rules,
    /// `OpenAI` chat completions.
    OpenAi,
    /// Anthropic messages.
    Anthropic,
    /// Ollama (local).
    Ollama,
}

impl ChatBackend {
    /// Parses a backend string, defaulting to the offline rules.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "anthropic" => Self::Anthropic,
            "ollama" => Self::Ollama,
            _ => Self::Rules,
        }
    }

    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Chat configuration.
    pub chat: Option<ConfigFileChat>,
}

/// Chat section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileChat {
    /// Provider name.
    pub provider: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            chat: ChatConfig::default(),
        }
    }
}

impl FlowConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following in order:
    /// 1. `ANXIETYFLOW_CONFIG_PATH` environment variable
    /// 2. Platform-specific config dir
    /// 3. XDG-style `~/.config/anxietyflow/config.toml`
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("ANXIETYFLOW_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
            tracing::warn!("could not load config from {}", path.display());
        }

        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs
            .config_dir()
            .join("anxietyflow")
            .join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("anxietyflow")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `FlowConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(chat) = file.chat {
            if let Some(provider) = chat.provider {
                config.chat.provider = ChatBackend::parse(&provider);
            }
            config.chat.model = chat.model;
            config.chat.api_key = chat.api_key;
            config.chat.base_url = chat.base_url;
            config.chat.timeout_ms = chat.timeout_ms;
            config.chat.connect_timeout_ms = chat.connect_timeout_ms;
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }
}

/// Platform data directory, falling back to a hidden dir under the cwd.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "anxietyflow")
        .map_or_else(|| PathBuf::from(".anxietyflow"), |d| d.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_backend_parse() {
        assert_eq!(ChatBackend::parse("openai"), ChatBackend::OpenAi);
        assert_eq!(ChatBackend::parse("ANTHROPIC"), ChatBackend::Anthropic);
        assert_eq!(ChatBackend::parse("ollama"), ChatBackend::Ollama);
        assert_eq!(ChatBackend::parse("anything-else"), ChatBackend::Rules);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
data_dir = "/tmp/anxietyflow-test"

[chat]
provider = "ollama"
model = "mistral"
base_url = "http://localhost:11434/api"
timeout_ms = 60000
"#
        )
        .unwrap();

        let config = FlowConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/anxietyflow-test"));
        assert_eq!(config.chat.provider, ChatBackend::Ollama);
        assert_eq!(config.chat.model.as_deref(), Some("mistral"));
        assert_eq!(config.chat.http_config().timeout_ms, 60_000);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = FlowConfig::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chat]\nprovider = \"anthropic\"").unwrap();

        let config = FlowConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.chat.provider, ChatBackend::Anthropic);
        assert!(config.chat.model.is_none());
        assert_eq!(config.data_dir, default_data_dir());
    }
}
