//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_API_URL;
use crate::credential::DEFAULT_ENV_FILE;
use crate::types::Model;

/// Command-line arguments for the parley-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-3.5-turbo)", "MODEL")]
    pub model: Option<String>,

    /// Base URL of the API.
    #[arrrg(optional, "API base URL (default: https://api.openai.com/v1/)", "URL")]
    pub base_url: Option<String>,

    /// Path of the `.env` file to load before resolving the API key.
    #[arrrg(optional, "Environment file to load (default: .env)", "PATH")]
    pub env_file: Option<String>,

    /// Client-side request timeout.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Sampling temperature sent with each request.
    #[arrrg(optional, "Sampling temperature, 0 to 2 (default: provider's)", "TEMP")]
    pub temperature: Option<f32>,

    /// Cap on generated tokens per reply.
    #[arrrg(optional, "Maximum tokens per reply (default: provider's)", "TOKENS")]
    pub max_tokens: Option<u32>,
}

// `arrrg::CommandLine` requires `Eq`; `f32` prevents deriving it.
impl Eq for ChatArgs {}

/// Configuration for a chat session.
///
/// Holds the resolved values after applying defaults to the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model that answers prompts.
    pub model: Model,

    /// Base URL of the API.
    pub base_url: String,

    /// `.env` file consulted at startup.
    pub env_file: PathBuf,

    /// Optional client-side request timeout.
    pub timeout: Option<Duration>,

    /// Optional sampling temperature.
    pub temperature: Option<f32>,

    /// Optional cap on generated tokens.
    pub max_tokens: Option<u32>,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-3.5-turbo
    /// - Base URL: the public OpenAI endpoint
    /// - Environment file: `.env`
    /// - Timeout: none
    /// - Temperature and max tokens: left to the provider
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            base_url: DEFAULT_API_URL.to_string(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            timeout: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the `.env` file path.
    pub fn with_env_file(mut self, env_file: impl Into<PathBuf>) -> Self {
        self.env_file = env_file.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum tokens per reply.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            model: args.model.map(Model::from).unwrap_or(defaults.model),
            base_url: args.base_url.unwrap_or(defaults.base_url),
            env_file: args.env_file.map(PathBuf::from).unwrap_or(defaults.env_file),
            timeout: args.timeout_secs.map(Duration::from_secs),
            temperature: args.temperature,
            max_tokens: args.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gpt35Turbo));
        assert_eq!(config.base_url, "https://api.openai.com/v1/");
        assert_eq!(config.env_file, PathBuf::from(".env"));
        assert!(config.timeout.is_none());
        assert!(config.temperature.is_none());
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o".to_string()),
            base_url: Some("http://localhost:11434/v1".to_string()),
            env_file: Some("secrets/openai.env".to_string()),
            timeout_secs: Some(45),
            temperature: Some(0.7),
            max_tokens: Some(256),
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.env_file, PathBuf::from("secrets/openai.env"));
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_tokens, Some(256));
    }

    #[test]
    fn unknown_model_is_kept_as_custom() {
        let args = ChatArgs {
            model: Some("llama3.1:8b".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Custom("llama3.1:8b".to_string()));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::Gpt4oMini))
            .with_base_url("https://proxy.example.com/v1/")
            .with_env_file("/etc/parley.env")
            .with_timeout(Some(Duration::from_secs(10)))
            .with_temperature(Some(0.6))
            .with_max_tokens(Some(2048));

        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(config.base_url, "https://proxy.example.com/v1/");
        assert_eq!(config.env_file, PathBuf::from("/etc/parley.env"));
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.temperature, Some(0.6));
        assert_eq!(config.max_tokens, Some(2048));
    }
}
