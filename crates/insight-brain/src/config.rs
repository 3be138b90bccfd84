//! Configuration for InsightBrain.

use std::env;
use std::path::Path;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "INSIGHT_PROMPT.md";

/// Configuration for InsightBrain.
#[derive(Debug, Clone)]
pub struct InsightBrainConfig {
    /// Chat-completions API URL.
    pub api_url: String,

    /// API key for authentication. Empty when no credential is configured.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system prompt override.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for InsightBrainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.x.ai".to_string(),
            api_key: String::new(),
            model: "grok-4-1-fast".to_string(),
            system_prompt: None,
            max_tokens: Some(2048),
            temperature: Some(0.65),
        }
    }
}

impl InsightBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Credential (checked in order; a missing key is reported per request):
    /// - `INSIGHT_API_KEY`
    /// - `GROK_API_KEY`
    ///
    /// Optional environment variables:
    /// - `INSIGHT_API_URL` - API URL (default: https://api.x.ai)
    /// - `INSIGHT_MODEL` - Model name (default: grok-4-1-fast)
    /// - `INSIGHT_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `INSIGHT_PROMPT_FILE` - Path to system prompt file (default: INSIGHT_PROMPT.md)
    /// - `INSIGHT_MAX_TOKENS` - Max tokens (default: 2048)
    /// - `INSIGHT_TEMPERATURE` - Temperature (default: 0.65)
    ///
    /// System prompt priority:
    /// 1. `INSIGHT_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. The built-in advisor prompt
    pub fn from_env() -> Self {
        let api_key = env::var("INSIGHT_API_KEY")
            .or_else(|_| env::var("GROK_API_KEY"))
            .map(|key| key.trim().to_string())
            .unwrap_or_default();

        let api_url =
            env::var("INSIGHT_API_URL").unwrap_or_else(|_| "https://api.x.ai".to_string());

        let model = env::var("INSIGHT_MODEL").unwrap_or_else(|_| "grok-4-1-fast".to_string());

        // System prompt: env var takes precedence, then try loading from file
        let system_prompt = if let Ok(prompt) = env::var("INSIGHT_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file = env::var("INSIGHT_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_tokens = env::var("INSIGHT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(2048));

        let temperature = env::var("INSIGHT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.65));

        Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> InsightBrainConfigBuilder {
        InsightBrainConfigBuilder::default()
    }

    /// Whether a credential is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Builder for InsightBrainConfig.
#[derive(Debug, Default)]
pub struct InsightBrainConfigBuilder {
    config: InsightBrainConfig,
}

impl InsightBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> InsightBrainConfig {
        self.config
    }

    /// Load system prompt from a file.
    ///
    /// If the file exists and is non-empty, sets the system prompt.
    pub fn load_prompt_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Some(prompt) = load_prompt_file(path) {
            self.config.system_prompt = Some(prompt);
        }
        self
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
