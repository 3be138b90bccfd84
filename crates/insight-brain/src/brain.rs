//! InsightBrain implementation using a chat-completions API.

use async_trait::async_trait;
use grid_core::{AlertReport, FacilityRecord, InsightGenerator, RegionCode, SourceError};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::InsightBrainConfig;
use crate::prompt::{build_prompt, DEFAULT_SYSTEM_PROMPT};

/// An insight generator backed by an OpenAI-compatible chat-completions API.
///
/// Each request is stateless: the prompt carries the full alert and facility
/// context, and no conversation history is kept between queries.
pub struct InsightBrain {
    client: Client,
    config: InsightBrainConfig,
}

impl InsightBrain {
    /// Create a new InsightBrain with the given configuration.
    ///
    /// A missing API key is not rejected here; each generation request fails
    /// with [`SourceError::Configuration`] instead.
    pub fn new(config: InsightBrainConfig) -> Result<Self, SourceError> {
        let client = Client::builder().build().map_err(|e| {
            SourceError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "InsightBrain initialized with model: {}, credential configured: {}",
            config.model,
            config.has_api_key()
        );

        Ok(Self { client, config })
    }

    /// Create an InsightBrain from environment variables.
    ///
    /// See [`InsightBrainConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, SourceError> {
        Self::new(InsightBrainConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &InsightBrainConfig {
        &self.config
    }

    fn build_messages(&self, user_prompt: String) -> Vec<ChatMessage> {
        let system = self
            .config
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        vec![ChatMessage::system(system), ChatMessage::user(user_prompt)]
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, SourceError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending insight request to {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Upstream(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl InsightGenerator for InsightBrain {
    async fn generate_insight(
        &self,
        region: &RegionCode,
        report: &AlertReport,
        facilities: &[FacilityRecord],
        truncated: bool,
    ) -> Result<String, SourceError> {
        if !self.config.has_api_key() {
            return Err(SourceError::Configuration(
                "No insight API key configured; set INSIGHT_API_KEY".to_string(),
            ));
        }

        info!(
            "Generating insight for {} ({} alerts, {} facilities, truncated: {})",
            region,
            report.items.len(),
            facilities.len(),
            truncated
        );

        let prompt = build_prompt(region, report, facilities, truncated);
        let completion = self.chat_completion(self.build_messages(prompt)).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let text = completion
            .first_text()
            .ok_or_else(|| SourceError::EmptyPayload(format!("model {}", self.config.model)))?;

        info!("Generated insight: {} chars", text.len());
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "InsightBrain"
    }
}

/// Map a non-success response to a source error.
fn classify_failure(status: StatusCode, body: &str) -> SourceError {
    let detail = serde_json::from_str::<ApiError>(body)
        .map(|api_error| api_error.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SourceError::Unauthorized(format!(
            "Invalid API key or insufficient permissions ({}): {}",
            status.as_u16(),
            detail
        )),
        _ => SourceError::Upstream(format!("API error ({}): {}", status.as_u16(), detail)),
    }
}
