use crate::error::AnalysisError;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Turns extracted report text into agronomic recommendations.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    async fn generate(&self, report_text: &str) -> Result<String, AnalysisError>;
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("Gemini API key must not be empty"));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    pub fn build_prompt(&self, report_text: &str) -> String {
        format!(
            r#"You are a soil and agriculture expert. Analyze the following soil report and provide detailed
crop recommendations based on the soil properties. Include information about suitable crops,
recommended fertilizers, and any soil amendments needed.

Soil report:
{report_text}
"#
        )
    }

    fn response_text(response: GeminiResponse) -> Result<String, AnalysisError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt blocked ({})", r))
                .unwrap_or_else(|| "model returned no candidates".to_string());
            return Err(AnalysisError::model(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .map(|r| format!("model returned no text (finish reason: {})", r))
                .unwrap_or_else(|| "model returned no text".to_string());
            return Err(AnalysisError::model(reason));
        }

        Ok(text)
    }
}

#[async_trait]
impl RecommendationGenerator for GeminiService {
    async fn generate(&self, report_text: &str) -> Result<String, AnalysisError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(self.build_prompt(report_text)),
                }],
                role: Some("user".to_string()),
            }],
        };

        log::debug!("Calling Gemini model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(AnalysisError::model(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        Self::response_text(gemini_response)
    }
}
