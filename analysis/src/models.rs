use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ErrorKind};

/// A PDF received in a single request. Dropped once the response is sent.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What the analysis endpoint sends back. Exactly one of `recommendations`
/// or `error` is ever present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Recommendations { recommendations: String },
    Error { error: String, category: ErrorKind },
}

impl AnalysisResult {
    pub fn recommendations(text: impl Into<String>) -> Self {
        Self::Recommendations {
            recommendations: text.into(),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Recommendations { .. } => None,
            Self::Error { category, .. } => Some(*category),
        }
    }
}

impl From<AnalysisError> for AnalysisResult {
    fn from(err: AnalysisError) -> Self {
        Self::Error {
            category: err.kind(),
            error: err.to_string(),
        }
    }
}

impl From<Result<String, AnalysisError>> for AnalysisResult {
    fn from(result: Result<String, AnalysisError>) -> Self {
        match result {
            Ok(text) => Self::recommendations(text),
            Err(err) => err.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}
