//! Failure taxonomy for a single analysis request.
//!
//! Messages are user-facing and kept stable; clients that need to branch on
//! the failure should use [`ErrorKind`] instead of matching on text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingFile,
    EmptyFilename,
    PayloadTooLarge,
    PdfUnreadable,
    NoExtractableText,
    ModelInvocation,
    Internal,
}

impl ErrorKind {
    /// Errors caused by the shape of the request rather than its content.
    pub fn is_client_input(self) -> bool {
        matches!(
            self,
            Self::MissingFile | Self::EmptyFilename | Self::PayloadTooLarge
        )
    }

    /// Errors raised while analysing a well-formed upload.
    pub fn is_domain(self) -> bool {
        matches!(
            self,
            Self::PdfUnreadable | Self::NoExtractableText | Self::ModelInvocation
        )
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Uploaded file exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Carries the parser's diagnostic for logging; the user only sees the
    /// fixed message.
    #[error("The PDF file is damaged or cannot be read. Please upload a valid PDF.")]
    PdfUnreadable { detail: String },

    #[error("Could not extract text from the PDF. It might be scanned or protected.")]
    NoExtractableText,

    #[error("Error analyzing the soil report: {message}")]
    ModelInvocation { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile => ErrorKind::MissingFile,
            Self::EmptyFilename => ErrorKind::EmptyFilename,
            Self::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            Self::PdfUnreadable { .. } => ErrorKind::PdfUnreadable,
            Self::NoExtractableText => ErrorKind::NoExtractableText,
            Self::ModelInvocation { .. } => ErrorKind::ModelInvocation,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::ModelInvocation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the request URL so base URLs never leak into responses.
        Self::model(err.without_url().to_string())
    }
}
