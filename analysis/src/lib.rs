pub mod analysis_service;
pub mod budget;
pub mod document_processor;
pub mod error;
pub mod gemini_service;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use analysis_service::ReportAnalysisService;
pub use budget::ReportBudget;
pub use document_processor::DocumentProcessor;
pub use error::{AnalysisError, ErrorKind};
pub use gemini_service::{GeminiConfig, GeminiService, RecommendationGenerator};
pub use models::*;
