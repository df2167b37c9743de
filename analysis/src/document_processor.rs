use crate::error::AnalysisError;
use std::panic::{self, AssertUnwindSafe};

/// Pulls the text layer out of uploaded PDFs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts text on the blocking pool so large documents don't stall the
    /// executor.
    pub async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, AnalysisError> {
        let processor = *self;
        tokio::task::spawn_blocking(move || processor.extract_text_blocking(&bytes))
            .await
            .map_err(|e| AnalysisError::internal(format!("PDF extraction task failed: {}", e)))?
    }

    /// Concatenates the text of every page in document order, without page
    /// separators. A document that parses but yields only whitespace is
    /// rejected.
    pub fn extract_text_blocking(&self, bytes: &[u8]) -> Result<String, AnalysisError> {
        let pages = self.extract_pages(bytes)?;
        log::debug!("Extracted text from {} pages", pages.len());

        let text = pages.concat();
        if text.trim().is_empty() {
            return Err(AnalysisError::NoExtractableText);
        }

        Ok(text)
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, AnalysisError> {
        // pdf_extract panics on some malformed inputs instead of returning an error.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(AnalysisError::PdfUnreadable {
                detail: e.to_string(),
            }),
            Err(_) => Err(AnalysisError::PdfUnreadable {
                detail: "PDF parser panicked on malformed input".to_string(),
            }),
        }
    }
}
