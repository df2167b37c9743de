use crate::budget::ReportBudget;
use crate::document_processor::DocumentProcessor;
use crate::error::AnalysisError;
use crate::gemini_service::RecommendationGenerator;
use crate::models::*;
use std::sync::Arc;

/// Runs one uploaded report through extraction and recommendation.
pub struct ReportAnalysisService {
    document_processor: DocumentProcessor,
    generator: Arc<dyn RecommendationGenerator>,
    budget: Option<ReportBudget>,
}

impl ReportAnalysisService {
    pub fn new(generator: Arc<dyn RecommendationGenerator>) -> Self {
        Self {
            document_processor: DocumentProcessor::new(),
            generator,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: ReportBudget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub async fn analyze(&self, document: UploadedDocument) -> AnalysisResult {
        self.recommend(document).await.into()
    }

    async fn recommend(&self, document: UploadedDocument) -> Result<String, AnalysisError> {
        let start_time = std::time::Instant::now();
        let UploadedDocument { filename, bytes } = document;

        log::info!("Analyzing soil report {} ({} bytes)", filename, bytes.len());

        let text = self.document_processor.extract_text(bytes).await?;
        log::debug!("Extracted {} characters from {}", text.chars().count(), filename);

        let report = match &self.budget {
            Some(budget) => budget.fit(&text),
            None => text.as_str().into(),
        };
        // A tight budget can leave only the leading whitespace of the first page.
        if report.trim().is_empty() {
            return Err(AnalysisError::NoExtractableText);
        }

        let recommendations = self.generator.generate(&report).await?;

        log::info!(
            "Generated recommendations for {} in {}ms",
            filename,
            start_time.elapsed().as_millis()
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::PdfBuilder;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl RecommendationGenerator for RecordingGenerator {
        async fn generate(&self, report_text: &str) -> Result<String, AnalysisError> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(report_text.to_string());
            match &self.fail_with {
                Some(message) => Err(AnalysisError::model(message.clone())),
                None => Ok(format!("recommendation #{}", prompts.len())),
            }
        }
    }

    fn upload(bytes: Vec<u8>) -> UploadedDocument {
        UploadedDocument {
            filename: "report.pdf".to_string(),
            bytes,
        }
    }

    #[tokio::test]
    async fn report_text_reaches_the_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone());
        let pdf = PdfBuilder::new().page(&["pH 6.2, N 40kg/ha, P 20kg/ha"]).build();

        let result = service.analyze(upload(pdf)).await;

        assert_eq!(result, AnalysisResult::recommendations("recommendation #1"));
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("40kg/ha"));
    }

    #[tokio::test]
    async fn repeated_uploads_are_analyzed_independently() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone());
        let pdf = PdfBuilder::new().page(&["Magnesium 90 ppm"]).build();

        let first = service.analyze(upload(pdf.clone())).await;
        let second = service.analyze(upload(pdf)).await;

        assert_eq!(first, AnalysisResult::recommendations("recommendation #1"));
        assert_eq!(second, AnalysisResult::recommendations("recommendation #2"));
        assert_eq!(generator.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unreadable_pdf_never_reaches_the_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone());

        let result = service.analyze(upload(b"garbage".to_vec())).await;

        assert_eq!(result.kind(), Some(ErrorKind::PdfUnreadable));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_pdf_reports_missing_text() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone());
        let pdf = PdfBuilder::new().page(&[]).build();

        let result = service.analyze(upload(pdf)).await;

        assert_eq!(result.kind(), Some(ErrorKind::NoExtractableText));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generator_failure_is_reported_with_its_message() {
        let generator = Arc::new(RecordingGenerator {
            fail_with: Some("deadline exceeded".to_string()),
            ..Default::default()
        });
        let service = ReportAnalysisService::new(generator);
        let pdf = PdfBuilder::new().page(&["Sulphur 12 ppm"]).build();

        let result = service.analyze(upload(pdf)).await;

        assert_eq!(
            result,
            AnalysisResult::Error {
                error: "Error analyzing the soil report: deadline exceeded".to_string(),
                category: ErrorKind::ModelInvocation,
            }
        );
    }

    #[tokio::test]
    async fn budget_truncates_text_before_generation() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone())
            .with_budget(ReportBudget::new(3).unwrap());
        let pdf = PdfBuilder::new()
            .page(&["Exchangeable sodium percentage 4 percent, gypsum not required"])
            .build();

        let result = service.analyze(upload(pdf)).await;

        assert!(matches!(result, AnalysisResult::Recommendations { .. }));
        let prompts = generator.prompts.lock().unwrap();
        assert!(!prompts[0].contains("gypsum"));
    }

    #[tokio::test]
    async fn budget_never_sends_blank_text_to_the_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = ReportAnalysisService::new(generator.clone())
            .with_budget(ReportBudget::new(1).unwrap());
        let pdf = PdfBuilder::new().page(&["pH 6.2, N 40kg/ha"]).build();

        let result = service.analyze(upload(pdf)).await;

        // The first token of extracted text is the whitespace before page one.
        assert_eq!(result.kind(), Some(ErrorKind::NoExtractableText));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }
}
