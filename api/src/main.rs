mod analysis_response;
mod config;
mod routes;
mod upload;

use anyhow::{Context, Result};
use config::Config;
use routes::{router, AppState};
use soil_analysis::{GeminiService, ReportAnalysisService, ReportBudget};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "Using Gemini model {} (status policy: {:?})",
        config.gemini.model,
        config.status_policy
    );

    let gemini_service = Arc::new(GeminiService::new(config.gemini.clone())?);
    let mut service = ReportAnalysisService::new(gemini_service);
    if let Some(max_tokens) = config.max_report_tokens {
        let budget = ReportBudget::new(max_tokens.get()).context("failed to load tokenizer")?;
        log::info!("Report text capped at {} tokens", budget.max_tokens());
        service = service.with_budget(budget);
    }

    let app = router(AppState {
        service: Arc::new(service),
        status_policy: config.status_policy,
        max_upload_bytes: config.max_upload_bytes,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
