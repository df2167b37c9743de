use crate::analysis_response::AnalysisResponse;
use crate::config::StatusPolicy;
use crate::upload::receive_upload;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use soil_analysis::{AnalysisResult, ReportAnalysisService};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportAnalysisService>,
    pub status_policy: StatusPolicy,
    pub max_upload_bytes: usize,
}

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/analyze-soil-report", post(analyze_soil_report))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn analyze_soil_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AnalysisResponse {
    let request_id = Uuid::new_v4();

    let result = match receive_upload(multipart, state.max_upload_bytes).await {
        Ok(document) => {
            log::info!("[{}] Received {}", request_id, document.filename);
            state.service.analyze(document).await
        }
        Err(err) => err.into(),
    };

    log_outcome(request_id, &result);
    AnalysisResponse::new(result, state.status_policy)
}

fn log_outcome(request_id: Uuid, result: &AnalysisResult) {
    let AnalysisResult::Error { error, category } = result else {
        log::info!("[{}] Analysis succeeded", request_id);
        return;
    };

    match *category {
        kind if kind.is_client_input() => {
            log::debug!("[{}] Rejected upload ({:?}): {}", request_id, kind, error)
        }
        kind if kind.is_domain() => {
            log::warn!("[{}] Analysis failed ({:?}): {}", request_id, kind, error)
        }
        _ => log::error!("[{}] Request failed: {}", request_id, error),
    }
}
