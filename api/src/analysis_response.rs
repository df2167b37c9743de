use crate::config::StatusPolicy;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use soil_analysis::{AnalysisResult, ErrorKind};

pub fn status_for(kind: ErrorKind, policy: StatusPolicy) -> StatusCode {
    match (kind, policy) {
        (ErrorKind::MissingFile | ErrorKind::EmptyFilename, _) => StatusCode::BAD_REQUEST,
        (ErrorKind::PayloadTooLarge, _) => StatusCode::PAYLOAD_TOO_LARGE,
        (ErrorKind::Internal, _) => StatusCode::INTERNAL_SERVER_ERROR,
        (ErrorKind::PdfUnreadable | ErrorKind::NoExtractableText, StatusPolicy::Strict) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        (ErrorKind::ModelInvocation, StatusPolicy::Strict) => StatusCode::BAD_GATEWAY,
        (_, StatusPolicy::Compat) => StatusCode::OK,
    }
}

/// JSON body plus the status the configured policy assigns to it.
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub status: StatusCode,
}

impl AnalysisResponse {
    pub fn new(result: AnalysisResult, policy: StatusPolicy) -> Self {
        let status = result
            .kind()
            .map(|kind| status_for(kind, policy))
            .unwrap_or(StatusCode::OK);
        Self { result, status }
    }
}

impl IntoResponse for AnalysisResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.result)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_internal_errors_ignore_policy() {
        for policy in [StatusPolicy::Compat, StatusPolicy::Strict] {
            assert_eq!(status_for(ErrorKind::MissingFile, policy), StatusCode::BAD_REQUEST);
            assert_eq!(status_for(ErrorKind::EmptyFilename, policy), StatusCode::BAD_REQUEST);
            assert_eq!(
                status_for(ErrorKind::PayloadTooLarge, policy),
                StatusCode::PAYLOAD_TOO_LARGE
            );
            assert_eq!(
                status_for(ErrorKind::Internal, policy),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn domain_errors_follow_policy() {
        for kind in [
            ErrorKind::PdfUnreadable,
            ErrorKind::NoExtractableText,
            ErrorKind::ModelInvocation,
        ] {
            assert_eq!(status_for(kind, StatusPolicy::Compat), StatusCode::OK);
        }
        assert_eq!(
            status_for(ErrorKind::PdfUnreadable, StatusPolicy::Strict),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ErrorKind::NoExtractableText, StatusPolicy::Strict),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ErrorKind::ModelInvocation, StatusPolicy::Strict),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn success_is_always_ok() {
        let response =
            AnalysisResponse::new(AnalysisResult::recommendations("Lime"), StatusPolicy::Strict);
        assert_eq!(response.status, StatusCode::OK);
    }
}
