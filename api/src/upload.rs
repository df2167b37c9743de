use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use soil_analysis::{AnalysisError, UploadedDocument};

const FILE_FIELD: &str = "file";

/// Pulls the `file` part out of a multipart upload.
///
/// Parts without a filename are form values, not files, and are skipped. The
/// first file part named `file` wins; anything after it is left unread.
pub async fn receive_upload(
    multipart: Result<Multipart, MultipartRejection>,
    max_bytes: usize,
) -> Result<UploadedDocument, AnalysisError> {
    let Ok(mut multipart) = multipart else {
        return Err(AnalysisError::MissingFile);
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(AnalysisError::EmptyFilename);
        }

        let bytes = field.bytes().await.map_err(|e| read_error(e, max_bytes))?;
        return Ok(UploadedDocument {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(AnalysisError::MissingFile)
}

fn read_error(err: MultipartError, max_bytes: usize) -> AnalysisError {
    classify_read_failure(err.status(), err.body_text(), max_bytes)
}

fn classify_read_failure(status: StatusCode, message: String, max_bytes: usize) -> AnalysisError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => AnalysisError::PayloadTooLarge { limit: max_bytes },
        // A body that isn't valid multipart carries no file we could read.
        StatusCode::BAD_REQUEST => AnalysisError::MissingFile,
        _ => AnalysisError::internal(message),
    }
}
