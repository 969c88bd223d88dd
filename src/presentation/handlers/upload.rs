use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Extension, Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::FlashcardError;
use crate::domain::Flashcard;
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

/// Set to `true` when only the head of the document was sent to the model.
pub const CONTENT_TRUNCATED_HEADER: &str = "x-content-truncated";

#[derive(Serialize)]
pub struct QuizResponse {
    pub quiz: Vec<Flashcard>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

struct Upload {
    filename: String,
    data: Bytes,
}

#[tracing::instrument(skip_all)]
pub async fn upload_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Extension(request_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected upload request");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err((status, detail)) => return error_response(status, detail),
    };

    tracing::debug!(
        request_id = %request_id.0,
        filename = %upload.filename,
        bytes = upload.data.len(),
        "File received"
    );

    match state
        .flashcard_service
        .generate(&upload.filename, &upload.data)
        .await
    {
        Ok(deck) => {
            let mut response = (StatusCode::OK, Json(QuizResponse { quiz: deck.cards })).into_response();
            if deck.truncated {
                response
                    .headers_mut()
                    .insert(CONTENT_TRUNCATED_HEADER, HeaderValue::from_static("true"));
            }
            response
        }
        Err(e) => {
            let (status, detail) = describe_error(&e);
            tracing::error!(
                request_id = %request_id.0,
                error = %e,
                stage = ?e.stage(),
                status = status.as_u16(),
                filename = %upload.filename,
                "Flashcard generation failed"
            );
            error_response(status, detail)
        }
    }
}

/// First multipart field carrying a file name.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, (StatusCode, String)> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err((StatusCode::BAD_REQUEST, "No file uploaded".to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err((e.status(), format!("Failed to read multipart: {}", e)));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            (e.status(), format!("Failed to read file: {}", e))
        })?;

        return Ok(Upload { filename, data });
    }
}

/// Caller-facing status and message. Internal details stay in the logs.
fn describe_error(error: &FlashcardError) -> (StatusCode, String) {
    match error {
        FlashcardError::UnsupportedFormat(_) => (
            StatusCode::BAD_REQUEST,
            "Unsupported file type. Only PDF, PPTX, or TXT are allowed.".to_string(),
        ),
        FlashcardError::EmptyContent => (
            StatusCode::BAD_REQUEST,
            "Could not extract content from the file or file is empty.".to_string(),
        ),
        FlashcardError::Extraction { content_type, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!(
                "Failed to process {} file.",
                content_type.extension().to_uppercase()
            ),
        ),
        FlashcardError::ModelUnavailable(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate flashcards: model backend is unavailable.".to_string(),
        ),
        FlashcardError::Model(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate flashcards: model backend returned an error.".to_string(),
        ),
        FlashcardError::MalformedResponse(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Model did not return valid JSON for flashcards after extraction.".to_string(),
        ),
        FlashcardError::NoValidFlashcards => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "No valid flashcards could be generated from the content.".to_string(),
        ),
    }
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorResponse { detail })).into_response()
}
