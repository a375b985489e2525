//! Request handlers and the error-to-response boundary.

use crate::error::BriefError;
use crate::prompts::summary_prompt;
use crate::session::Session;
use crate::web::state::AppState;
use crate::web::template;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

// ── Error boundary ───────────────────────────────────────────────────────

/// Handler-level failure, converted into a JSON body with a mapped status.
#[derive(Debug)]
pub enum ApiError {
    Brief(BriefError),
    SessionNotFound,
    BadUpload(String),
}

impl From<BriefError> for ApiError {
    fn from(e: BriefError) -> Self {
        ApiError::Brief(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "Unknown session; upload a document first.".to_string(),
            ),
            ApiError::BadUpload(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Brief(e) => {
                let status = match &e {
                    BriefError::NotAPdf { .. }
                    | BriefError::CorruptDocument { .. }
                    | BriefError::RenderFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    BriefError::PageOutOfRange { .. } => StatusCode::NOT_FOUND,
                    BriefError::MissingApiKey => StatusCode::BAD_REQUEST,
                    BriefError::AuthRejected { .. } => StatusCode::UNAUTHORIZED,
                    BriefError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                    BriefError::Transport { .. }
                    | BriefError::ApiTimeout { .. }
                    | BriefError::EmptyResponse => StatusCode::BAD_GATEWAY,
                    BriefError::InvalidConfig(_) | BriefError::Internal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.to_string())
            }
        };

        warn!("Request failed ({}): {}", status, message);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub page_count: usize,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub page: usize,
    pub api_key: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    template::render_index()
}

/// Accept a multipart PDF upload, render all pages, open a session.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut document: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadUpload(format!("Failed to read file data: {}", e)))?
                    .to_vec();
                document = Some((filename, data));
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let (filename, data) =
        document.ok_or_else(|| ApiError::BadUpload("No file uploaded".to_string()))?;

    // Uploads are constrained to PDF: accept a .pdf extension or a %PDF
    // header; the renderer re-validates the header regardless.
    if !filename.to_lowercase().ends_with(".pdf") && !data.starts_with(b"%PDF") {
        return Err(ApiError::BadUpload(
            "Only PDF files are accepted.".to_string(),
        ));
    }

    let session = Session::open(data, &state.options).await?;
    let page_count = session.page_count();
    let session_id = state.sessions.insert(session).await;

    info!(
        "Uploaded '{}': {} pages, session {}",
        filename, page_count, session_id
    );

    Ok(Json(UploadResponse {
        session_id,
        page_count,
    }))
}

/// Serve the rendered PNG for one page of a session's document.
pub async fn page_image(
    State(state): State<Arc<AppState>>,
    Path((id, page)): Path<(Uuid, usize)>,
) -> Result<Response, ApiError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound)?;

    let path = session.read().await.image_path(page)?.to_path_buf();

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| BriefError::Internal(format!("Failed to read rendered page: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

/// Summarise the selected page of a session's document.
///
/// The credential check comes first: with no API key nothing is extracted
/// and no network call is made. The page's text is re-extracted on every
/// request, so changing the selector always summarises the current page.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    if request.api_key.trim().is_empty() {
        return Err(BriefError::MissingApiKey.into());
    }

    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound)?;

    let text = session.read().await.extract_page_text(request.page).await?;
    let prompt = summary_prompt(&text);

    let summary = state
        .summarizer
        .summarize(&prompt, &request.api_key)
        .await?;

    session.write().await.set_summary(summary.clone());

    info!(
        "Summarised page {} of session {} ({} chars)",
        request.page,
        id,
        summary.len()
    );

    Ok(Json(SummarizeResponse { summary }))
}

/// Tear down a session, deleting its rendered images.
pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id).await {
        info!("Session {} closed", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound)
    }
}
