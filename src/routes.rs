use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::Path as FsPath;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::asr::interface::RecognitionOutcome;
use crate::state::AppState;
use crate::upload::{allowed_file, UploadError};

const INDEX_HTML: &str = include_str!("../assets/index.html");

const NOT_UNDERSTOOD: &str = "sorry, i did not understand that.";

/// What one recognition attempt looks like to the client. `gif_url` is JSON
/// `null` whenever the transcript maps to nothing.
#[derive(Debug, Serialize)]
pub struct ProcessAudioResponse {
    pub recognized_text: String,
    pub gif_url: Option<String>,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/process-audio", post(process_audio))
        .route("/image/:filename", get(serve_image))
        .route("/gif/:filename", get(serve_gif))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Received -> validated -> classified -> resolved -> responded. Only the
/// validation step can fail the request; recognition trouble is folded into
/// the payload as sentinel text.
async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessAudioResponse>, UploadError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| UploadError::MissingFile)?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|_| UploadError::MissingFile)?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) = upload.ok_or(UploadError::MissingFile)?;
    if filename.is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    if !allowed_file(&filename) {
        return Err(UploadError::InvalidFileType);
    }

    let request_id = Uuid::new_v4();
    debug!(%request_id, filename, bytes = data.len(), "submitting clip for recognition");

    let recognized_text = match state.recognizer.recognize(data.to_vec()).await {
        RecognitionOutcome::Success(text) => text.to_lowercase(),
        RecognitionOutcome::Unrecognized => NOT_UNDERSTOOD.to_string(),
        RecognitionOutcome::Failed(detail) => {
            warn!(%request_id, %detail, "recognition request failed");
            format!("request failed: {}", detail)
        }
    };

    let gif_url = state
        .keywords
        .resolve_gif(&recognized_text)
        .map(|gif| format!("/gif/{}", gif));

    info!(%request_id, recognized_text, ?gif_url, "clip resolved");

    Ok(Json(ProcessAudioResponse {
        recognized_text,
        gif_url,
    }))
}

async fn serve_image(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if !allowed_file(&filename) {
        return (StatusCode::BAD_REQUEST, "File type not allowed.").into_response();
    }
    send_from_directory(&state.config.letters_dir, &filename).await
}

async fn serve_gif(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if !filename.ends_with(".gif") {
        return (StatusCode::BAD_REQUEST, "File type not allowed.").into_response();
    }
    send_from_directory(&state.config.gifs_dir, &filename).await
}

/// Serve one file from `dir`, refusing anything that resolves outside it.
/// Canonicalizing both sides keeps `..` segments and symlinks confined.
async fn send_from_directory(dir: &str, filename: &str) -> Response {
    let base = match tokio::fs::canonicalize(dir).await {
        Ok(base) => base,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };
    let path = match tokio::fs::canonicalize(base.join(filename)).await {
        Ok(path) => path,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };
    if !path.starts_with(&base) {
        warn!(dir, filename, "refused path escaping its directory");
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gif") => "image/gif",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}
