use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Extensions accepted for uploaded clips. Also gates the letter-image route.
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// Structural problems with the uploaded form. These are the only failures
/// that become HTTP errors; recognition trouble rides in the 200 payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,
    #[error("No selected file")]
    EmptyFilename,
    #[error("Invalid file type")]
    InvalidFileType,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// True when the part after the last dot is an allowed extension,
/// case-insensitive.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
