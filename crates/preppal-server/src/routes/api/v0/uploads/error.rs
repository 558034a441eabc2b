use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use preppal_core::captions::CaptionsError;
use preppal_utils::loader::error::LoadingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum UploadError {
    #[error(transparent)]
    SeaOrmError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error("The request is missing a 'file' field.")]
    MissingFile,

    #[error("Only PDF files are accepted.")]
    NotAPdf,

    #[error("The file exceeds the maximum size of 50 MB.")]
    TooLarge,

    #[error("Not a recognizable YouTube video URL.")]
    InvalidVideoUrl,

    #[error("No English captions available for this video.")]
    NoCaptions,

    #[error("Could not reach the caption service.")]
    CaptionService(reqwest::Error),

    #[error(transparent)]
    Storage(#[from] LoadingError),
}

impl From<CaptionsError> for UploadError {
    fn from(error: CaptionsError) -> Self {
        match error {
            CaptionsError::InvalidUrl(_) => UploadError::InvalidVideoUrl,
            CaptionsError::NoCaptions => UploadError::NoCaptions,
            CaptionsError::Http(e) => UploadError::CaptionService(e),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::SeaOrmError(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")).into_response()
            }
            UploadError::Multipart(e) => (StatusCode::BAD_REQUEST, format!("Invalid multipart body: {e}")).into_response(),
            UploadError::MissingFile => (StatusCode::BAD_REQUEST, "No 'file' field in request").into_response(),
            UploadError::NotAPdf => (StatusCode::BAD_REQUEST, "Only PDF files are accepted").into_response(),
            UploadError::TooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "The file exceeds the maximum size of 50 MB").into_response()
            }
            UploadError::InvalidVideoUrl => {
                (StatusCode::BAD_REQUEST, "Not a recognizable YouTube video URL").into_response()
            }
            UploadError::NoCaptions => {
                (StatusCode::BAD_REQUEST, "No English captions available for this video").into_response()
            }
            UploadError::CaptionService(_) => {
                (StatusCode::BAD_GATEWAY, "Could not reach the caption service").into_response()
            }
            UploadError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store the file").into_response(),
        }
    }
}
