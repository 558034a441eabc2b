use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};
use preppal_core::generate::GenerateError;
use preppal_core::intake::IntakeError;
use preppal_db::user::DebitError;
use preppal_utils::loader::error::LoadingError;
use thiserror::Error;

/// How long a client should back off when the upstream model rate limits us.
const RETRY_AFTER_SECONDS: &str = "30";

#[derive(Error, Debug)]
pub(crate) enum ArtifactError {
    #[error(transparent)]
    SeaOrmError(#[from] sea_orm::DbErr),

    #[error("The requested upload was not found.")]
    UploadNotFound,

    #[error("The requested artifact was not found.")]
    ArtifactNotFound,

    #[error("The artifact has no stored content.")]
    NoContent,

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("You need at least {required} tokens for this action.")]
    InsufficientTokens { required: i64 },

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Storage(#[from] LoadingError),

    #[error(transparent)]
    Codec(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl ArtifactError {
    pub(crate) fn is_rate_limited(&self) -> bool {
        matches!(self, ArtifactError::Generate(e) if e.is_rate_limited())
    }
}

impl From<DebitError> for ArtifactError {
    fn from(error: DebitError) -> Self {
        match error {
            DebitError::Db(e) => ArtifactError::SeaOrmError(e),
            DebitError::InsufficientTokens { required, .. } => ArtifactError::InsufficientTokens { required },
            // The session user vanished mid-request or the amount was
            // non-positive. Both only happen on a server bug.
            DebitError::UserNotFound(e) => ArtifactError::SeaOrmError(sea_orm::DbErr::RecordNotFound(e.to_string())),
            DebitError::InvalidAmount(e) => ArtifactError::SeaOrmError(sea_orm::DbErr::Custom(e.to_string())),
        }
    }
}

impl IntoResponse for ArtifactError {
    fn into_response(self) -> Response {
        match self {
            ArtifactError::SeaOrmError(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")).into_response()
            }
            ArtifactError::UploadNotFound => (StatusCode::NOT_FOUND, "Upload not found").into_response(),
            ArtifactError::ArtifactNotFound => (StatusCode::NOT_FOUND, "Artifact not found").into_response(),
            ArtifactError::NoContent => (StatusCode::NOT_FOUND, "The artifact has no stored content").into_response(),
            ArtifactError::Intake(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not extract text from the upload").into_response()
            }
            ArtifactError::InsufficientTokens { required } => (
                StatusCode::FORBIDDEN,
                format!("You need at least {required} tokens for this action."),
            )
                .into_response(),
            ArtifactError::Generate(e) if e.is_rate_limited() => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, RETRY_AFTER_SECONDS)],
                "The model provider is rate limiting requests, try again later",
            )
                .into_response(),
            ArtifactError::Generate(GenerateError::Llm(_)) => {
                (StatusCode::BAD_GATEWAY, "The model provider failed to answer").into_response()
            }
            ArtifactError::Generate(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Generation failed: {e}")).into_response()
            }
            ArtifactError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store the artifact content").into_response()
            }
            ArtifactError::Codec(_) | ArtifactError::Serialize(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode the artifact content").into_response()
            }
        }
    }
}
