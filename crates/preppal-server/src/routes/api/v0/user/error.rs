use axum::response::{IntoResponse, Response};
use http::StatusCode;
use preppal_db::user::DebitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum UserError {
    #[error(transparent)]
    SeaOrmError(#[from] sea_orm::DbErr),

    #[error("The requested user was not found.")]
    UserNotFound,

    #[error("Amount must be a non-zero signed integer.")]
    InvalidAmount,

    #[error("You need at least {required} tokens for this action.")]
    InsufficientTokens { required: i64 },
}

impl From<DebitError> for UserError {
    fn from(error: DebitError) -> Self {
        match error {
            DebitError::Db(e) => UserError::SeaOrmError(e),
            DebitError::UserNotFound(_) => UserError::UserNotFound,
            DebitError::InvalidAmount(_) => UserError::InvalidAmount,
            DebitError::InsufficientTokens { required, .. } => UserError::InsufficientTokens { required },
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::SeaOrmError(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")).into_response()
            }
            UserError::UserNotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            UserError::InvalidAmount => {
                (StatusCode::BAD_REQUEST, "Amount must be a non-zero signed integer").into_response()
            }
            UserError::InsufficientTokens { required } => (
                StatusCode::FORBIDDEN,
                format!("You need at least {required} tokens for this action."),
            )
                .into_response(),
        }
    }
}
