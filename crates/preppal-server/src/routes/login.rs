use crate::routes::error::{ErrorData, LoginError, LoginErrorType};
use crate::user::ExtractUserId;
use crate::AppConfig;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use http::StatusCode;
use preppal_db::{access_tokens, user};
use preppal_model::login::Token;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::borrow::Cow;
use std::error::Error;
use utoipa::ToSchema;

const MIN_PASSWORD_LEN: usize = 8;

pub fn create_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/whoami", get(whoami))
        .with_state(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    #[schema(example = "student@example.org")]
    email: String,
    password: String,
    username: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

fn validate_registration(request: &RegisterRequest) -> Result<(), LoginError> {
    if !request.email.contains('@') || request.email.trim().len() < 3 {
        return Err(LoginError::InvalidRequest("email is not valid"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(LoginError::InvalidRequest("password must be at least 8 characters"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = OK, description = "Account created, returns Bearer token", body = Token),
        (status = BAD_REQUEST, description = "Email or password did not pass validation", body = ErrorData<LoginErrorType>),
        (status = CONFLICT, description = "Email is already registered", body = ErrorData<LoginErrorType>),
    ),
    tag = "login"
)]
pub(crate) async fn register(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Token>, LoginError> {
    validate_registration(&request)?;

    if user::Query::find_by_email(&conn, &request.email).await?.is_some() {
        return Err(LoginError::EmailTaken);
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let user = user::Mutation::create_user(
        &conn,
        &request.email,
        &password_hash,
        request.username,
        app_config.starting_tokens(),
    )
    .await?;

    tracing::info!(user_id = %user.id, "registered new user");

    let access_token = access_tokens::Mutation::replace_access_token(&conn, user.id).await?;
    Ok(Json(Token {
        access_token: access_token.access_token,
    }))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Successful login, returns Bearer token", body = Token, example = json!( Token { access_token: "abcToken12345678".into() })),
        (status = UNAUTHORIZED, description = "Authentication failed", body = ErrorData<LoginErrorType>),
    ),
    tag = "login"
)]
pub(crate) async fn login(
    Extension(conn): Extension<DatabaseConnection>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Token>, LoginError> {
    let Some(user) = user::Query::find_by_email(&conn, &request.email).await? else {
        tracing::debug!("login attempt for unknown email");
        return Err(LoginError::InvalidCredentials);
    };

    if !bcrypt::verify(&request.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login attempt with wrong password");
        return Err(LoginError::InvalidCredentials);
    }

    let access_token = access_tokens::Mutation::replace_access_token(&conn, user.id).await?;
    Ok(Json(Token {
        access_token: access_token.access_token,
    }))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = NO_CONTENT, description = "User Logged out successfully"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to delete access token")
    ),
    tag = "login",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn logout(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> impl IntoResponse {
    if let Err(error) = access_tokens::Mutation::delete_access_token(&conn, user_id).await {
        tracing::error!(
            user = %user_id,
            error = &error as &dyn Error,
            "failed to delete access token"
        );
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    tracing::debug!(user = %user_id, "user logged out");
    StatusCode::NO_CONTENT
}

async fn whoami(user: Option<ExtractUserId>) -> impl IntoResponse {
    match user {
        None => {
            tracing::debug!("no user found");
            (StatusCode::NOT_FOUND, Cow::Borrowed("no user"))
        }
        Some(user) => (StatusCode::OK, Cow::Owned(format!("Hello {}", user.0))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            username: None,
        }
    }

    #[test]
    fn test_registration_requires_plausible_email() {
        assert!(validate_registration(&request("not-an-email", "longenough")).is_err());
        assert!(validate_registration(&request("a@b.c", "longenough")).is_ok());
    }

    #[test]
    fn test_registration_requires_password_length() {
        assert!(validate_registration(&request("a@b.c", "short")).is_err());
    }
}
