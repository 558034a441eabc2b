use crate::routes::api::v0::artifacts::error::ArtifactError;
use crate::routes::api::v0::artifacts::{generate_artifact, list_artifacts_of_kind};
use crate::user::ExtractUserId;
use crate::AppConfig;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use preppal_model::artifact::{Artifact, ArtifactKind};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_flashcards))
        .route("/{upload_id}", post(create_flashcards))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/flashcards",
    responses(
        (status = OK, body = Vec<Artifact>, description = "All flashcard sets of the current user, newest first"),
    ),
    tag = "v0/flashcards",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_flashcards(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<Artifact>>, ArtifactError> {
    list_artifacts_of_kind(&conn, user_id, Some(ArtifactKind::Flashcards))
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v0/flashcards/{upload_id}",
    params(
        ("upload_id" = Uuid, Path, description = "Id of the upload to generate flashcards from"),
    ),
    responses(
        (status = OK, body = Artifact, description = "The generated flashcards artifact"),
        (status = NOT_FOUND, description = "Unknown upload"),
        (status = FORBIDDEN, description = "Token balance is too low"),
        (status = TOO_MANY_REQUESTS, description = "The model provider is rate limiting requests"),
    ),
    tag = "v0/flashcards",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn create_flashcards(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    Path(upload_id): Path<Uuid>,
) -> Result<Json<Artifact>, ArtifactError> {
    generate_artifact(&conn, &app_config, user_id, upload_id, ArtifactKind::Flashcards)
        .await
        .map(Json)
}
