use crate::routes::api::v0::artifacts::generate_artifact;
use crate::user::ExtractUserId;
use crate::AppConfig;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use http::StatusCode;
use preppal_model::artifact::ArtifactKind;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::error::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/{upload_id}", post(process_upload)).with_state(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ProcessRequest {
    /// Which artifacts to generate for the upload.
    #[schema(example = json!(["summary", "quiz"]))]
    options: Vec<ArtifactKind>,
}

fn key_for(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Summary => "summary",
        ArtifactKind::Flashcards => "flashcards",
        ArtifactKind::Quiz => "quiz",
    }
}

#[utoipa::path(
    post,
    path = "/api/v0/process/{upload_id}",
    params(
        ("upload_id" = Uuid, Path, description = "Id of the upload to process"),
    ),
    request_body = ProcessRequest,
    responses(
        (status = OK, description = "At least one requested artifact was generated, keyed by option"),
        (status = BAD_REQUEST, description = "No options requested"),
        (status = TOO_MANY_REQUESTS, description = "The model provider is rate limiting requests"),
        (status = INTERNAL_SERVER_ERROR, description = "Every requested artifact failed"),
    ),
    tag = "v0/process",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn process_upload(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    Path(upload_id): Path<Uuid>,
    Json(request): Json<ProcessRequest>,
) -> Response {
    if request.options.is_empty() {
        return (StatusCode::BAD_REQUEST, "At least one option is required").into_response();
    }

    let mut results = Map::new();
    let mut succeeded = 0usize;

    // Options run one after another so each debit lands before the next
    // pre-check. A failed option does not abort the remaining ones.
    for kind in request.options {
        let key = key_for(kind);
        if results.contains_key(key) {
            continue;
        }
        match generate_artifact(&conn, &app_config, user_id, upload_id, kind).await {
            Ok(artifact) => match serde_json::to_value(&artifact) {
                Ok(value) => {
                    succeeded += 1;
                    results.insert(key.to_owned(), value);
                }
                Err(error) => {
                    results.insert(key.to_owned(), json!({ "error": error.to_string() }));
                }
            },
            Err(error) if error.is_rate_limited() => {
                // No point attempting the remaining options against a
                // provider that just told us to back off.
                return error.into_response();
            }
            Err(error) => {
                tracing::error!(error = &error as &dyn Error, ?kind, %upload_id, "processing option failed");
                results.insert(key.to_owned(), json!({ "error": error.to_string() }));
            }
        }
    }

    let status = if succeeded > 0 {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(Value::Object(results))).into_response()
}
