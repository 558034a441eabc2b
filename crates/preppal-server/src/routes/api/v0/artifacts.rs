use crate::routes::api::v0::artifacts::error::ArtifactError;
use crate::user::ExtractUserId;
use crate::AppConfig;
use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::header;
use preppal_core::intake::extract_upload_text;
use preppal_core::{chunk, codec, generate};
use preppal_db::{artifact, upload, user};
use preppal_model::artifact::{Artifact, ArtifactKind};
use preppal_model::convert::{IntoDbModel, IntoModel};
use preppal_utils::loader::LoaderTrait;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::error::Error;
use utoipa::IntoParams;
use uuid::Uuid;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_artifacts))
        .route("/{artifact_id}/content", get(get_artifact_content))
        .with_state(())
}

fn storage_key_for(kind: ArtifactKind, artifact_id: Uuid) -> String {
    match kind {
        ArtifactKind::Summary => format!("summaries/{artifact_id}.txt.gz"),
        ArtifactKind::Flashcards => format!("flashcards/{artifact_id}.json.gz"),
        ArtifactKind::Quiz => format!("quizzes/{artifact_id}.json.gz"),
    }
}

/// Runs the whole pipeline for one artifact: text intake, cost estimate
/// and balance pre-check, generation, gzipped persistence, and the final
/// debit. The debit re-verifies the balance, so a concurrent request that
/// drained the account between pre-check and debit still fails cleanly;
/// the artifact row then keeps its charge on record.
pub(crate) async fn generate_artifact(
    conn: &DatabaseConnection,
    app_config: &AppConfig,
    user_id: Uuid,
    upload_id: Uuid,
    kind: ArtifactKind,
) -> Result<Artifact, ArtifactError> {
    let upload = upload::Query::find_owned(conn, user_id, upload_id)
        .await?
        .ok_or(ArtifactError::UploadNotFound)?;

    let text = extract_upload_text(app_config.loader(), app_config.http_client(), &upload)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %upload_id, "text intake failed"))?;

    let chunks = chunk::split_chunks(&text);
    let cost = chunk::estimate_cost(kind, chunks.len());

    // Cheap rejection before any model call. The authoritative check is
    // the conditional debit after generation.
    let available = user::Query::get_balance(conn, user_id)
        .await?
        .ok_or(ArtifactError::SeaOrmError(sea_orm::DbErr::RecordNotFound(format!(
            "User with id {user_id} not found"
        ))))?;
    if available < cost {
        return Err(ArtifactError::InsufficientTokens { required: cost });
    }

    let llm_config = app_config.llm_config();
    let call_config = app_config.call_config();
    let content = match kind {
        ArtifactKind::Summary => generate::summary::generate(llm_config, call_config, &chunks)
            .await?
            .into_bytes(),
        ArtifactKind::Flashcards => {
            let cards = generate::flashcards::generate(llm_config, call_config, &chunks).await?;
            serde_json::to_vec(&cards)?
        }
        ArtifactKind::Quiz => {
            let quiz = generate::quiz::generate(llm_config, call_config, &text).await?;
            serde_json::to_vec(&quiz)?
        }
    };

    let compressed = codec::gzip(&content)?;

    let record = artifact::Mutation::create_artifact(conn, user_id, upload_id, kind.into_db_model(), cost).await?;

    let key = storage_key_for(kind, record.id);
    app_config
        .loader()
        .store_file(&key, &compressed)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %key, "failed to store artifact"))?;

    let record = artifact::Mutation::attach_storage_key(conn, record.id, key).await?;

    let debit = user::Mutation::debit_tokens(conn, user_id, cost).await?;
    tracing::info!(
        artifact_id = %record.id,
        ?kind,
        cost,
        balance = debit.new_balance,
        "generated artifact"
    );

    Ok(record.into_model())
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct ListParams {
    /// Restrict the listing to one artifact kind.
    kind: Option<ArtifactKind>,
}

#[utoipa::path(
    get,
    path = "/api/v0/artifacts",
    params(ListParams),
    responses(
        (status = OK, body = Vec<Artifact>, description = "All artifacts of the current user, newest first"),
    ),
    tag = "v0/artifacts",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_artifacts(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Artifact>>, ArtifactError> {
    list_artifacts_of_kind(&conn, user_id, params.kind).await.map(Json)
}

pub(crate) async fn list_artifacts_of_kind(
    conn: &DatabaseConnection,
    user_id: Uuid,
    kind: Option<ArtifactKind>,
) -> Result<Vec<Artifact>, ArtifactError> {
    let artifacts = artifact::Query::get_artifacts(conn, user_id, kind.map(IntoDbModel::into_db_model)).await?;
    Ok(artifacts.into_iter().map(IntoModel::into_model).collect())
}

#[utoipa::path(
    get,
    path = "/api/v0/artifacts/{artifact_id}/content",
    params(
        ("artifact_id" = Uuid, Path, description = "Id of the artifact"),
    ),
    responses(
        (status = OK, description = "Decompressed artifact content, text for summaries and JSON otherwise"),
        (status = NOT_FOUND, description = "Unknown artifact, or nothing stored for it"),
    ),
    tag = "v0/artifacts",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_artifact_content(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    Path(artifact_id): Path<Uuid>,
) -> Result<Response, ArtifactError> {
    let record = artifact::Query::find_owned(&conn, user_id, artifact_id)
        .await?
        .ok_or(ArtifactError::ArtifactNotFound)?;

    let key = record.storage_key.as_deref().ok_or(ArtifactError::NoContent)?;
    let file = app_config.loader().load_file(key).await?;
    let content = codec::gunzip(&file.content)?;

    let content_type = match record.kind {
        preppal_entity::artifact::Kind::Summary => "text/plain; charset=utf-8",
        _ => "application/json",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use preppal_core::llm::CallConfig;
    use preppal_core::llm_config::LlmConfig;
    use preppal_entity::upload::Kind;
    use preppal_test_helpers::{minimal_pdf, SqliteDb, TestDb};
    use preppal_utils::args::llm::LlmArgs;
    use preppal_utils::loader::file_system::FileSystemLoader;
    use preppal_utils::loader::Loader;
    use sea_orm::{ConnectionTrait, Database, EntityTrait, PaginatorTrait, Schema};
    use std::time::Duration;
    use test_log::test;

    async fn setup() -> (SqliteDb, DatabaseConnection) {
        let db = SqliteDb::new().unwrap();
        let conn = Database::connect(db.db_uri().as_ref()).await.unwrap();
        let backend = conn.get_database_backend();
        let schema = Schema::new(backend);
        for stmt in [
            schema.create_table_from_entity(preppal_entity::user::Entity),
            schema.create_table_from_entity(preppal_entity::token_usage::Entity),
            schema.create_table_from_entity(preppal_entity::upload::Entity),
            schema.create_table_from_entity(preppal_entity::artifact::Entity),
        ] {
            conn.execute(backend.build(&stmt)).await.unwrap();
        }
        (db, conn)
    }

    fn test_app_config(storage_dir: std::path::PathBuf) -> AppConfig {
        let llm_config: LlmConfig = LlmArgs {
            api_base: None,
            api_key: None,
            summary_model: None,
            flashcards_model: None,
            quiz_model: None,
        }
        .into();
        let call_config = CallConfig::builder()
            .total_timeout(Duration::from_secs(1))
            .iteration_timeout(Duration::from_secs(1))
            .build();
        let loader = Loader::FileSystem(FileSystemLoader::new(storage_dir));
        AppConfig::new(llm_config, call_config, loader, reqwest::Client::new(), 10_000)
    }

    // An under-funded account must be rejected with the required amount
    // before any model call, with no artifact row and no balance change.
    #[test(tokio::test)]
    async fn test_generation_rejected_before_model_call_when_balance_too_low() {
        let (_db, conn) = setup().await;
        let storage = tempfile::tempdir().unwrap();
        let app_config = test_app_config(storage.path().to_path_buf());

        let owner = preppal_db::user::Mutation::create_user(&conn, "student@example.org", "$2b$12$hash", None, 10)
            .await
            .unwrap();

        let key = "documents/test.pdf".to_owned();
        app_config
            .loader()
            .store_file(&key, &minimal_pdf("Photosynthesis converts light into chemical energy."))
            .await
            .unwrap();
        let stored = upload::Mutation::create_upload(&conn, owner.id, Kind::Pdf, key).await.unwrap();

        let err = generate_artifact(&conn, &app_config, owner.id, stored.id, ArtifactKind::Summary)
            .await
            .unwrap_err();
        assert!(matches!(err, ArtifactError::InsufficientTokens { required: 1800 }));

        let artifacts = preppal_entity::artifact::Entity::find().count(&conn).await.unwrap();
        assert_eq!(artifacts, 0);

        let balance = user::Query::get_balance(&conn, owner.id).await.unwrap().unwrap();
        assert_eq!(balance, 10);
    }

    #[test]
    fn storage_keys_carry_kind_prefix_and_extension() {
        let id = Uuid::nil();
        assert_eq!(
            storage_key_for(ArtifactKind::Summary, id),
            format!("summaries/{id}.txt.gz")
        );
        assert_eq!(
            storage_key_for(ArtifactKind::Flashcards, id),
            format!("flashcards/{id}.json.gz")
        );
        assert_eq!(storage_key_for(ArtifactKind::Quiz, id), format!("quizzes/{id}.json.gz"));
    }
}
