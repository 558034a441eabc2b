use crate::routes::api::v0::uploads::error::UploadError;
use crate::user::ExtractUserId;
use crate::AppConfig;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use preppal_core::captions;
use preppal_db::upload;
use preppal_entity::upload::Kind;
use preppal_model::convert::IntoModel;
use preppal_model::upload::Upload;
use preppal_utils::loader::LoaderTrait;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::error::Error;
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::ToSchema;
use uuid::Uuid;

pub(crate) mod error;

/// Hard cap per PDF. Enforced by the body limit layer and checked again
/// after reading the field.
pub(crate) const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;

fn validate_pdf_bytes(data: &[u8]) -> Result<(), UploadError> {
    if data.len() > MAX_PDF_BYTES {
        return Err(UploadError::TooLarge);
    }
    if !data.starts_with(b"%PDF") {
        return Err(UploadError::NotAPdf);
    }
    Ok(())
}

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_uploads))
        .route(
            "/pdf",
            post(upload_pdf)
                // Some slack on top of the cap for the multipart framing.
                .layer::<_, std::convert::Infallible>(RequestBodyLimitLayer::new(MAX_PDF_BYTES + 1024 * 1024))
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/youtube", post(upload_youtube))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/uploads",
    responses(
        (status = OK, body = Vec<Upload>, description = "All uploads of the current user, newest first"),
    ),
    tag = "v0/uploads",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_uploads(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<Upload>>, UploadError> {
    let uploads = upload::Query::get_uploads(&conn, user_id).await?;
    Ok(Json(uploads.into_iter().map(IntoModel::into_model).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/pdf",
    request_body(content_type = "multipart/form-data", description = "A single 'file' field holding the PDF"),
    responses(
        (status = OK, body = Upload, description = "The stored upload record"),
        (status = BAD_REQUEST, description = "Missing file field or not a PDF"),
        (status = PAYLOAD_TOO_LARGE, description = "File is larger than 50 MB"),
    ),
    tag = "v0/uploads",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn upload_pdf(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    mut multipart: Multipart,
) -> Result<Json<Upload>, UploadError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            // Reject on declared content type before buffering anything.
            if field.content_type() != Some("application/pdf") {
                return Err(UploadError::NotAPdf);
            }
            file = Some(field.bytes().await?);
            break;
        }
    }
    let data = file.ok_or(UploadError::MissingFile)?;
    validate_pdf_bytes(&data)?;

    let key = format!("documents/{}.pdf", Uuid::new_v4());
    app_config
        .loader()
        .store_file(&key, &data)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %key, "failed to store pdf"))?;

    let upload = upload::Mutation::create_upload(&conn, user_id, Kind::Pdf, key).await?;
    tracing::info!(upload_id = %upload.id, size = data.len(), "stored pdf upload");

    Ok(Json(upload.into_model()))
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct YoutubeUploadRequest {
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    url: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/youtube",
    request_body = YoutubeUploadRequest,
    responses(
        (status = OK, body = Upload, description = "The stored upload record"),
        (status = BAD_REQUEST, description = "Not a YouTube URL, or the video has no English captions"),
    ),
    tag = "v0/uploads",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn upload_youtube(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<YoutubeUploadRequest>,
) -> Result<Json<Upload>, UploadError> {
    if captions::video_id(&request.url).is_none() {
        return Err(UploadError::InvalidVideoUrl);
    }

    // Fail now rather than at generation time if there is nothing to work with.
    captions::fetch_transcript(app_config.http_client(), &request.url).await?;

    let upload = upload::Mutation::create_upload(&conn, user_id, Kind::Youtube, request.url).await?;
    tracing::info!(upload_id = %upload.id, "stored youtube upload");

    Ok(Json(upload.into_model()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic_bytes_required() {
        assert!(validate_pdf_bytes(b"%PDF-1.7 rest of document").is_ok());
        assert!(matches!(
            validate_pdf_bytes(b"<html>not a pdf</html>"),
            Err(UploadError::NotAPdf)
        ));
    }

    #[test]
    fn test_oversized_pdf_rejected() {
        let mut data = vec![0u8; MAX_PDF_BYTES + 1];
        data[..4].copy_from_slice(b"%PDF");
        assert!(matches!(validate_pdf_bytes(&data), Err(UploadError::TooLarge)));
    }
}
