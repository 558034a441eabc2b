use crate::captions::{self, CaptionsError};
use crate::pdf::{self, PdfError};
use preppal_entity::upload;
use preppal_utils::loader::error::LoadingError;
use preppal_utils::loader::{Loader, LoaderTrait};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Loading(#[from] LoadingError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Captions(#[from] CaptionsError),
}

/// Turns an upload into the raw text the generation pipelines run on.
/// PDFs are fetched from storage and text-extracted, YouTube uploads go
/// through the caption endpoint.
#[instrument(skip(loader, http_client, upload), fields(upload_id = %upload.id, kind = ?upload.kind))]
pub async fn extract_upload_text(
    loader: &Loader,
    http_client: &reqwest::Client,
    upload: &upload::Model,
) -> Result<String, IntakeError> {
    match upload.kind {
        upload::Kind::Pdf => {
            let file = loader.load_file(&upload.source).await?;
            Ok(pdf::extract_text(&file.content)?)
        }
        upload::Kind::Youtube => Ok(captions::fetch_transcript(http_client, &upload.source).await?),
    }
}
