use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Pdf,
    Youtube,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Upload {
    pub id: Uuid,
    pub kind: UploadKind,
    /// Storage key for PDFs, video URL for YouTube uploads.
    pub source: String,
    pub uploaded_at: chrono::NaiveDateTime,
}
