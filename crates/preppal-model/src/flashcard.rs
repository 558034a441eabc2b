use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One card as emitted by the model: `{"q": "...", "a": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flashcard {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}
