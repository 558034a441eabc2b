use crate::llm::error::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("No valid flashcards could be recovered from the model output")]
    NoValidCards,

    #[error("Model reply did not contain a quiz")]
    MalformedQuiz,

    #[error("Quiz contained no questions")]
    EmptyQuiz,
}

impl GenerateError {
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerateError::Llm(llm) if llm.is_rate_limited())
    }
}
