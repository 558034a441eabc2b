use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error(transparent)]
    Api(async_openai::error::OpenAIError),

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("No completion in model response")]
    EmptyResponse,

    #[error(transparent)]
    HttpClientBuild(#[from] reqwest::Error),
}

impl From<async_openai::error::OpenAIError> for LlmError {
    fn from(error: async_openai::error::OpenAIError) -> Self {
        if let async_openai::error::OpenAIError::ApiError(api) = &error {
            let message = api.message.to_ascii_lowercase();
            if message.contains("rate limit") || message.contains("429") {
                return LlmError::RateLimited;
            }
        }
        LlmError::Api(error)
    }
}

impl LlmError {
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited)
    }
}
