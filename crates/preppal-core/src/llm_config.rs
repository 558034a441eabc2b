use async_openai::config::OpenAIConfig;
use preppal_utils::args::llm::LlmArgs;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

const DEFAULT_SUMMARY_MODEL: &str = "mistralai/mistral-7b-instruct-v0.3";
const DEFAULT_FLASHCARDS_MODEL: &str = "mistralai/mistral-7b-instruct-v0.3";
const DEFAULT_QUIZ_MODEL: &str = "google/gemini-2.5-flash-lite-preview-06-17";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    api_base: Option<String>,
    api_key: Option<String>,
    summary_model: Option<String>,
    flashcards_model: Option<String>,
    quiz_model: Option<String>,
}

impl From<LlmArgs> for LlmConfig {
    fn from(args: LlmArgs) -> LlmConfig {
        Self {
            api_base: args.api_base,
            api_key: args.api_key,
            summary_model: args.summary_model,
            flashcards_model: args.flashcards_model,
            quiz_model: args.quiz_model,
        }
    }
}

impl LlmConfig {
    #[must_use]
    pub fn get_openai_config(&self) -> OpenAIConfig {
        let mut openai_config =
            OpenAIConfig::default().with_api_base(self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE));

        if let Some(api_key) = self.api_key.as_deref() {
            openai_config = openai_config.with_api_key(api_key);
        }
        openai_config
    }

    #[must_use]
    pub fn get_summary_model(&self) -> &str {
        if let Some(model) = &self.summary_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for summaries");
            DEFAULT_SUMMARY_MODEL
        }
    }

    #[must_use]
    pub fn get_flashcards_model(&self) -> &str {
        if let Some(model) = &self.flashcards_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for flashcards");
            DEFAULT_FLASHCARDS_MODEL
        }
    }

    #[must_use]
    pub fn get_quiz_model(&self) -> &str {
        if let Some(model) = &self.quiz_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for quizzes");
            DEFAULT_QUIZ_MODEL
        }
    }
}
