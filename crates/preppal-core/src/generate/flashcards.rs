use crate::generate::GenerateError;
use crate::json_repair::extract_json_array;
use crate::llm::{call_llm, CallConfig};
use crate::llm_config::LlmConfig;
use preppal_model::flashcard::Flashcard;
use tracing::instrument;

fn prompt_for(chunk: &str) -> String {
    format!(
        "You are an API that generates exactly 5 educational flashcards in pure JSON format only, \
without any text or description. Each flashcard must be a {{\"q\": \"...\", \"a\": \"...\"}} object. \
Do not explain your response.\n\n\
Input Text:\n{chunk}\n\n\
Return this format only:\n[\n  {{\"q\": \"...\", \"a\": \"...\"}},\n  ...\n]"
    )
}

/// Asks the model for five cards per chunk. Chunks whose reply cannot be
/// recovered as a card array are skipped; the whole generation fails only
/// when every chunk was skipped.
#[instrument(skip_all, fields(chunks = chunks.len()))]
pub async fn generate(
    llm_config: &LlmConfig,
    call_config: &CallConfig,
    chunks: &[String],
) -> Result<Vec<Flashcard>, GenerateError> {
    let mut cards = Vec::new();
    let mut skipped = 0usize;

    for chunk in chunks {
        let reply = call_llm(
            llm_config.get_openai_config(),
            call_config,
            llm_config.get_flashcards_model(),
            &prompt_for(chunk),
        )
        .await?;

        match extract_json_array(&reply.content).and_then(|value| serde_json::from_value::<Vec<Flashcard>>(value).ok())
        {
            Some(parsed) => cards.extend(parsed),
            None => {
                skipped += 1;
                tracing::warn!(output = reply.content, "skipping malformed flashcards chunk");
            }
        }
    }

    if cards.is_empty() {
        tracing::error!(skipped, "no valid flashcards generated");
        return Err(GenerateError::NoValidCards);
    }

    if skipped > 0 {
        tracing::warn!(skipped, recovered = cards.len(), "some flashcard chunks were skipped");
    }
    Ok(cards)
}
