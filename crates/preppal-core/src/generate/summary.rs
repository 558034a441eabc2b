use crate::generate::GenerateError;
use crate::llm::{call_llm, CallConfig};
use crate::llm_config::LlmConfig;
use tracing::instrument;

const PROMPT: &str = "Summarize the following educational text for students, \
I want you to output the summary only, without any extra text:";

/// Summarizes each chunk independently and joins the chunk summaries with
/// blank lines.
#[instrument(skip_all, fields(chunks = chunks.len()))]
pub async fn generate(
    llm_config: &LlmConfig,
    call_config: &CallConfig,
    chunks: &[String],
) -> Result<String, GenerateError> {
    let mut summaries = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let prompt = format!("{PROMPT}\n\n{chunk}");
        let reply = call_llm(
            llm_config.get_openai_config(),
            call_config,
            llm_config.get_summary_model(),
            &prompt,
        )
        .await?;
        summaries.push(reply.content);
    }

    Ok(summaries.join("\n\n"))
}
