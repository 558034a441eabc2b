use crate::llm::error::LlmError;
use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use backoff::ExponentialBackoffBuilder;
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use typed_builder::TypedBuilder;

pub mod error;

#[derive(TypedBuilder, Debug, Clone)]
pub struct CallConfig {
    total_timeout: Duration,
    iteration_timeout: Duration,
    #[builder(default = Duration::from_millis(100))]
    min_retry_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    max_retry_interval: Duration,
}

/// One chat-completion reply, with the provider's token count when reported.
#[derive(Debug, Clone)]
pub struct Reply {
    pub content: String,
    pub tokens: Option<u32>,
}

#[instrument(skip(openai_config, prompt), fields(prompt_len = prompt.len()))]
pub async fn call_llm(
    openai_config: OpenAIConfig,
    config: &CallConfig,
    model: &str,
    prompt: &str,
) -> Result<Reply, LlmError> {
    let message = ChatCompletionRequestUserMessageArgs::default()
        .content(prompt)
        .build()?;

    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(vec![message.into()])
        .build()?;

    let http_client = reqwest::Client::builder()
        .timeout(config.iteration_timeout)
        .build()
        .map_err(|error| {
            tracing::error!(error = &error as &dyn Error, "failed to build http client for llm call");
            LlmError::HttpClientBuild(error)
        })?;

    let mut backoff_builder = ExponentialBackoffBuilder::default();
    backoff_builder
        .with_max_interval(config.max_retry_interval)
        .with_initial_interval(config.min_retry_interval)
        .with_max_elapsed_time(Some(config.total_timeout));

    let backoff = backoff_builder.build();

    let client = Client::with_config(openai_config)
        .with_http_client(http_client)
        .with_backoff(backoff);

    tracing::debug!("sending chat completion request");
    let chat_completion = client.chat().create(request).await.map_err(|error| {
        tracing::warn!(error = &error as &dyn Error, "llm call failed");
        LlmError::from(error)
    })?;

    let tokens = chat_completion.usage.map(|u| u.total_tokens);

    let content = chat_completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(LlmError::EmptyResponse)?;

    Ok(Reply { content, tokens })
}
