use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct LlmArgs {
    #[arg(long = "llm-api-base", required = false)]
    pub api_base: Option<String>,
    #[arg(long = "llm-api-key", required = false)]
    pub api_key: Option<String>,
    #[arg(long, required = false)]
    pub summary_model: Option<String>,
    #[arg(long, required = false)]
    pub flashcards_model: Option<String>,
    #[arg(long, required = false)]
    pub quiz_model: Option<String>,
}
