use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use preppal_utils::args::llm::LlmArgs;
use preppal_utils::loader::s3::S3Config;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "preppal", about = "Run the study companion api")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
#[group(multiple = true, required = false)]
pub(crate) struct Db {
    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(long, help = "Database connection url (sqlite or postgres)")]
    pub(crate) database_url: Url,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) s3: Option<S3Config>,

    #[command(flatten)]
    pub(crate) llm: LlmArgs,

    #[arg(long, help = "The url under which uploads and generated artifacts are stored")]
    pub(crate) storage: Url,

    #[arg(long, default_value_t = 10_000, help = "Token balance granted to new accounts")]
    pub(crate) starting_tokens: i64,

    #[arg(long)]
    pub(crate) origins: Vec<String>,

    #[arg(long = "sentry-dsn", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry")]
    pub(crate) env: String,
}
