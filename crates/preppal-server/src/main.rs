use crate::migration::Migrator;
use crate::opt::{Commands, Db, Run};
use anyhow::Result;
use axum::serve;
use clap::Parser;
use preppal_core::llm::CallConfig;
use preppal_core::llm_config::LlmConfig;
use preppal_db::sea_orm::{ConnectOptions, Database};
use preppal_utils::loader::{Loader, LoaderHandler};
use preppal_utils::net::create_listener;
use sea_orm_migration::MigratorTrait;
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

mod app;
mod migration;
mod opt;
mod routes;
mod user;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

const LLM_TOTAL_TIMEOUT: Duration = Duration::from_secs(120);
const LLM_ITERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub(crate) struct InnerAppConfig {
    llm_config: LlmConfig,
    call_config: CallConfig,
    loader: Loader,
    http_client: reqwest::Client,
    starting_tokens: i64,
}

#[derive(Clone, Debug)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    fn new(
        llm_config: LlmConfig,
        call_config: CallConfig,
        loader: Loader,
        http_client: reqwest::Client,
        starting_tokens: i64,
    ) -> Self {
        Self(Arc::new(InnerAppConfig {
            llm_config,
            call_config,
            loader,
            http_client,
            starting_tokens,
        }))
    }

    pub fn llm_config(&self) -> &LlmConfig {
        &self.0.llm_config
    }

    pub fn call_config(&self) -> &CallConfig {
        &self.0.call_config
    }

    pub fn loader(&self) -> &Loader {
        &self.0.loader
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.0.http_client
    }

    pub fn starting_tokens(&self) -> i64 {
        self.0.starting_tokens
    }
}

async fn run(opt: Run) -> Result<()> {
    let _guard = preppal_utils::tracing::setup(
        preppal_utils::tracing::TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    let pool_options = build_connect_options(&opt.db, opt.database_url.clone());
    let conn = Database::connect(pool_options).await?;

    Migrator::up(&conn, None)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn std::error::Error, "failed to run migrations"))?;

    let loader_handler = LoaderHandler::new(opt.s3);
    let loader = loader_handler.loader(&opt.storage)?;

    let llm_config: LlmConfig = opt.llm.into();
    let call_config = CallConfig::builder()
        .total_timeout(LLM_TOTAL_TIMEOUT)
        .iteration_timeout(LLM_ITERATION_TIMEOUT)
        .build();

    let http_client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;

    let app_config = AppConfig::new(llm_config, call_config, loader, http_client, opt.starting_tokens);

    let app = app::create_app(app_config, opt.origins, conn)?;

    let listener = create_listener((opt.host, opt.port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    let service = app.into_make_service();
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, service).await?;
    Ok(())
}

fn build_connect_options(db_options: &Db, db_url: Url) -> ConnectOptions {
    let mut pool_options = ConnectOptions::new(db_url);
    if let Some(min_connections) = db_options.db_min_connections {
        pool_options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        pool_options.max_connections(max_connections);
    }
    pool_options
}

fn main() -> Result<()> {
    env::set_var("RUST_BACKTRACE", "1");

    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
