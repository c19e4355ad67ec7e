//! Application state wiring all services together.
//!
//! AppState pins the generic pipeline to the concrete infra implementations
//! (SQLite store, SMTP notifier, OpenAI-compatible token source) and holds a
//! second repository handle for read-only order viewing and export.

use std::path::PathBuf;
use std::sync::Arc;

use orderdesk_core::llm::box_provider::BoxLlmProvider;
use orderdesk_core::pipeline::{OrderPipeline, SessionLog};
use orderdesk_core::template::TemplateSet;
use orderdesk_infra::config::{load_api_key, load_app_config, load_mail_config, resolve_data_dir};
use orderdesk_infra::llm::openai_compat::OpenAiCompatibleProvider;
use orderdesk_infra::smtp::SmtpNotifier;
use orderdesk_infra::sqlite::order::SqliteOrderRepository;
use orderdesk_infra::sqlite::pool::DatabasePool;
use orderdesk_types::config::AppConfig;

/// Concrete pipeline type pinned to the infra implementations.
pub type ConcretePipeline = OrderPipeline<SqliteOrderRepository, SmtpNotifier>;

/// Shared application state for CLI commands.
pub struct AppState {
    pub pipeline: Arc<ConcretePipeline>,
    /// Read-only repository handle for order viewing and export.
    pub orders: Arc<SqliteOrderRepository>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: validate credentials, connect to
    /// the database, wire the pipeline.
    ///
    /// Credential validation runs first so a misconfigured deployment dies
    /// before any request is served.
    pub async fn init() -> anyhow::Result<Self> {
        let mail_config = load_mail_config()?;

        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("orders.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let notifier = SmtpNotifier::new(&mail_config)?;
        let api_key = load_api_key();
        let provider = OpenAiCompatibleProvider::from_config(&config.llm, &api_key);
        let templates = TemplateSet::from_entries(&config.templates);

        let pipeline = OrderPipeline::new(
            BoxLlmProvider::new(provider),
            SqliteOrderRepository::new(db_pool.clone()),
            SessionLog::new(),
            notifier,
            templates,
            config.llm.clone(),
        );

        let orders = SqliteOrderRepository::new(db_pool);

        Ok(Self {
            pipeline: Arc::new(pipeline),
            orders: Arc::new(orders),
            config,
            data_dir,
        })
    }
}
