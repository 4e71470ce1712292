//! Application state wiring the agent together.
//!
//! AppState holds the concrete instances used by both CLI commands and the
//! webhook handlers. The orchestrator is generic over its model/catalog/
//! ledger ports, but AppState pins it to the concrete infra
//! implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::warn;

use devburger_core::orchestrator::{ModelSettings, Orchestrator};
use devburger_core::session::{RetentionPolicy, SessionStore};
use devburger_core::tools::ToolRegistry;
use devburger_infra::config::{api_key_from_env, load_config, resolve_data_dir};
use devburger_infra::llm::openai::OpenAiChatModel;
use devburger_infra::sqlite::catalog::SqliteCatalogRepository;
use devburger_infra::sqlite::orders::SqliteOrderLedger;
use devburger_infra::sqlite::pool::DatabasePool;
use devburger_types::config::AppConfig;

/// Concrete type alias for the orchestrator pinned to infra implementations.
pub type ConcreteOrchestrator =
    Orchestrator<OpenAiChatModel, SqliteCatalogRepository, SqliteOrderLedger>;

/// Shared application state.
///
/// Used by both CLI commands and webhook handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub catalog: SqliteCatalogRepository,
    pub ledger: SqliteOrderLedger,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, load config,
    /// wire the agent.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("devburger.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_config(&data_dir).await;

        let catalog = SqliteCatalogRepository::new(db_pool.clone());
        let ledger = SqliteOrderLedger::new(db_pool.clone());

        // A missing key still boots the CLI; model calls then degrade to the
        // fallback reply through the authentication-error path.
        let api_key = api_key_from_env().unwrap_or_else(|| {
            warn!("OPENAI_API_KEY not set; model calls will fail until it is");
            SecretString::from("")
        });
        let model =
            OpenAiChatModel::new(api_key).with_base_url(config.api_base_url.clone());

        let registry = ToolRegistry::new(catalog.clone(), ledger.clone());
        let policy = config
            .max_session_turns
            .map(RetentionPolicy::MaxTurns)
            .unwrap_or_default();
        let sessions = SessionStore::new(config.system_prompt.clone(), policy);
        let settings = ModelSettings {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let orchestrator = Orchestrator::new(model, registry, sessions, settings);

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            catalog,
            ledger,
            config,
            data_dir,
            db_pool,
        })
    }
}
